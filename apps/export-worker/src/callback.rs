use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub const EXPORT_TOKEN_HEADER: &str = "x-export-token";

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("callback request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("callback rejected with status {0}")]
    Status(u16),
}

/// Tells the serving process that a room's artifact is on disk.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn artifact_ready(&self, room_id: &str) -> Result<(), CallbackError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadyBody<'a> {
    room_id: &'a str,
}

/// `POST {api}/api/artifacts/ready`. Any non-2xx answer is a failure.
pub struct HttpNotifier {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpNotifier {
    pub fn new(client: reqwest::Client, api_base: &str, token: Option<String>) -> Self {
        Self {
            client,
            url: format!("{api_base}/api/artifacts/ready"),
            token,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn artifact_ready(&self, room_id: &str) -> Result<(), CallbackError> {
        let mut req = self.client.post(&self.url).json(&ReadyBody { room_id });
        if let Some(token) = &self.token {
            req = req.header(EXPORT_TOKEN_HEADER, token);
        }
        let resp = req.send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(CallbackError::Status(resp.status().as_u16()))
        }
    }
}
