//! Turns a finished room into an SVG artifact on disk.

use std::fmt::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;
use export_pipeline::{ArtifactError, ArtifactStore};
use thiserror::Error;
use tracing::info;

use crate::snapshot::{RoomSnapshot, COLS, ROWS};

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("room fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("room fetch returned status {0}")]
    Status(u16),
    #[error("room snapshot is malformed: {0}")]
    Malformed(String),
    #[error("artifact write failed: {0}")]
    Store(#[from] ArtifactError),
}

/// Produce the artifact for one room and return where it was written.
#[async_trait]
pub trait Capturer: Send + Sync {
    async fn capture(&self, room_id: &str) -> Result<PathBuf, CaptureError>;
}

/// Reads the room over HTTP and renders it locally.
pub struct SvgBoardCapturer {
    client: reqwest::Client,
    api_base: String,
    store: ArtifactStore,
}

impl SvgBoardCapturer {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>, store: ArtifactStore) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            store,
        }
    }

    async fn fetch(&self, room_id: &str) -> Result<RoomSnapshot, CaptureError> {
        let url = format!("{}/api/rooms/{room_id}", self.api_base);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CaptureError::Status(resp.status().as_u16()));
        }
        let snapshot: RoomSnapshot = resp.json().await?;
        if !snapshot.has_valid_shape() {
            return Err(CaptureError::Malformed(format!(
                "board is not {ROWS}x{COLS}"
            )));
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl Capturer for SvgBoardCapturer {
    async fn capture(&self, room_id: &str) -> Result<PathBuf, CaptureError> {
        let snapshot = self.fetch(room_id).await?;
        let svg = render_board_svg(&snapshot);
        let path = self.store.write(room_id, svg.as_bytes()).await?;
        info!(room_id, path = %path.display(), cells = snapshot.filled_cells(), "Board captured");
        Ok(path)
    }
}

const CELL: usize = 80;
const RADIUS: usize = 32;
const HEADER: usize = 60;

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn fill_for(cell: Option<&str>) -> &'static str {
    match cell {
        Some("YELLOW") => "#f5c518",
        Some("RED") => "#d7263d",
        _ => "#ffffff",
    }
}

fn headline(snapshot: &RoomSnapshot) -> String {
    match (&snapshot.winner, snapshot.is_ended()) {
        (Some(name), _) => format!("Winner: {}", escape_xml(name)),
        (None, true) => "Draw".to_string(),
        (None, false) => format!("In progress ({})", escape_xml(&snapshot.status)),
    }
}

/// Self-contained SVG of the board: title line, blue grid, one circle per cell.
pub fn render_board_svg(snapshot: &RoomSnapshot) -> String {
    let width = COLS * CELL;
    let height = HEADER + ROWS * CELL;
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"<title>Connect Four room {}</title>"#,
        escape_xml(&snapshot.id)
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="40" font-family="sans-serif" font-size="28" text-anchor="middle">{}</text>"#,
        width / 2,
        headline(snapshot)
    );
    let _ = writeln!(
        svg,
        r##"<rect x="0" y="{HEADER}" width="{width}" height="{}" fill="#1f4fbf"/>"##,
        ROWS * CELL
    );

    for (r, row) in snapshot.board.iter().enumerate().take(ROWS) {
        for (c, cell) in row.iter().enumerate().take(COLS) {
            let cx = c * CELL + CELL / 2;
            let cy = HEADER + r * CELL + CELL / 2;
            let _ = writeln!(
                svg,
                r#"<circle cx="{cx}" cy="{cy}" r="{RADIUS}" fill="{}"/>"#,
                fill_for(cell.as_deref())
            );
        }
    }

    svg.push_str("</svg>\n");
    svg
}
