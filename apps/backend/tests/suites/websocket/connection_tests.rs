// Connection lifecycle: ack, initial snapshot, unknown rooms, unsubscribe.

use std::time::Duration;

use crate::support::build_test_env;
use crate::support::factory::paired_room;
use crate::support::websocket::{room_ws_url, start_test_server, wait_for_subscribers};
use crate::support::websocket_client::WebSocketClient;

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn connect_sends_ack_then_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let (server, addr, join) = start_test_server(env.state.clone()).await?;

    let mut client = WebSocketClient::connect_retry(&room_ws_url(addr, &room.room_id), TIMEOUT).await?;

    let ack = client.recv_json_timeout(TIMEOUT).await?.ok_or("no ack")?;
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["message"], "connected");

    let snapshot = client.recv_json_timeout(TIMEOUT).await?.ok_or("no snapshot")?;
    assert_eq!(snapshot["type"], "room-state-changed");
    assert_eq!(snapshot["id"], room.room_id.as_str());
    assert_eq!(snapshot["status"], "PLAYING");
    assert_eq!(snapshot["turn"], "YELLOW");

    client.close().await?;
    server.stop(true).await;
    join.await??;
    Ok(())
}

#[tokio::test]
async fn unknown_room_is_refused_before_upgrade() -> Result<(), Box<dyn std::error::Error>> {
    let env = build_test_env().await?;
    let (server, addr, join) = start_test_server(env.state.clone()).await?;

    let url = room_ws_url(addr, "3b241101-e2bb-4255-8caf-4136c566a962");
    let err = WebSocketClient::connect(&url)
        .await
        .err()
        .ok_or("upgrade should have been refused")?;
    match err {
        tokio_tungstenite::tungstenite::Error::Http(resp) => {
            assert_eq!(resp.status().as_u16(), 404)
        }
        other => return Err(format!("unexpected error: {other}").into()),
    }
    assert_eq!(env.state.hub().room_count(), 0);

    server.stop(true).await;
    join.await??;
    Ok(())
}

#[tokio::test]
async fn disconnect_unsubscribes() -> Result<(), Box<dyn std::error::Error>> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let hub = env.state.hub();
    let (server, addr, join) = start_test_server(env.state.clone()).await?;

    let mut client = WebSocketClient::connect_retry(&room_ws_url(addr, &room.room_id), TIMEOUT).await?;
    wait_for_subscribers(&hub, &room.room_id, 1, TIMEOUT).await?;

    client.close().await?;
    wait_for_subscribers(&hub, &room.room_id, 0, TIMEOUT).await?;

    server.stop(true).await;
    join.await??;
    Ok(())
}
