// Room-scoped fan-out of state changes and artifact notifications.

use std::time::Duration;

use backend::services::artifacts;

use crate::support::build_test_env;
use crate::support::factory::{paired_room, play, play_columns, start, YELLOW_VERTICAL_WIN};
use crate::support::websocket::{room_ws_url, start_test_server, wait_for_subscribers};
use crate::support::websocket_client::WebSocketClient;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn subscribed_client(
    addr: std::net::SocketAddr,
    room_id: &str,
) -> Result<WebSocketClient, Box<dyn std::error::Error>> {
    let mut client = WebSocketClient::connect_retry(&room_ws_url(addr, room_id), TIMEOUT).await?;
    client.recv_until_type("ack", TIMEOUT).await?;
    client.recv_until_type("room-state-changed", TIMEOUT).await?;
    Ok(client)
}

#[tokio::test]
async fn move_reaches_every_subscriber_of_the_room() -> Result<(), Box<dyn std::error::Error>> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let (server, addr, join) = start_test_server(env.state.clone()).await?;

    let mut first = subscribed_client(addr, &room.room_id).await?;
    let mut second = subscribed_client(addr, &room.room_id).await?;
    wait_for_subscribers(&env.state.hub(), &room.room_id, 2, TIMEOUT).await?;

    play(&env, &room.yellow, &room.room_id, 4).await?;

    for client in [&mut first, &mut second] {
        let event = client.recv_until_type("room-state-changed", TIMEOUT).await?;
        assert_eq!(event["turn"], "RED");
        assert_eq!(event["board"][5][4], "YELLOW");
    }

    first.close().await?;
    second.close().await?;
    server.stop(true).await;
    join.await??;
    Ok(())
}

#[tokio::test]
async fn other_rooms_hear_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let (_, lonely) = start(&env, "lonely").await?;
    let (server, addr, join) = start_test_server(env.state.clone()).await?;

    let mut bystander = subscribed_client(addr, &lonely.room_id).await?;
    wait_for_subscribers(&env.state.hub(), &lonely.room_id, 1, TIMEOUT).await?;

    play(&env, &room.yellow, &room.room_id, 0).await?;

    let quiet = bystander.recv_json_timeout(Duration::from_millis(300)).await;
    assert!(quiet.is_err(), "unexpected frame for another room: {quiet:?}");

    bystander.close().await?;
    server.stop(true).await;
    join.await??;
    Ok(())
}

#[tokio::test]
async fn finished_game_broadcasts_winner_then_artifact() -> Result<(), Box<dyn std::error::Error>> {
    let env = build_test_env().await?;
    let room = paired_room(&env).await?;
    let (server, addr, join) = start_test_server(env.state.clone()).await?;

    let mut client = subscribed_client(addr, &room.room_id).await?;
    wait_for_subscribers(&env.state.hub(), &room.room_id, 1, TIMEOUT).await?;

    play_columns(&env, &room, &YELLOW_VERTICAL_WIN).await?;

    let mut last = client.recv_until_type("room-state-changed", TIMEOUT).await?;
    while last["status"] != "ENDED" {
        last = client.recv_until_type("room-state-changed", TIMEOUT).await?;
    }
    assert_eq!(last["winner"], room.yellow.name.as_str());
    assert_eq!(last["winnerId"], room.yellow.player_id.as_str());

    // Worker side: the artifact lands, then the callback confirms it.
    env.state.artifacts().write(&room.room_id, b"<svg/>").await?;
    let delivered =
        artifacts::confirm_ready(env.state.artifacts(), &env.state.hub(), &room.room_id).await?;
    assert_eq!(delivered, 1);

    let ready = client.recv_until_type("artifact-ready", TIMEOUT).await?;
    assert_eq!(ready["roomId"], room.room_id.as_str());

    client.close().await?;
    server.stop(true).await;
    join.await??;
    Ok(())
}
