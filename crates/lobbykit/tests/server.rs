//! End-to-end tests: real WebSocket clients against a running server.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use lobbykit::{
    ClientEvent, LobbyCode, LobbyServerBuilder, RegistryConfig, ServerEvent,
};
use tokio_tungstenite::tungstenite::Message;

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a server on a random port and returns its address.
async fn start_server(config: RegistryConfig) -> String {
    let server = LobbyServerBuilder::new()
        .bind("127.0.0.1:0")
        .registry_config(config)
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn send_event(ws: &mut ClientWs, event: &ClientEvent) {
    let bytes = serde_json::to_vec(event).unwrap();
    ws.send(Message::Binary(bytes.into()))
        .await
        .expect("client send should succeed");
}

/// Receives the next data frame and decodes it, with a deadline.
async fn recv_event(ws: &mut ClientWs) -> ServerEvent {
    let deadline = Duration::from_secs(2);
    loop {
        let msg = tokio::time::timeout(deadline, ws.next())
            .await
            .expect("timed out waiting for an event")
            .expect("stream ended unexpectedly")
            .expect("websocket error");
        match msg {
            Message::Binary(data) => {
                return serde_json::from_slice(&data).unwrap();
            }
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).unwrap();
            }
            _ => continue,
        }
    }
}

/// Asserts that no event arrives within a short window.
async fn assert_silent(ws: &mut ClientWs) {
    let result =
        tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "expected no event, got {result:?}");
}

/// Creates a lobby on `ws` and returns the code from the ack.
async fn create_lobby(ws: &mut ClientWs) -> LobbyCode {
    send_event(ws, &ClientEvent::CreateLobby("host-info".into())).await;
    match recv_event(ws).await {
        ServerEvent::LobbyCreated(code) => code,
        other => panic!("expected lobby-created, got {other:?}"),
    }
}

async fn join_lobby(ws: &mut ClientWs, code: &LobbyCode) {
    send_event(ws, &ClientEvent::JoinLobby(code.clone())).await;
    match recv_event(ws).await {
        ServerEvent::LobbyJoined => {}
        other => panic!("expected lobby-joined, got {other:?}"),
    }
}

// =========================================================================
// Lobby profile
// =========================================================================

#[tokio::test]
async fn test_create_lobby_acks_host_with_code() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut host = connect(&addr).await;

    let code = create_lobby(&mut host).await;
    assert_eq!(code.as_str().len(), 5);
}

#[tokio::test]
async fn test_join_unknown_code_reports_not_found() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut client = connect(&addr).await;

    send_event(&mut client, &ClientEvent::JoinLobby(LobbyCode::from("zzzzz")))
        .await;

    match recv_event(&mut client).await {
        ServerEvent::Error { code, message } => {
            assert_eq!(code, 404);
            assert!(message.contains("zzzzz"));
        }
        other => panic!("expected error event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_share_information_reaches_peers_but_not_sender() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut host = connect(&addr).await;
    let mut peer_a = connect(&addr).await;
    let mut peer_b = connect(&addr).await;

    let code = create_lobby(&mut host).await;
    join_lobby(&mut peer_a, &code).await;
    join_lobby(&mut peer_b, &code).await;

    send_event(
        &mut peer_a,
        &ClientEvent::ShareInformation("the payload".into()),
    )
    .await;

    let expected = ServerEvent::InformationShared("the payload".into());
    assert_eq!(recv_event(&mut host).await, expected);
    assert_eq!(recv_event(&mut peer_b).await, expected);
    assert_silent(&mut peer_a).await;
}

#[tokio::test]
async fn test_share_is_scoped_to_the_senders_lobby() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut host_one = connect(&addr).await;
    let mut host_two = connect(&addr).await;
    let mut member_two = connect(&addr).await;

    let _code_one = create_lobby(&mut host_one).await;
    let code_two = create_lobby(&mut host_two).await;
    join_lobby(&mut member_two, &code_two).await;

    send_event(
        &mut member_two,
        &ClientEvent::ShareInformation("scoped".into()),
    )
    .await;

    assert_eq!(
        recv_event(&mut host_two).await,
        ServerEvent::InformationShared("scoped".into())
    );
    assert_silent(&mut host_one).await;
}

#[tokio::test]
async fn test_synchronise_lobby_reaches_peers() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut host = connect(&addr).await;
    let mut peer = connect(&addr).await;

    let code = create_lobby(&mut host).await;
    join_lobby(&mut peer, &code).await;

    send_event(
        &mut host,
        &ClientEvent::SynchroniseLobby("snapshot-v1".into()),
    )
    .await;

    assert_eq!(
        recv_event(&mut peer).await,
        ServerEvent::LobbySynchronised("snapshot-v1".into())
    );
    assert_silent(&mut host).await;
}

#[tokio::test]
async fn test_host_disconnect_closes_lobby_and_notifies_members() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut host = connect(&addr).await;
    let mut peer_a = connect(&addr).await;
    let mut peer_b = connect(&addr).await;

    let code = create_lobby(&mut host).await;
    join_lobby(&mut peer_a, &code).await;
    join_lobby(&mut peer_b, &code).await;

    host.close(None).await.expect("close should succeed");

    assert_eq!(recv_event(&mut peer_a).await, ServerEvent::LobbyClosed);
    assert_eq!(recv_event(&mut peer_b).await, ServerEvent::LobbyClosed);

    // The code is gone: rejoining reports not-found.
    let mut late = connect(&addr).await;
    send_event(&mut late, &ClientEvent::JoinLobby(code)).await;
    match recv_event(&mut late).await {
        ServerEvent::Error { code, .. } => assert_eq!(code, 404),
        other => panic!("expected error event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_member_disconnect_does_not_close_lobby() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut host = connect(&addr).await;
    let mut peer = connect(&addr).await;

    let code = create_lobby(&mut host).await;
    join_lobby(&mut peer, &code).await;

    peer.close(None).await.expect("close should succeed");
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Lobby still open: a new member can join and relay still works.
    let mut replacement = connect(&addr).await;
    join_lobby(&mut replacement, &code).await;

    send_event(
        &mut replacement,
        &ClientEvent::ShareInformation("still here".into()),
    )
    .await;
    assert_eq!(
        recv_event(&mut host).await,
        ServerEvent::InformationShared("still here".into())
    );
}

#[tokio::test]
async fn test_room_events_are_ignored_on_lobby_profile() {
    let addr = start_server(RegistryConfig::default()).await;
    let mut client = connect(&addr).await;

    send_event(&mut client, &ClientEvent::CreateRoom(String::new())).await;
    assert_silent(&mut client).await;
}

// =========================================================================
// Legacy room profile
// =========================================================================

#[tokio::test]
async fn test_room_profile_create_and_join() {
    let addr = start_server(RegistryConfig::room()).await;
    let mut creator = connect(&addr).await;
    let mut joiner = connect(&addr).await;

    send_event(&mut creator, &ClientEvent::CreateRoom(String::new())).await;
    let code = match recv_event(&mut creator).await {
        ServerEvent::RoomCreated(code) => code,
        other => panic!("expected room-created, got {other:?}"),
    };

    send_event(&mut joiner, &ClientEvent::JoinRoom(code)).await;
    match recv_event(&mut joiner).await {
        ServerEvent::RoomJoined => {}
        other => panic!("expected room-joined, got {other:?}"),
    }
}

#[tokio::test]
async fn test_room_profile_share_broadcasts_to_all_but_sender() {
    let addr = start_server(RegistryConfig::room()).await;
    let mut creator = connect(&addr).await;
    let mut bystander = connect(&addr).await;

    send_event(&mut creator, &ClientEvent::CreateRoom(String::new())).await;
    match recv_event(&mut creator).await {
        ServerEvent::RoomCreated(_) => {}
        other => panic!("expected room-created, got {other:?}"),
    }

    // The bystander is in no room, yet still receives the share: the
    // legacy profile relays globally.
    send_event(
        &mut creator,
        &ClientEvent::ShareInformation("to everyone".into()),
    )
    .await;

    assert_eq!(
        recv_event(&mut bystander).await,
        ServerEvent::InformationShared("to everyone".into())
    );
    assert_silent(&mut creator).await;
}
