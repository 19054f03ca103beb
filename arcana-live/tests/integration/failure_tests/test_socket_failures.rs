use arcana_core::{SessionStatus, SignalMessage};
use arcana_live::SessionError;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{
    REJECTED_ANSWER, STATUS_TIMEOUT_MS, SessionHarness, expect_offer, next_relay,
    wait_for_status,
};

#[tokio::test]
async fn test_socket_error_before_answer_fails() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let session = harness.session.clone();

    session.start("Elara").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();

    relay.fail("connection reset");
    wait_for_status(&session, SessionStatus::Failed, STATUS_TIMEOUT_MS)
        .await
        .unwrap();
    assert_eq!(
        session.last_error(),
        Some(SessionError::Signaling("connection reset".to_string()))
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(harness.peers.log().closed);
}

#[tokio::test]
async fn test_socket_closed_before_answer_fails() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let session = harness.session.clone();

    session.start("Elara").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();

    relay.close();
    wait_for_status(&session, SessionStatus::Failed, STATUS_TIMEOUT_MS)
        .await
        .unwrap();
    assert!(matches!(
        session.last_error(),
        Some(SessionError::Signaling(_))
    ));
}

#[tokio::test]
async fn test_socket_error_after_connect_keeps_session() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let session = harness.session.clone();

    session.start("Michael").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();
    relay.send(SignalMessage::SdpAnswer {
        sdp: "v=0".to_string(),
    });
    wait_for_status(&session, SessionStatus::Connected, STATUS_TIMEOUT_MS)
        .await
        .unwrap();

    relay.fail("relay went away");
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Media flows peer to peer; only the error is recorded
    assert_eq!(session.status(), SessionStatus::Connected);
    assert_eq!(
        session.last_error(),
        Some(SessionError::Signaling("relay went away".to_string()))
    );
    assert!(!harness.peers.log().closed);

    session.stop().await;
    assert!(harness.peers.log().closed);
}

#[tokio::test]
async fn test_unusable_answer_fails() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let session = harness.session.clone();

    session.start("Josephine").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();

    relay.send(SignalMessage::SdpAnswer {
        sdp: REJECTED_ANSWER.to_string(),
    });
    wait_for_status(&session, SessionStatus::Failed, STATUS_TIMEOUT_MS)
        .await
        .unwrap();
    assert!(matches!(session.last_error(), Some(SessionError::Peer(_))));
}
