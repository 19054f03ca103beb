use arcana_core::SessionStatus;
use arcana_live::{HandshakeStage, SessionError};
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, STATUS_TIMEOUT_MS, expect_offer, next_relay, wait_for_status};

#[tokio::test]
async fn test_answer_timeout() {
    init_tracing();

    let mut harness = SessionHarness::builder()
        .answer_timeout(Duration::from_millis(200))
        .build();
    let session = harness.session.clone();

    session.start("Michael").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();

    // Relay never answers
    wait_for_status(&session, SessionStatus::Failed, STATUS_TIMEOUT_MS)
        .await
        .unwrap();
    assert_eq!(
        session.last_error(),
        Some(SessionError::Timeout(HandshakeStage::Answer))
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(harness.peers.log().closed);
    assert!(!harness.media.any_track_live());
    assert!(relay.from_session.recv().await.is_none(), "socket left open");
}
