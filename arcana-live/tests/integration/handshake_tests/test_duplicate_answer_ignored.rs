use arcana_core::{SessionStatus, SignalMessage};
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, STATUS_TIMEOUT_MS, expect_offer, next_relay, wait_for_status};

#[tokio::test]
async fn test_duplicate_answer_ignored() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let session = harness.session.clone();

    session.start("Michael").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();

    relay.send(SignalMessage::SdpAnswer {
        sdp: "first".to_string(),
    });
    wait_for_status(&session, SessionStatus::Connected, STATUS_TIMEOUT_MS)
        .await
        .unwrap();

    relay.send(SignalMessage::SdpAnswer {
        sdp: "second".to_string(),
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(harness.peers.log().answers, vec!["first".to_string()]);
    assert_eq!(session.status(), SessionStatus::Connected);
    assert!(session.last_error().is_none());

    session.stop().await;
}
