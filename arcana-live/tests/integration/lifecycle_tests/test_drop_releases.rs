use arcana_core::SessionStatus;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{SessionHarness, expect_offer, next_relay};

#[tokio::test]
async fn test_drop_releases_resources() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let status_rx = harness.session.on_status_change();

    harness.session.start("Michael").await.unwrap();
    let mut relay = next_relay(&mut harness.relays).await.unwrap();
    expect_offer(&mut relay).await.unwrap();

    drop(harness.session);
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(!harness.media.any_track_live());
    assert!(harness.peers.log().closed);
    assert!(relay.from_session.recv().await.is_none(), "socket left open");
    assert_eq!(*status_rx.borrow(), SessionStatus::Connecting);
}
