use arcana_core::{Oracle, SessionStatus, SignalMessage};
use arcana_live::MediaKind;

use crate::integration::init_tracing;
use crate::utils::{
    MOCK_OFFER, MOCK_TOKEN, STATUS_TIMEOUT_MS, SessionHarness, expect_offer, next_relay,
    wait_for_status,
};

#[tokio::test]
async fn test_oracle_connects() {
    init_tracing();

    let mut harness = SessionHarness::new();
    let session = harness.session.clone();
    let mut remote_rx = session.on_remote_stream();

    session.start("Michael").await.expect("start failed");
    assert_eq!(session.status(), SessionStatus::Connecting);

    // REST call carried Michael's face id, socket opened with the token
    let michael = Oracle::resolve("Michael").unwrap();
    assert_eq!(harness.api.face_ids(), vec![michael.face_id()]);
    assert_eq!(harness.connector.tokens(), vec![MOCK_TOKEN.to_string()]);

    let mut relay = next_relay(&mut harness.relays).await.expect("no socket");
    let offer = expect_offer(&mut relay).await.expect("no offer");
    assert_eq!(offer, MOCK_OFFER);
    assert_eq!(harness.peers.log().tracks, vec!["mock-audio".to_string()]);

    // Still waiting on the answer
    assert_eq!(session.status(), SessionStatus::Connecting);

    relay.send(SignalMessage::SdpAnswer {
        sdp: "v=0 answer".to_string(),
    });
    wait_for_status(&session, SessionStatus::Connected, STATUS_TIMEOUT_MS)
        .await
        .expect("never connected");
    assert_eq!(harness.peers.log().answers, vec!["v=0 answer".to_string()]);

    // Remote avatar stream attaches
    let remote = tokio::time::timeout(
        std::time::Duration::from_millis(STATUS_TIMEOUT_MS),
        remote_rx.wait_for(|stream| stream.is_some()),
    )
    .await
    .expect("no remote stream")
    .expect("remote channel closed")
    .clone()
    .unwrap();
    assert_eq!(remote.kind, MediaKind::Video);

    assert!(session.last_error().is_none());

    session.stop().await;
    assert_eq!(session.status(), SessionStatus::Closed);
}
