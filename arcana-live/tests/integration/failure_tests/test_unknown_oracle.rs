use arcana_core::SessionStatus;
use arcana_live::SessionError;

use crate::integration::init_tracing;
use crate::utils::SessionHarness;

#[tokio::test]
async fn test_unknown_oracle_fails_before_any_io() {
    init_tracing();

    for name in ["Unknown", "michael", "ELARA", "Josephine ", "", "Merlin"] {
        let harness = SessionHarness::new();
        let session = harness.session.clone();

        let err = session.start(name).await.unwrap_err();
        assert_eq!(err, SessionError::UnknownAvatar(name.to_string()));

        assert_eq!(harness.media.calls(), 0, "media touched for {:?}", name);
        assert_eq!(harness.api.calls(), 0, "REST called for {:?}", name);
        assert_eq!(harness.connector.calls(), 0, "socket opened for {:?}", name);
        assert_eq!(harness.peers.created(), 0, "peer created for {:?}", name);

        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(session.last_error(), Some(err));
    }
}

#[tokio::test]
async fn test_session_cannot_start_twice() {
    init_tracing();

    let harness = SessionHarness::new();
    let session = harness.session.clone();

    let _ = session.start("Nobody").await;
    let err = session.start("Michael").await.unwrap_err();
    assert_eq!(err, SessionError::AlreadyStarted);
    assert_eq!(harness.media.calls(), 0);
}
