use arcana_core::SessionStatus;
use arcana_live::SessionError;

use crate::integration::init_tracing;
use crate::utils::{MockSessionApi, SessionHarness};

#[tokio::test]
async fn test_session_init_failure() {
    init_tracing();

    let harness = SessionHarness::builder()
        .api(MockSessionApi::failing(500))
        .build();
    let session = harness.session.clone();

    let err = session.start("Michael").await.unwrap_err();
    assert_eq!(err, SessionError::SessionInit(500));
    assert_eq!(
        err.user_message(),
        "Failed to initialize ritual with the oracle (500)"
    );

    assert_eq!(harness.api.calls(), 1);
    assert_eq!(harness.connector.calls(), 0, "socket must not open");
    assert_eq!(harness.peers.created(), 0);
    assert_eq!(session.status(), SessionStatus::Failed);
    assert_eq!(session.last_error(), Some(SessionError::SessionInit(500)));

    // Acquired microphone is released again
    assert_eq!(harness.media.issued().len(), 1);
    assert!(!harness.media.any_track_live());
}
