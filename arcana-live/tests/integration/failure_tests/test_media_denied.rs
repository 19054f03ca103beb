use arcana_core::SessionStatus;
use arcana_live::SessionError;

use crate::integration::init_tracing;
use crate::utils::{MockMediaSource, SessionHarness};

#[tokio::test]
async fn test_media_denied() {
    init_tracing();

    let harness = SessionHarness::builder()
        .media(MockMediaSource::denied())
        .build();
    let session = harness.session.clone();

    let err = session.start("Elara").await.unwrap_err();
    assert!(matches!(err, SessionError::MediaAcquisition(_)));

    assert_eq!(harness.media.calls(), 1);
    assert_eq!(harness.api.calls(), 0);
    assert_eq!(harness.connector.calls(), 0);
    assert_eq!(session.status(), SessionStatus::Failed);
    assert!(matches!(
        session.last_error(),
        Some(SessionError::MediaAcquisition(_))
    ));
    assert!(session.toggle_mute().is_none());
}
