use arcana_genai::{GenerationError, SourceImage};

use crate::integration::init_tracing;
use crate::utils::{MockGemini, image_response};

#[tokio::test]
async fn test_edit_image_sends_image_before_instruction() {
    init_tracing();

    let gemini = MockGemini::start().await.unwrap();
    gemini.respond_ok(image_response("RURJVEVE", Some("image/png")));

    let source = SourceImage::from_bytes(b"\x89PNG\r\n\x1a\n", "image/png");
    let edited = gemini
        .client()
        .edit_image(&source.base64, &source.mime_type, "add a halo of stars")
        .await
        .expect("edit failed");
    assert_eq!(edited.base64, "RURJVEVE");

    let requests = gemini.requests();
    let parts = requests[0].body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["inlineData"]["data"], source.base64.as_str());
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[1]["text"], "add a halo of stars");
}

#[tokio::test]
async fn test_edit_image_rejects_bad_input_locally() {
    init_tracing();

    let gemini = MockGemini::start().await.unwrap();
    let client = gemini.client();

    assert!(matches!(
        client.edit_image("***", "image/png", "x").await,
        Err(GenerationError::InvalidInput(_))
    ));
    assert!(matches!(
        client.edit_image("QUJD", "video/mp4", "x").await,
        Err(GenerationError::InvalidInput(_))
    ));
    assert!(gemini.requests().is_empty());
}
