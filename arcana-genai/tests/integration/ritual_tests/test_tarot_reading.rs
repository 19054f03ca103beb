use arcana_genai::{DeckType, GenerationError, READING_FAILED};
use axum::http::StatusCode;
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{MockGemini, image_response, json_response, spread_json, text_response};

#[tokio::test]
async fn test_reading_then_reveal_with_isolated_failure() {
    init_tracing();

    let gemini = MockGemini::start().await.unwrap();
    gemini
        .respond_ok(json_response(&spread_json()))
        .respond_ok(image_response("UHJpZXN0ZXNz", Some("image/png")))
        .respond(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "overloaded" }))
        .respond_ok(image_response("U3Vu", Some("image/png")));
    let client = gemini.client();

    let mut reading = client
        .generate_tarot_reading("Past, Present, Future", 3, DeckType::Marseille)
        .await
        .expect("reading failed");
    assert_eq!(reading.deck_type, DeckType::Marseille);
    assert_eq!(reading.cards.len(), 3);
    assert!(reading.cards.iter().all(|card| !card.is_revealed));
    assert_eq!(reading.cards[1].position_name, "Present");

    assert!(reading.reveal_card(0, &client).await.unwrap());
    assert_eq!(reading.cards[0].base64_image.as_deref(), Some("UHJpZXN0ZXNz"));

    let err = reading.reveal_card(1, &client).await.unwrap_err();
    assert!(matches!(err, GenerationError::Status { status: 500, .. }));
    assert!(!reading.cards[1].is_revealed);
    assert!(!reading.cards[1].is_generating_image);

    assert!(reading.reveal_card(2, &client).await.unwrap());
    assert_eq!(reading.revealed_count(), 2);

    let requests = gemini.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests[0].prompt().contains("\"Tarot de Marseille\" deck"));
    assert!(requests[1].prompt().contains("\"The High Priestess\""));
    assert!(requests[1].prompt().contains("woodcut"));
    assert_eq!(
        requests[1].body["generationConfig"]["imageConfig"]["aspectRatio"],
        "9:16"
    );
}

#[tokio::test]
async fn test_garbled_reading_maps_to_reading_error() {
    init_tracing();

    let gemini = MockGemini::start().await.unwrap();
    gemini
        .respond_ok(text_response("The cards scattered on the floor."))
        .respond_ok(json_response(&json!({ "cards": [] })));
    let client = gemini.client();

    for _ in 0..2 {
        let err = client
            .generate_tarot_reading("Single card", 1, DeckType::RiderWaite)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Reading(_)));
        assert_eq!(err.user_message(), READING_FAILED);
    }
}

#[tokio::test]
async fn test_spread_size_is_checked_locally() {
    init_tracing();

    let gemini = MockGemini::start().await.unwrap();
    let client = gemini.client();

    for count in [0, 23] {
        assert!(matches!(
            client
                .generate_tarot_reading("Impossible", count, DeckType::Thoth)
                .await,
            Err(GenerationError::InvalidInput(_))
        ));
    }
    assert!(gemini.requests().is_empty());
}
