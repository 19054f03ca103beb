//! The oracle's generative rituals: card art, tarot readings and soulmate
//! profiles.

use crate::client::GenerativeClient;
use crate::error::GenerationError;
use crate::model::{
    CardArtist, DeckType, SoulmateDetails, SoulmateProfile, SoulmateReading, TarotCard,
    TarotReading,
};
use crate::wire::{GenerateContentRequest, GenerationConfig};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

pub const CARD_ASPECT_RATIO: &str = "9:16";

/// The Major Arcana has 22 cards and every card in a spread is unique.
pub const MAX_SPREAD_CARDS: usize = 22;

pub const READING_FAILED: &str = "The ethereal connection was lost. Please re-initiate the ritual.";
pub const SOULMATE_FAILED: &str = "The stars are currently clouded. Please try again later.";

pub fn card_art_prompt(card_name: &str, deck: DeckType) -> String {
    format!(
        "A vertical tarot card face showing the full figure of \"{}\". {} The image must be a full-bleed illustration that fills the entire frame. No borders, no frames, no text on the image itself. High fidelity, masterpiece quality.",
        card_name,
        deck.style_prompt()
    )
}

pub fn tarot_prompt(spread: &str, card_count: usize, deck: DeckType) -> String {
    format!(
        "Perform a professional and mystical tarot reading for the spread type: \"{spread}\" using the \"{deck}\" deck tradition. \
         Select {card_count} unique cards from the Major Arcana. Provide a deep interpretation for each card and its specific position in the spread, \
         specifically reflecting the symbology of the {deck} tradition. \
         Finally, provide a holistic overall interpretation of the combined energies."
    )
}

pub fn soulmate_prompt(details: &SoulmateDetails) -> String {
    format!(
        "Generate a highly detailed and mystical soulmate destiny profile in English. \
         The user was born on {} in {} at {}. They are looking for a {}. \
         Use professional astrological and esoteric language.",
        details.dob, details.pob, details.tob, details.preference
    )
}

pub fn portrait_prompt(visual_description: &str) -> String {
    format!(
        "A hyper-realistic, ethereal charcoal and gold-leaf sketch of the soulmate: {}. High-end mystical portrait, cinematic lighting, celestial background.",
        visual_description
    )
}

pub fn tarot_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "cards": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "interpretation": { "type": "STRING" },
                        "positionName": {
                            "type": "STRING",
                            "description": "The name of the position (e.g., Past, Present, Future)"
                        }
                    },
                    "required": ["name", "interpretation", "positionName"]
                }
            },
            "overallInterpretation": { "type": "STRING" }
        },
        "required": ["cards", "overallInterpretation"]
    })
}

const SOULMATE_FIELDS: [(&str, &str); 15] = [
    ("initials", "Initials of the soulmate's name"),
    ("zodiac", "Astrological sign and traits"),
    ("aura", "Description of their aura and energy"),
    ("personality", "Deep personality traits"),
    ("spiritualAlignment", "Their spiritual connection and energy"),
    ("spiritAnimal", "Their spirit animal and what it reveals"),
    ("career", "Their profession and ambition"),
    ("mission", "Their life purpose and impact"),
    ("timingLocation", "When and where you will meet"),
    ("meetingDetails", "Small details of the first encounter"),
    ("pastLife", "Their connection to you in previous incarnations"),
    ("tarotCompatibility", "A tarot reading for your compatibility"),
    ("spiritualSymbols", "Signs from the universe to look for"),
    ("conclusion", "A final encouraging spiritual message"),
    (
        "visualDescription",
        "A short prompt for an image generator to draw this person's portrait",
    ),
];

pub fn soulmate_schema() -> Value {
    let properties: serde_json::Map<String, Value> = SOULMATE_FIELDS
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                json!({ "type": "STRING", "description": description }),
            )
        })
        .collect();
    let required: Vec<&str> = SOULMATE_FIELDS.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawnCard {
    name: String,
    interpretation: String,
    position_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawnSpread {
    cards: Vec<DrawnCard>,
    overall_interpretation: String,
}

impl GenerativeClient {
    /// Paints one card face in the deck's style. Returns base64 image data.
    pub async fn generate_card_art(
        &self,
        card_name: &str,
        deck: DeckType,
    ) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::text(&card_art_prompt(card_name, deck))
            .with_config(GenerationConfig::aspect_ratio(CARD_ASPECT_RATIO));
        Ok(self.image_request(request).await?.base64)
    }

    /// Draws `card_count` Major Arcana cards for `spread`. All cards come
    /// back face down.
    pub async fn generate_tarot_reading(
        &self,
        spread: &str,
        card_count: usize,
        deck: DeckType,
    ) -> Result<TarotReading, GenerationError> {
        if card_count == 0 || card_count > MAX_SPREAD_CARDS {
            return Err(GenerationError::InvalidInput(format!(
                "a spread holds 1 to {} cards, got {}",
                MAX_SPREAD_CARDS, card_count
            )));
        }

        let spread_result: Result<DrawnSpread, _> = self
            .generate_structured(&tarot_prompt(spread, card_count, deck), tarot_schema())
            .await;
        let drawn = spread_result.map_err(|e| {
            error!("Tarot reading failed: {}", e);
            GenerationError::Reading(READING_FAILED.to_string())
        })?;

        info!("Drew {} card(s) for {}", drawn.cards.len(), spread);
        Ok(TarotReading {
            cards: drawn
                .cards
                .into_iter()
                .map(|card| TarotCard {
                    name: card.name,
                    interpretation: card.interpretation,
                    position_name: card.position_name,
                    is_revealed: false,
                    base64_image: None,
                    is_generating_image: false,
                })
                .collect(),
            overall_interpretation: drawn.overall_interpretation,
            deck_type: deck,
        })
    }

    /// Casts the soulmate reading, then draws the portrait it describes.
    pub async fn generate_soulmate_profile(
        &self,
        details: &SoulmateDetails,
    ) -> Result<SoulmateProfile, GenerationError> {
        let reading: SoulmateReading = self
            .generate_structured(&soulmate_prompt(details), soulmate_schema())
            .await
            .inspect_err(|e| error!("Soulmate reading failed: {}", e))?;

        let portrait = self
            .generate_image(&portrait_prompt(&reading.visual_description))
            .await
            .inspect_err(|e| error!("Soulmate portrait failed: {}", e))?;

        Ok(SoulmateProfile::from_reading(reading, portrait))
    }
}

#[async_trait]
impl CardArtist for GenerativeClient {
    async fn card_art(&self, card_name: &str, deck: DeckType) -> Result<String, GenerationError> {
        self.generate_card_art(card_name, deck).await
    }
}
