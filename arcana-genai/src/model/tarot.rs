use crate::error::GenerationError;
use crate::model::DeckType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Paints card faces. `GenerativeClient` is the production artist.
#[async_trait]
pub trait CardArtist: Send + Sync {
    /// Returns the base64 encoded card face.
    async fn card_art(&self, card_name: &str, deck: DeckType) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarotCard {
    pub name: String,
    pub interpretation: String,
    pub position_name: String,
    #[serde(default)]
    pub is_revealed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
    #[serde(default)]
    pub is_generating_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TarotReading {
    pub cards: Vec<TarotCard>,
    pub overall_interpretation: String,
    pub deck_type: DeckType,
}

impl TarotReading {
    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_revealed).count()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.cards.iter().all(|card| card.is_revealed)
    }

    /// Turns card `index` face up, painting its art first.
    ///
    /// Returns `Ok(false)` without doing anything when the index is out of
    /// range or the card is already revealed or being painted. A failed
    /// painting only clears that card's generating flag; the rest of the
    /// reading is untouched.
    pub async fn reveal_card(
        &mut self,
        index: usize,
        artist: &dyn CardArtist,
    ) -> Result<bool, GenerationError> {
        let deck = self.deck_type;
        let Some(card) = self.cards.get_mut(index) else {
            return Ok(false);
        };
        if card.is_revealed || card.is_generating_image {
            return Ok(false);
        }

        card.is_generating_image = true;
        let result = artist.card_art(&card.name, deck).await;
        card.is_generating_image = false;

        match result {
            Ok(art) => {
                info!("Revealed {} ({})", card.name, card.position_name);
                card.base64_image = Some(art);
                card.is_revealed = true;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to paint {}: {}", card.name, e);
                Err(e)
            }
        }
    }
}
