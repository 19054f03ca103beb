use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeckType {
    #[default]
    #[serde(rename = "Rider-Waite")]
    RiderWaite,
    #[serde(rename = "Tarot de Marseille")]
    Marseille,
    #[serde(rename = "Thoth")]
    Thoth,
}

impl DeckType {
    pub const ALL: [DeckType; 3] = [DeckType::RiderWaite, DeckType::Marseille, DeckType::Thoth];

    pub fn name(self) -> &'static str {
        match self {
            DeckType::RiderWaite => "Rider-Waite",
            DeckType::Marseille => "Tarot de Marseille",
            DeckType::Thoth => "Thoth",
        }
    }

    /// Art direction for card faces of this deck.
    pub fn style_prompt(self) -> &'static str {
        match self {
            DeckType::RiderWaite => {
                "Pamela Colman Smith 1910 Rider-Waite style. Authentic watercolor and ink, thick black outlines, bold symbolic colors, parchment texture, classic occult look."
            }
            DeckType::Marseille => {
                "18th century woodcut style, Tarot de Marseille. Hand-carved aesthetic, limited palette of primary red, blue, and yellow on cream antique paper. Medieval centered composition."
            }
            DeckType::Thoth => {
                "Lady Frieda Harris Thoth style. Surreal geometric abstraction, intense color gradients, esoteric Egyptian and astrological symbols, dark and luminous atmosphere, complex layering."
            }
        }
    }
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deck '{0}' (expected rider-waite, marseille or thoth)")]
pub struct UnknownDeck(pub String);

impl FromStr for DeckType {
    type Err = UnknownDeck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "riderwaite" | "rws" => Ok(DeckType::RiderWaite),
            "marseille" | "tarotdemarseille" => Ok(DeckType::Marseille),
            "thoth" => Ok(DeckType::Thoth),
            _ => Err(UnknownDeck(s.to_string())),
        }
    }
}
