use crate::model::GeneratedImage;
use serde::{Deserialize, Serialize};

/// Birth data the soulmate reading is cast from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoulmateDetails {
    /// Date of birth.
    pub dob: String,
    /// Place of birth.
    pub pob: String,
    /// Time of birth.
    pub tob: String,
    /// Who the seeker is looking for.
    pub preference: String,
}

/// Text half of the profile as the model returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoulmateReading {
    pub initials: String,
    pub zodiac: String,
    pub aura: String,
    pub personality: String,
    pub spiritual_alignment: String,
    pub spirit_animal: String,
    pub career: String,
    pub mission: String,
    pub timing_location: String,
    pub meeting_details: String,
    pub past_life: String,
    pub tarot_compatibility: String,
    pub spiritual_symbols: String,
    pub conclusion: String,
    /// Prompt for the portrait; not part of the final profile.
    pub visual_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoulmateProfile {
    pub image: GeneratedImage,
    pub initials: String,
    pub zodiac: String,
    pub aura: String,
    pub personality: String,
    pub spiritual_alignment: String,
    pub spirit_animal: String,
    pub career: String,
    pub mission: String,
    pub timing_location: String,
    pub meeting_details: String,
    pub past_life: String,
    pub tarot_compatibility: String,
    pub spiritual_symbols: String,
    pub conclusion: String,
}

impl SoulmateProfile {
    pub fn from_reading(reading: SoulmateReading, image: GeneratedImage) -> Self {
        Self {
            image,
            initials: reading.initials,
            zodiac: reading.zodiac,
            aura: reading.aura,
            personality: reading.personality,
            spiritual_alignment: reading.spiritual_alignment,
            spirit_animal: reading.spirit_animal,
            career: reading.career,
            mission: reading.mission,
            timing_location: reading.timing_location,
            meeting_details: reading.meeting_details,
            past_life: reading.past_life,
            tarot_compatibility: reading.tarot_compatibility,
            spiritual_symbols: reading.spiritual_symbols,
            conclusion: reading.conclusion,
        }
    }

    /// Labelled sections in display order.
    pub fn sections(&self) -> [(&'static str, &str); 13] {
        [
            ("Zodiac", self.zodiac.as_str()),
            ("Aura", self.aura.as_str()),
            ("Personality", self.personality.as_str()),
            ("Spiritual Alignment", self.spiritual_alignment.as_str()),
            ("Spirit Animal", self.spirit_animal.as_str()),
            ("Career", self.career.as_str()),
            ("Mission", self.mission.as_str()),
            ("Timing & Location", self.timing_location.as_str()),
            ("The Meeting", self.meeting_details.as_str()),
            ("Past Life", self.past_life.as_str()),
            ("Tarot Compatibility", self.tarot_compatibility.as_str()),
            ("Signs to Watch For", self.spiritual_symbols.as_str()),
            ("Conclusion", self.conclusion.as_str()),
        ]
    }
}
