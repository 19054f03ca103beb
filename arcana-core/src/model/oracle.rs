use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Vendor-side avatar identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceId(String);

impl FaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Oracle {
    pub name: &'static str,
    pub face_id: &'static str,
}

pub const ORACLES: &[Oracle] = &[
    Oracle {
        name: "Michael",
        face_id: "ae5658d5-cadd-4f9f-97a7-534e06f8c701",
    },
    Oracle {
        name: "Elara",
        face_id: "6de27680-7eb0-4f9c-8968-07612c155624",
    },
    Oracle {
        name: "Josephine",
        face_id: "a4952804-da9c-4dc0-89c0-881da0525a6f",
    },
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown oracle '{0}'")]
pub struct UnknownOracle(pub String);

impl Oracle {
    /// Exact, case-sensitive lookup. Names outside the table fail closed.
    pub fn resolve(name: &str) -> Result<&'static Oracle, UnknownOracle> {
        ORACLES
            .iter()
            .find(|oracle| oracle.name == name)
            .ok_or_else(|| UnknownOracle(name.to_string()))
    }

    pub fn face_id(&self) -> FaceId {
        FaceId::new(self.face_id)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        ORACLES.iter().map(|oracle| oracle.name)
    }
}
