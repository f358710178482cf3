//! Tooth positions and clinical status categories
//!
//! Positions follow the two-digit FDI notation: the first digit is the
//! quadrant (1-4 permanent, 5-8 primary), the second the tooth within the
//! quadrant (1-8 permanent, 1-5 primary). The dentition of a tooth is
//! derived from its position only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DentalError;

/// Permanent or primary (deciduous) teeth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dentition {
    Permanent,
    Primary,
}

impl Dentition {
    /// Number of canonical positions in this dentition
    #[must_use]
    pub const fn tooth_count(self) -> usize {
        match self {
            Self::Permanent => 32,
            Self::Primary => 20,
        }
    }
}

impl fmt::Display for Dentition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent => write!(f, "permanent"),
            Self::Primary => write!(f, "primary"),
        }
    }
}

/// A validated two-digit tooth position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothPosition(u8);

impl ToothPosition {
    /// Create a position, rejecting anything outside the canonical ranges
    pub fn new(value: u8) -> Result<Self, DentalError> {
        if Self::dentition_of(value).is_some() {
            Ok(Self(value))
        } else {
            Err(DentalError::InvalidToothPosition(value.to_string()))
        }
    }

    fn dentition_of(value: u8) -> Option<Dentition> {
        let quadrant = value / 10;
        let tooth = value % 10;
        match (quadrant, tooth) {
            (1..=4, 1..=8) => Some(Dentition::Permanent),
            (5..=8, 1..=5) => Some(Dentition::Primary),
            _ => None,
        }
    }

    /// Dentition this position belongs to
    #[must_use]
    pub fn dentition(self) -> Dentition {
        // Construction guarantees a canonical position
        Self::dentition_of(self.0).unwrap_or(Dentition::Permanent)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Quadrant digit (1-8)
    #[must_use]
    pub const fn quadrant(self) -> u8 {
        self.0 / 10
    }

    /// All 32 permanent positions in quadrant order
    pub fn permanent() -> impl Iterator<Item = Self> {
        (1..=4u8).flat_map(|q| (1..=8u8).map(move |t| Self(q * 10 + t)))
    }

    /// All 20 primary positions in quadrant order
    pub fn primary() -> impl Iterator<Item = Self> {
        (5..=8u8).flat_map(|q| (1..=5u8).map(move |t| Self(q * 10 + t)))
    }
}

impl TryFrom<u8> for ToothPosition {
    type Error = DentalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToothPosition> for u8 {
    fn from(position: ToothPosition) -> Self {
        position.0
    }
}

impl FromStr for ToothPosition {
    type Err = DentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 2 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DentalError::InvalidToothPosition(s.to_string()));
        }
        let value: u8 = trimmed
            .parse()
            .map_err(|_| DentalError::InvalidToothPosition(s.to_string()))?;
        Self::new(value).map_err(|_| DentalError::InvalidToothPosition(s.to_string()))
    }
}

impl fmt::Display for ToothPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status categories for permanent teeth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PermanentStatus {
    Healthy,
    Decayed,
    FilledWithDecay,
    FilledWithoutDecay,
    MissingDueToDecay,
    MissingOther,
    Sealant,
    Prosthesis,
    Unerupted,
    Other,
}

/// Status categories for primary teeth
///
/// There is no "missing for other reasons" category: every extracted
/// primary tooth is attributed to decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimaryStatus {
    Healthy,
    Decayed,
    FilledWithDecay,
    FilledWithoutDecay,
    ExtractedDueToDecay,
}

/// Classified status of a single tooth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "dentition", content = "status", rename_all = "lowercase")]
pub enum ToothStatus {
    Permanent(PermanentStatus),
    Primary(PrimaryStatus),
    /// Code not found in the table for its dentition
    Other(Dentition),
    /// No code was recorded for this position
    NotRecorded,
}

impl ToothStatus {
    /// Whether a code was recorded and recognised for this tooth
    #[must_use]
    pub const fn is_classified(self) -> bool {
        matches!(self, Self::Permanent(_) | Self::Primary(_))
    }
}
