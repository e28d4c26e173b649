//! Domain types for the case file registry
//!
//! Defines case records, their enumerated markings, and the fixed-shape
//! alignment score attached to each case.

pub mod cases;

pub use cases::*;

use serde::{Deserialize, Serialize};

/// Clearance marking on a case file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    TopSecret,
    Classified,
    Confidential,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::TopSecret => write!(f, "TOP SECRET"),
            Classification::Classified => write!(f, "CLASSIFIED"),
            Classification::Confidential => write!(f, "CONFIDENTIAL"),
        }
    }
}

/// Lifecycle status of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    Active,
    UnderReview,
    Completed,
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::Active => write!(f, "ACTIVE"),
            CaseStatus::UnderReview => write!(f, "UNDER REVIEW"),
            CaseStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Overall standards-alignment verdict for a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    High,
    Partial,
    Low,
}

impl Alignment {
    pub fn symbol(&self) -> &'static str {
        match self {
            Alignment::High => "✓",
            Alignment::Partial => "▲",
            Alignment::Low => "✗",
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::High => write!(f, "HIGH"),
            Alignment::Partial => write!(f, "PARTIAL"),
            Alignment::Low => write!(f, "LOW"),
        }
    }
}

/// Per-rubric alignment scores, each in 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentScore {
    pub focus: u8,
    pub methodology: u8,
    pub analysis: u8,
    pub conclusions: u8,
    pub gaps: u8,
}

impl AlignmentScore {
    /// Rubric labels, in chart order
    pub const LABELS: [&'static str; 5] =
        ["Focus", "Methodology", "Analysis", "Conclusions", "Gap ID"];

    /// Field values in the same order as [`Self::LABELS`]
    pub fn as_array(&self) -> [u8; 5] {
        [
            self.focus,
            self.methodology,
            self.analysis,
            self.conclusions,
            self.gaps,
        ]
    }
}
