/// Stage records — the immutable values passed between pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::vocabulary::{Certainty, Deictic, Dimension, Polarity, Scope, Tau};

/// Errors raised at the boundary of a pipeline stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("invalid {dimension} value: {value:?}")]
    InvalidDimensionValue { dimension: Dimension, value: String },
    /// `value` is the offending input as written, e.g. `1.5`, `null` or `"soon"`.
    #[error("{dimension} value {value} is not a number in [0.0, 1.0]")]
    OutOfRangeValue { dimension: Dimension, value: String },
    #[error("malformed intent: {0}")]
    MalformedIntent(String),
    #[error("stage mismatch: expected a {expected} record, found {found}")]
    StageMismatch { expected: Stage, found: Stage },
}

/// The stage marker carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Vse,
    Chronocore,
    Pictogram,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vse => "vse",
            Self::Chronocore => "chronocore",
            Self::Pictogram => "pictogram",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated intent. The axis is always a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntentRepr")]
pub struct Intent {
    axis: String,
}

impl Intent {
    pub fn new(axis: impl Into<String>) -> Result<Self, StageError> {
        let axis = axis.into();
        if axis.is_empty() {
            return Err(StageError::MalformedIntent("axis is empty".to_string()));
        }
        Ok(Self { axis })
    }

    pub fn axis(&self) -> &str {
        &self.axis
    }
}

#[derive(Deserialize)]
struct IntentRepr {
    axis: String,
}

impl TryFrom<IntentRepr> for Intent {
    type Error = StageError;

    fn try_from(repr: IntentRepr) -> Result<Self, Self::Error> {
        Self::new(repr.axis)
    }
}

/// A fully populated expression. `intent` is `None` when the caller
/// supplied no intent; it is never fabricated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub polarity: Polarity,
    pub deictic: Deictic,
    pub scope: Scope,
    pub certainty: Certainty,
    pub tau: Tau,
    #[serde(default)]
    pub intent: Option<Intent>,
}

/// Whether an expression is foregrounded in the discourse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ground {
    Foreground,
    Background,
}

/// Pacing of an expression within its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Steady,
    Urgent,
}

/// Discourse sequencing descriptor attached by the narrative engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sequencing {
    /// Ordering weight in `[0.0, 1.0]`; heavier expressions sort earlier.
    pub weight: f64,
    pub breadth: u8,
    pub ground: Ground,
    pub cadence: Cadence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencedRecord {
    #[serde(flatten)]
    pub canonical: CanonicalRecord,
    pub sequencing: Sequencing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedRecord {
    #[serde(flatten)]
    pub sequenced: SequencedRecord,
    pub glyph: String,
}

/// A record produced by one of the three stages, tagged by stage.
///
/// Serializes as a flat mapping with a `"stage"` key, e.g.
/// `{"stage": "vse", "polarity": "calm", ..., "intent": {"axis": "warn"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum Record {
    Vse(CanonicalRecord),
    Chronocore(SequencedRecord),
    Pictogram(RenderedRecord),
}

impl Record {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Vse(_) => Stage::Vse,
            Self::Chronocore(_) => Stage::Chronocore,
            Self::Pictogram(_) => Stage::Pictogram,
        }
    }

    /// The canonical dimensions and intent, common to every stage.
    pub fn canonical(&self) -> &CanonicalRecord {
        match self {
            Self::Vse(canonical) => canonical,
            Self::Chronocore(sequenced) => &sequenced.canonical,
            Self::Pictogram(rendered) => &rendered.sequenced.canonical,
        }
    }

    pub fn intent(&self) -> Option<&Intent> {
        self.canonical().intent.as_ref()
    }

    pub fn sequencing(&self) -> Option<&Sequencing> {
        match self {
            Self::Vse(_) => None,
            Self::Chronocore(sequenced) => Some(&sequenced.sequencing),
            Self::Pictogram(rendered) => Some(&rendered.sequenced.sequencing),
        }
    }

    pub fn glyph(&self) -> Option<&str> {
        match self {
            Self::Pictogram(rendered) => Some(&rendered.glyph),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// A struct-shaped view of this record for formats without internally
    /// tagged enums, such as RON.
    pub fn flat(&self) -> FlatRecord<'_> {
        let canonical = self.canonical();
        FlatRecord {
            stage: self.stage(),
            polarity: canonical.polarity,
            deictic: canonical.deictic,
            scope: canonical.scope,
            certainty: canonical.certainty,
            tau: canonical.tau.value(),
            intent: canonical.intent.as_ref(),
            sequencing: self.sequencing(),
            glyph: self.glyph(),
        }
    }
}

/// Borrowed, flat rendering of a [`Record`]: the same keys as its JSON form,
/// with the stage-specific fields omitted when the stage has not set them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlatRecord<'a> {
    pub stage: Stage,
    pub polarity: Polarity,
    pub deictic: Deictic,
    pub scope: Scope,
    pub certainty: Certainty,
    pub tau: f64,
    pub intent: Option<&'a Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequencing: Option<&'a Sequencing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<&'a str>,
}
