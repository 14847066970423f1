/// Narrative engine — annotates canonical records with discourse sequencing.

use tracing::{debug, warn};

use crate::schema::record::{
    Cadence, CanonicalRecord, Ground, Record, SequencedRecord, Sequencing, Stage, StageError,
};
use crate::schema::vocabulary::{Deictic, Polarity};

/// Ordering weight at or above which an expression is foregrounded.
pub const FOREGROUND_THRESHOLD: f64 = 0.5;

/// Extra weight given to agitated expressions.
const AGITATION_BIAS: f64 = 0.1;

/// Second pipeline stage. Consumes `vse` records, produces `chronocore` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeEngine;

impl NarrativeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Attach a sequencing descriptor to a canonical record. The semantic
    /// payload, intent included, is carried over unchanged.
    pub fn sequence(&self, record: &Record) -> Result<Record, StageError> {
        let canonical = match record {
            Record::Vse(canonical) => canonical,
            other => {
                let err = StageError::StageMismatch {
                    expected: Stage::Vse,
                    found: other.stage(),
                };
                warn!(stage = %Stage::Chronocore, error = %err, "rejected record");
                return Err(err);
            }
        };

        let sequencing = sequencing_for(canonical);
        debug!(
            stage = %Stage::Chronocore,
            weight = sequencing.weight,
            breadth = sequencing.breadth,
            ground = ?sequencing.ground,
            cadence = ?sequencing.cadence,
            "sequenced record"
        );

        Ok(Record::Chronocore(SequencedRecord {
            canonical: canonical.clone(),
            sequencing,
        }))
    }
}

/// Compute the sequencing descriptor for a canonical record.
///
/// weight = 0.5 * confidence(certainty) + 0.5 * tau, plus a small bias for
/// agitated polarity, clamped to `[0.0, 1.0]`. Imperatives are always
/// foregrounded.
pub fn sequencing_for(canonical: &CanonicalRecord) -> Sequencing {
    let bias = match canonical.polarity {
        Polarity::Calm => 0.0,
        Polarity::Agitated => AGITATION_BIAS,
    };
    let weight = (0.5 * canonical.certainty.confidence() + 0.5 * canonical.tau.value() + bias)
        .clamp(0.0, 1.0);

    let ground = if weight >= FOREGROUND_THRESHOLD || canonical.deictic == Deictic::Imper {
        Ground::Foreground
    } else {
        Ground::Background
    };

    let cadence = match canonical.polarity {
        Polarity::Calm => Cadence::Steady,
        Polarity::Agitated => Cadence::Urgent,
    };

    Sequencing {
        weight,
        breadth: canonical.scope.breadth(),
        ground,
        cadence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::record::Intent;
    use crate::schema::vocabulary::{Certainty, Scope, Tau};

    fn canonical() -> CanonicalRecord {
        CanonicalRecord {
            polarity: Polarity::Calm,
            deictic: Deictic::Decl,
            scope: Scope::One,
            certainty: Certainty::Cert,
            tau: Tau::new(0.8).unwrap(),
            intent: Some(Intent::new("hello").unwrap()),
        }
    }

    #[test]
    fn sequence_produces_chronocore() {
        let input = Record::Vse(canonical());
        let output = NarrativeEngine::new().sequence(&input).unwrap();
        assert_eq!(output.stage(), Stage::Chronocore);
        assert_eq!(output.intent(), input.intent());
        assert_eq!(output.canonical(), input.canonical());
        assert!(output.sequencing().is_some());
    }

    #[test]
    fn sequence_rejects_wrong_stage() {
        let engine = NarrativeEngine::new();
        let sequenced = engine.sequence(&Record::Vse(canonical())).unwrap();
        assert_eq!(
            engine.sequence(&sequenced).unwrap_err(),
            StageError::StageMismatch {
                expected: Stage::Vse,
                found: Stage::Chronocore,
            }
        );
    }

    #[test]
    fn certain_late_expression_is_foregrounded() {
        let seq = sequencing_for(&canonical());
        assert!((seq.weight - 0.9).abs() < 1e-9);
        assert_eq!(seq.ground, Ground::Foreground);
        assert_eq!(seq.cadence, Cadence::Steady);
        assert_eq!(seq.breadth, 1);
    }

    #[test]
    fn hypothetical_early_expression_is_backgrounded() {
        let seq = sequencing_for(&CanonicalRecord {
            certainty: Certainty::Hypo,
            tau: Tau::new(0.0).unwrap(),
            scope: Scope::All,
            ..canonical()
        });
        assert!((seq.weight - 0.15).abs() < 1e-9);
        assert_eq!(seq.ground, Ground::Background);
        assert_eq!(seq.breadth, 3);
    }

    #[test]
    fn imperatives_are_always_foregrounded() {
        let seq = sequencing_for(&CanonicalRecord {
            deictic: Deictic::Imper,
            certainty: Certainty::Hypo,
            tau: Tau::new(0.0).unwrap(),
            ..canonical()
        });
        assert_eq!(seq.ground, Ground::Foreground);
    }

    #[test]
    fn agitation_raises_weight_and_is_clamped() {
        let seq = sequencing_for(&CanonicalRecord {
            polarity: Polarity::Agitated,
            tau: Tau::new(1.0).unwrap(),
            ..canonical()
        });
        assert_eq!(seq.weight, 1.0);
        assert_eq!(seq.cadence, Cadence::Urgent);
    }
}
