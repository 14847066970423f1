/// Compositor — renders sequenced records into glyphs.

use tracing::{debug, warn};

use crate::schema::record::{Intent, Record, RenderedRecord, Stage, StageError};

/// Glyph emitted when a record carries no intent.
pub const FALLBACK_GLYPH: &str = "[Glyph]";

/// Format the glyph for an intent: `"[" + AXIS + "-Glyph]"`, or the
/// fallback when there is no intent.
pub fn glyph_for(intent: Option<&Intent>) -> String {
    match intent {
        Some(intent) => format!("[{}-Glyph]", intent.axis().to_uppercase()),
        None => FALLBACK_GLYPH.to_string(),
    }
}

/// Final pipeline stage. Consumes `chronocore` records, produces `pictogram` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, record: &Record) -> Result<Record, StageError> {
        let sequenced = match record {
            Record::Chronocore(sequenced) => sequenced,
            other => {
                let err = StageError::StageMismatch {
                    expected: Stage::Chronocore,
                    found: other.stage(),
                };
                warn!(stage = %Stage::Pictogram, error = %err, "rejected record");
                return Err(err);
            }
        };

        let glyph = glyph_for(sequenced.canonical.intent.as_ref());
        debug!(stage = %Stage::Pictogram, glyph = %glyph, "rendered glyph");

        Ok(Record::Pictogram(RenderedRecord {
            sequenced: sequenced.clone(),
            glyph,
        }))
    }
}
