/// The glyph pipeline: Expression → vse → chronocore → pictogram.
///
/// Threads a raw expression through the crystallizer, the narrative
/// engine, and the compositor in that fixed order. The stages themselves
/// never call each other; this is the caller that wires them.

use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::core::compositor::Compositor;
use crate::core::crystallizer::Crystallizer;
use crate::core::narrative::NarrativeEngine;
use crate::schema::expression::SemanticExpression;
use crate::schema::record::{Record, StageError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("stage error: {0}")]
    Stage(#[from] StageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonOutput(#[from] ron::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every intermediate record produced for one expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub canonical: Record,
    pub sequenced: Record,
    pub rendered: Record,
}

impl Trace {
    /// The three records in stage order.
    pub fn records(&self) -> [&Record; 3] {
        [&self.canonical, &self.sequenced, &self.rendered]
    }
}

/// The three stages, wired in order.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    crystallizer: Crystallizer,
    narrative: NarrativeEngine,
    compositor: Compositor,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            crystallizer: Crystallizer::new(),
            narrative: NarrativeEngine::new(),
            compositor: Compositor::new(),
        }
    }

    pub fn crystallizer(&self) -> &Crystallizer {
        &self.crystallizer
    }

    pub fn narrative(&self) -> &NarrativeEngine {
        &self.narrative
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Run one expression through all three stages and return the
    /// rendered `pictogram` record.
    pub fn run(&self, expression: &SemanticExpression) -> Result<Record, StageError> {
        let canonical = self.crystallizer.process(expression)?;
        let sequenced = self.narrative.sequence(&canonical)?;
        self.compositor.render(&sequenced)
    }

    /// Run a batch, stopping at the first failing expression.
    pub fn run_all(&self, expressions: &[SemanticExpression]) -> Result<Vec<Record>, StageError> {
        let records = expressions
            .iter()
            .map(|expression| self.run(expression))
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = records.len(), "rendered batch");
        Ok(records)
    }

    /// Like `run`, but keeps every intermediate record.
    pub fn trace(&self, expression: &SemanticExpression) -> Result<Trace, StageError> {
        let canonical = self.crystallizer.process(expression)?;
        let sequenced = self.narrative.sequence(&canonical)?;
        let rendered = self.compositor.render(&sequenced)?;
        Ok(Trace {
            canonical,
            sequenced,
            rendered,
        })
    }
}

/// Load expressions from a file. `.ron` files hold a single expression;
/// anything else is read as JSON holding one expression or an array.
pub fn load_expressions(path: &Path) -> Result<Vec<SemanticExpression>, PipelineError> {
    let contents = std::fs::read_to_string(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("ron") {
        return Ok(vec![SemanticExpression::from_ron(&contents)?]);
    }
    parse_json_expressions(&contents)
}

/// Parse one JSON expression or a JSON array of expressions.
pub fn parse_json_expressions(input: &str) -> Result<Vec<SemanticExpression>, PipelineError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let expressions = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(expressions)
}
