//! WASM bindings for esper-pipeline — JSON in, JSON out.

use wasm_bindgen::prelude::*;

use esper_pipeline::core::compositor::Compositor;
use esper_pipeline::core::crystallizer::Crystallizer;
use esper_pipeline::core::narrative::NarrativeEngine;
use esper_pipeline::core::pipeline::Pipeline;
use esper_pipeline::schema::expression::SemanticExpression;
use esper_pipeline::schema::record::Record;
use esper_pipeline::schema::vocabulary::{Dimension, Vocabulary};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct DimensionInfo {
    name: &'static str,
    terms: Vec<&'static str>,
    default: String,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_expression(expression_json: &str) -> Result<SemanticExpression, JsError> {
    SemanticExpression::from_json(expression_json)
        .map_err(|e| JsError::new(&format!("Invalid expression JSON: {e}")))
}

fn parse_record(record_json: &str) -> Result<Record, JsError> {
    Record::from_json(record_json).map_err(|e| JsError::new(&format!("Invalid record JSON: {e}")))
}

fn to_json(record: &Record) -> Result<String, JsError> {
    record
        .to_json()
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// Exported stage operations
// ---------------------------------------------------------------------------

/// Crystallize a raw expression into a `vse` record.
#[wasm_bindgen]
pub fn crystallize(expression_json: &str) -> Result<String, JsError> {
    let expression = parse_expression(expression_json)?;
    let record = Crystallizer::default()
        .process(&expression)
        .map_err(|e| JsError::new(&format!("Crystallizer error: {e}")))?;
    to_json(&record)
}

/// Sequence a `vse` record into a `chronocore` record.
#[wasm_bindgen]
pub fn sequence(record_json: &str) -> Result<String, JsError> {
    let record = parse_record(record_json)?;
    let sequenced = NarrativeEngine::new()
        .sequence(&record)
        .map_err(|e| JsError::new(&format!("Narrative engine error: {e}")))?;
    to_json(&sequenced)
}

/// Render a `chronocore` record into a `pictogram` record.
#[wasm_bindgen]
pub fn render(record_json: &str) -> Result<String, JsError> {
    let record = parse_record(record_json)?;
    let rendered = Compositor::new()
        .render(&record)
        .map_err(|e| JsError::new(&format!("Compositor error: {e}")))?;
    to_json(&rendered)
}

/// Run all three stages on a raw expression.
#[wasm_bindgen]
pub fn run_pipeline(expression_json: &str) -> Result<String, JsError> {
    let expression = parse_expression(expression_json)?;
    let rendered = Pipeline::default()
        .run(&expression)
        .map_err(|e| JsError::new(&format!("Pipeline error: {e}")))?;
    to_json(&rendered)
}

/// The legal terms and defaults of every dimension, as JSON.
#[wasm_bindgen]
pub fn vocabulary() -> String {
    let vocab = Vocabulary::default();
    let info: Vec<DimensionInfo> = Dimension::ALL
        .iter()
        .map(|dimension| DimensionInfo {
            name: dimension.name(),
            terms: dimension.terms(),
            default: vocab.default_for(*dimension).to_string(),
        })
        .collect();
    serde_json::to_string(&info).unwrap_or_else(|_| "[]".to_string())
}
