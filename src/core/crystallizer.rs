/// Crystallizer — validates raw semantic expressions and fills defaults.

use serde_json::Value;
use tracing::{debug, warn};

use crate::schema::expression::SemanticExpression;
use crate::schema::record::{CanonicalRecord, Intent, Record, Stage, StageError};
use crate::schema::vocabulary::{Dimension, Tau, Term, Vocabulary};

/// First pipeline stage. Produces `vse` records.
#[derive(Debug, Clone, Default)]
pub struct Crystallizer {
    vocabulary: Vocabulary,
}

impl Crystallizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Validate `expression` and emit its canonical `vse` record.
    ///
    /// Present values must belong to their dimension's vocabulary; omitted
    /// ones take the registry default. An explicit `null` counts as present
    /// and is rejected. An absent intent stays absent.
    pub fn process(&self, expression: &SemanticExpression) -> Result<Record, StageError> {
        let canonical = canonicalize(expression).inspect_err(|err| {
            warn!(stage = %Stage::Vse, error = %err, "rejected semantic expression");
        })?;

        debug!(
            stage = %Stage::Vse,
            polarity = %canonical.polarity,
            deictic = %canonical.deictic,
            scope = %canonical.scope,
            certainty = %canonical.certainty,
            tau = canonical.tau.value(),
            axis = ?canonical.intent.as_ref().map(Intent::axis),
            "crystallized expression"
        );

        Ok(Record::Vse(canonical))
    }
}

fn canonicalize(expression: &SemanticExpression) -> Result<CanonicalRecord, StageError> {
    let tau = match &expression.tau {
        Some(raw) => resolve_tau(raw)?,
        None => Tau::DEFAULT,
    };

    let intent = expression.intent.as_ref().map(resolve_intent).transpose()?;

    Ok(CanonicalRecord {
        polarity: resolve_term(expression.polarity.as_ref())?,
        deictic: resolve_term(expression.deictic.as_ref())?,
        scope: resolve_term(expression.scope.as_ref())?,
        certainty: resolve_term(expression.certainty.as_ref())?,
        tau,
        intent,
    })
}

fn resolve_tau(raw: &Value) -> Result<Tau, StageError> {
    raw.as_f64()
        .and_then(|value| Tau::new(value).ok())
        .ok_or_else(|| StageError::OutOfRangeValue {
            dimension: Dimension::Tau,
            value: raw.to_string(),
        })
}

fn resolve_intent(raw: &Value) -> Result<Intent, StageError> {
    let Value::Object(fields) = raw else {
        return Err(StageError::MalformedIntent(format!(
            "expected a record with an axis, found {raw}"
        )));
    };
    match fields.get("axis") {
        Some(Value::String(axis)) => Intent::new(axis.as_str()),
        Some(other) => Err(StageError::MalformedIntent(format!(
            "axis must be a string, found {other}"
        ))),
        None => Err(StageError::MalformedIntent("missing axis".to_string())),
    }
}

fn resolve_term<T: Term>(raw: Option<&Value>) -> Result<T, StageError> {
    match raw {
        Some(Value::String(value)) => {
            T::parse(value).ok_or_else(|| StageError::InvalidDimensionValue {
                dimension: T::DIMENSION,
                value: value.clone(),
            })
        }
        Some(other) => Err(StageError::InvalidDimensionValue {
            dimension: T::DIMENSION,
            value: other.to_string(),
        }),
        None => Ok(T::DEFAULT),
    }
}
