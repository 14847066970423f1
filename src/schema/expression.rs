use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A caller-supplied semantic expression.
///
/// Each field holds the value exactly as supplied: `None` means the key
/// was omitted, while an explicit `null` is kept as `Some(Value::Null)` so
/// the crystallizer can reject it instead of mistaking it for an omission.
/// Shape and vocabulary checks happen in the crystallizer, so a bad value
/// surfaces as a stage error rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SemanticExpression {
    #[serde(default, deserialize_with = "present")]
    pub polarity: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub deictic: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub scope: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub certainty: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub tau: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub intent: Option<Value>,
}

/// Any value under a present key, `null` included, becomes `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SemanticExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_polarity(mut self, polarity: impl Into<String>) -> Self {
        self.polarity = Some(Value::String(polarity.into()));
        self
    }

    pub fn with_deictic(mut self, deictic: impl Into<String>) -> Self {
        self.deictic = Some(Value::String(deictic.into()));
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(Value::String(scope.into()));
        self
    }

    pub fn with_certainty(mut self, certainty: impl Into<String>) -> Self {
        self.certainty = Some(Value::String(certainty.into()));
        self
    }

    /// Non-finite values have no JSON number form and are stored as `null`,
    /// which the crystallizer rejects as out of range.
    pub fn with_tau(mut self, tau: f64) -> Self {
        self.tau = Some(Value::from(tau));
        self
    }

    /// Attach an intent record with the given axis.
    pub fn with_intent(mut self, axis: impl Into<String>) -> Self {
        self.intent = Some(serde_json::json!({ "axis": axis.into() }));
        self
    }

    /// Attach an arbitrary intent value, including malformed ones.
    pub fn with_intent_value(mut self, intent: Value) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Parse a RON expression. `Some(..)` wrappers are optional and
    /// `None` is an explicit null.
    pub fn from_ron(input: &str) -> Result<Self, ron::error::SpannedError> {
        ron_options().from_str(input)
    }
}

/// RON options for expression files: `Option` fields may be written
/// without the `Some(..)` wrapper.
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}
