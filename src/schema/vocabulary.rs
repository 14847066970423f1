/// Vocabulary registry — closed term sets and defaults for every semantic dimension.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A named semantic dimension of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Polarity,
    Deictic,
    Scope,
    Certainty,
    Tau,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Self::Polarity,
        Self::Deictic,
        Self::Scope,
        Self::Certainty,
        Self::Tau,
    ];

    /// The field name used for this dimension in raw expressions.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Polarity => "polarity",
            Self::Deictic => "deictic",
            Self::Scope => "scope",
            Self::Certainty => "certainty",
            Self::Tau => "tau",
        }
    }

    /// The legal terms of an enumerated dimension. Empty for `Tau`,
    /// which is a real-valued range rather than a closed set.
    pub fn terms(&self) -> Vec<&'static str> {
        match self {
            Self::Polarity => term_names::<Polarity>(),
            Self::Deictic => term_names::<Deictic>(),
            Self::Scope => term_names::<Scope>(),
            Self::Certainty => term_names::<Certainty>(),
            Self::Tau => Vec::new(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A term from one of the closed enumerated dimensions.
pub trait Term: Copy + Sized + 'static {
    const DIMENSION: Dimension;
    const ALL: &'static [Self];
    /// Substituted when the dimension is omitted.
    const DEFAULT: Self;

    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive lookup of a term by its wire name.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|term| term.as_str() == value)
    }
}

fn term_names<T: Term>() -> Vec<&'static str> {
    T::ALL.iter().map(Term::as_str).collect()
}

/// Emotional charge of an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Calm,
    Agitated,
}

impl Term for Polarity {
    const DIMENSION: Dimension = Dimension::Polarity;
    const DEFAULT: Self = Self::Calm;
    const ALL: &'static [Self] = &[Self::Calm, Self::Agitated];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Agitated => "agitated",
        }
    }
}

/// Speech-act mood: declarative, interrogative, or imperative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deictic {
    Decl,
    Inter,
    Imper,
}

impl Term for Deictic {
    const DIMENSION: Dimension = Dimension::Deictic;
    const DEFAULT: Self = Self::Decl;
    const ALL: &'static [Self] = &[Self::Decl, Self::Inter, Self::Imper];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Decl => "decl",
            Self::Inter => "inter",
            Self::Imper => "imper",
        }
    }
}

/// How many referents the expression covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    One,
    Many,
    All,
}

impl Scope {
    /// Scope-breadth marker: 1 for one, 2 for many, 3 for all.
    pub fn breadth(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Many => 2,
            Self::All => 3,
        }
    }
}

impl Term for Scope {
    const DIMENSION: Dimension = Dimension::Scope;
    const DEFAULT: Self = Self::One;
    const ALL: &'static [Self] = &[Self::One, Self::Many, Self::All];

    fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Many => "many",
            Self::All => "all",
        }
    }
}

/// Epistemic stance: certain, unsure, or hypothetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Certainty {
    Cert,
    Unsure,
    Hypo,
}

impl Certainty {
    /// Confidence contributed to the ordering weight.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Cert => 1.0,
            Self::Unsure => 0.6,
            Self::Hypo => 0.3,
        }
    }
}

impl Term for Certainty {
    const DIMENSION: Dimension = Dimension::Certainty;
    const DEFAULT: Self = Self::Cert;
    const ALL: &'static [Self] = &[Self::Cert, Self::Unsure, Self::Hypo];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Cert => "cert",
            Self::Unsure => "unsure",
            Self::Hypo => "hypo",
        }
    }
}

macro_rules! display_as_term {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_term!(Polarity, Deictic, Scope, Certainty);

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("tau {0} is outside [0.0, 1.0]")]
pub struct TauOutOfRange(pub f64);

/// Temporal position of an expression, a real number in `[0.0, 1.0]`.
///
/// NaN and infinities are rejected along with finite values outside the
/// range, so a constructed `Tau` is always comparable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tau(f64);

impl Tau {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;
    pub const DEFAULT: Tau = Tau(0.5);

    pub fn new(value: f64) -> Result<Self, TauOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TauOutOfRange(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Tau {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Tau {
    type Error = TauOutOfRange;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tau> for f64 {
    fn from(tau: Tau) -> f64 {
        tau.0
    }
}

impl fmt::Display for Tau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single value of any dimension, as returned by [`Vocabulary::default_for`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionValue {
    Polarity(Polarity),
    Deictic(Deictic),
    Scope(Scope),
    Certainty(Certainty),
    Tau(Tau),
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polarity(v) => fmt::Display::fmt(v, f),
            Self::Deictic(v) => fmt::Display::fmt(v, f),
            Self::Scope(v) => fmt::Display::fmt(v, f),
            Self::Certainty(v) => fmt::Display::fmt(v, f),
            Self::Tau(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// The vocabulary registry: the closed term sets and the fixed defaults
/// substituted for omitted dimensions (calm, decl, one, cert, 0.5).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vocabulary;

impl Vocabulary {
    pub fn new() -> Self {
        Self
    }

    /// The value substituted when `dimension` is omitted.
    pub fn default_for(&self, dimension: Dimension) -> DimensionValue {
        match dimension {
            Dimension::Polarity => DimensionValue::Polarity(Polarity::DEFAULT),
            Dimension::Deictic => DimensionValue::Deictic(Deictic::DEFAULT),
            Dimension::Scope => DimensionValue::Scope(Scope::DEFAULT),
            Dimension::Certainty => DimensionValue::Certainty(Certainty::DEFAULT),
            Dimension::Tau => DimensionValue::Tau(Tau::DEFAULT),
        }
    }

    /// Whether `value` is legal for `dimension`. Tau values are parsed as
    /// real numbers and range-checked.
    pub fn is_valid(&self, dimension: Dimension, value: &str) -> bool {
        match dimension {
            Dimension::Polarity => Polarity::parse(value).is_some(),
            Dimension::Deictic => Deictic::parse(value).is_some(),
            Dimension::Scope => Scope::parse(value).is_some(),
            Dimension::Certainty => Certainty::parse(value).is_some(),
            Dimension::Tau => value
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|v| Tau::new(v).ok())
                .is_some(),
        }
    }
}
