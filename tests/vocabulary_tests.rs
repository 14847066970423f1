/// Vocabulary registry integration tests.

use esper_pipeline::core::pipeline::Pipeline;
use esper_pipeline::schema::expression::SemanticExpression;
use esper_pipeline::schema::vocabulary::{Dimension, DimensionValue, Polarity, Vocabulary};

#[test]
fn every_term_is_valid_and_every_default_is_a_term() {
    let vocab = Vocabulary::default();
    for dimension in Dimension::ALL {
        for term in dimension.terms() {
            assert!(vocab.is_valid(dimension, term), "{dimension}: {term}");
        }
        let default = vocab.default_for(dimension).to_string();
        assert!(vocab.is_valid(dimension, &default), "{dimension} default {default}");
    }
}

#[test]
fn default_for_matches_canonical_set() {
    let vocab = Vocabulary::default();
    let defaults: Vec<String> = Dimension::ALL
        .iter()
        .map(|d| vocab.default_for(*d).to_string())
        .collect();
    assert_eq!(defaults, vec!["calm", "decl", "one", "cert", "0.5"]);
    assert_eq!(
        vocab.default_for(Dimension::Polarity),
        DimensionValue::Polarity(Polarity::Calm)
    );
}

#[test]
fn crystallizer_fills_registry_defaults() {
    let pipeline = Pipeline::new();
    let record = pipeline.run(&SemanticExpression::new()).unwrap();
    let canonical = record.canonical();
    let vocab = pipeline.crystallizer().vocabulary();

    assert_eq!(
        vocab.default_for(Dimension::Polarity),
        DimensionValue::Polarity(canonical.polarity)
    );
    assert_eq!(
        vocab.default_for(Dimension::Deictic),
        DimensionValue::Deictic(canonical.deictic)
    );
    assert_eq!(
        vocab.default_for(Dimension::Scope),
        DimensionValue::Scope(canonical.scope)
    );
    assert_eq!(
        vocab.default_for(Dimension::Certainty),
        DimensionValue::Certainty(canonical.certainty)
    );
    assert_eq!(
        vocab.default_for(Dimension::Tau),
        DimensionValue::Tau(canonical.tau)
    );
}
