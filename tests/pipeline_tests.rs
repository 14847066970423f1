/// Pipeline integration tests — end-to-end expression-to-glyph rendering.

use esper_pipeline::core::compositor::Compositor;
use esper_pipeline::core::crystallizer::Crystallizer;
use esper_pipeline::core::narrative::NarrativeEngine;
use esper_pipeline::core::pipeline::{load_expressions, Pipeline};
use esper_pipeline::schema::expression::SemanticExpression;
use esper_pipeline::schema::record::{Stage, StageError};
use std::path::Path;

#[test]
fn full_pipeline_hello() {
    let expr = SemanticExpression::new()
        .with_polarity("calm")
        .with_deictic("decl")
        .with_scope("one")
        .with_certainty("cert")
        .with_tau(0.8)
        .with_intent("hello");

    let vse = Crystallizer::default().process(&expr).unwrap();
    assert_eq!(vse.stage(), Stage::Vse);

    let cc = NarrativeEngine::new().sequence(&vse).unwrap();
    assert_eq!(cc.stage(), Stage::Chronocore);

    let pg = Compositor::new().render(&cc).unwrap();
    assert_eq!(pg.stage(), Stage::Pictogram);
    assert!(pg.glyph().is_some());
    assert_eq!(pg.glyph(), Some("[HELLO-Glyph]"));
}

#[test]
fn intent_propagation_warn() {
    let expr = Crystallizer::default()
        .process(&SemanticExpression::new().with_intent("warn"))
        .unwrap();
    let cc = NarrativeEngine::new().sequence(&expr).unwrap();
    let pg = Compositor::new().render(&cc).unwrap();

    assert_eq!(pg.glyph(), Some("[WARN-Glyph]"));
    assert_eq!(expr.intent(), cc.intent());
    assert_eq!(cc.intent(), pg.intent());
}

#[test]
fn omitted_intent_renders_fallback() {
    let record = Pipeline::default().run(&SemanticExpression::new()).unwrap();
    assert_eq!(record.glyph(), Some("[Glyph]"));
    assert!(record.intent().is_none());
}

#[test]
fn empty_axis_is_malformed() {
    let err = Pipeline::default()
        .run(&SemanticExpression::new().with_intent(""))
        .unwrap_err();
    assert!(matches!(err, StageError::MalformedIntent(_)));
}

#[test]
fn render_on_vse_record_is_stage_mismatch() {
    let vse = Crystallizer::default()
        .process(&SemanticExpression::new().with_intent("warn"))
        .unwrap();
    let err = Compositor::new().render(&vse).unwrap_err();
    assert_eq!(
        err,
        StageError::StageMismatch {
            expected: Stage::Chronocore,
            found: Stage::Vse,
        }
    );
}

#[test]
fn tau_boundaries() {
    let pipeline = Pipeline::default();
    for tau in [0.0, 1.0] {
        assert!(pipeline.run(&SemanticExpression::new().with_tau(tau)).is_ok());
    }
    for tau in [1.01, -0.1] {
        assert!(matches!(
            pipeline.run(&SemanticExpression::new().with_tau(tau)),
            Err(StageError::OutOfRangeValue { .. })
        ));
    }
}

#[test]
fn json_fixture_round_trip_through_pipeline() {
    let expressions = load_expressions(Path::new("tests/fixtures/hello.json")).unwrap();
    assert_eq!(expressions.len(), 1);

    let record = Pipeline::default().run(&expressions[0]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
    assert_eq!(json["stage"], "pictogram");
    assert_eq!(json["glyph"], "[HELLO-Glyph]");
    assert_eq!(json["intent"]["axis"], "hello");
    assert_eq!(json["tau"], 0.8);
    assert!(json["sequencing"]["weight"].is_number());
}

#[test]
fn batch_fixture() {
    let expressions = load_expressions(Path::new("tests/fixtures/batch.json")).unwrap();
    let records = Pipeline::default().run_all(&expressions).unwrap();
    let glyphs: Vec<_> = records.iter().map(|r| r.glyph().unwrap()).collect();
    assert_eq!(glyphs, vec!["[WARN-Glyph]", "[HALT-Glyph]", "[Glyph]"]);
}

#[test]
fn ron_fixture() {
    let expressions = load_expressions(Path::new("tests/fixtures/warn.ron")).unwrap();
    let record = Pipeline::default().run(&expressions[0]).unwrap();
    assert_eq!(record.glyph(), Some("[WARN-Glyph]"));
}

#[test]
fn explicit_defaults_match_omitted_fields() {
    let pipeline = Pipeline::new();
    let explicit = SemanticExpression::from_json(
        r#"{"polarity": "calm", "deictic": "decl", "scope": "one", "certainty": "cert", "tau": 0.5, "intent": {"axis": "warn"}}"#,
    )
    .unwrap();
    let omitted = SemanticExpression::from_json(r#"{"intent": {"axis": "warn"}}"#).unwrap();
    assert_eq!(pipeline.run(&explicit).unwrap(), pipeline.run(&omitted).unwrap());
}

#[test]
fn malformed_fixture_fails_at_the_crystallizer() {
    let expressions = load_expressions(Path::new("tests/fixtures/malformed.json")).unwrap();
    assert_eq!(expressions.len(), 6);

    let pipeline = Pipeline::new();
    assert_eq!(
        pipeline.run(&expressions[0]).unwrap().glyph(),
        Some("[WARN-Glyph]")
    );
    for expr in &expressions[1..4] {
        assert!(
            matches!(pipeline.run(expr), Err(StageError::MalformedIntent(_))),
            "{expr:?}"
        );
    }
    for expr in &expressions[4..] {
        assert!(
            matches!(pipeline.run(expr), Err(StageError::OutOfRangeValue { .. })),
            "{expr:?}"
        );
    }
}

#[test]
fn null_intent_never_renders_fallback_glyph() {
    let expr = SemanticExpression::from_json(r#"{"intent": null}"#).unwrap();
    let err = Pipeline::new().run(&expr).unwrap_err();
    assert!(matches!(err, StageError::MalformedIntent(_)));
}
