//! End-to-end scenarios from JSON payloads through the full pipeline.

use phala_base::{Dignity, Graha, Rashi};
use phala_facts::{
    AnalysisConfig, Diagnostic, StrengthBand, analyze, build_fact_sheet, evaluate_rules,
    parse_chart_json, parse_outline_json, validate_outline,
};

const SAMPLE: &str = include_str!("data/sample_chart.json");

fn chart(asc: i64, planets: &[(&str, i64)]) -> phala_facts::FactSheet {
    let list: Vec<String> = planets
        .iter()
        .map(|(n, s)| format!(r#"{{"name": "{n}", "sign": {s}}}"#))
        .collect();
    let json = format!(
        r#"{{"ascendant": {{"sign": {asc}}}, "planets": [{}]}}"#,
        list.join(",")
    );
    build_fact_sheet(&parse_chart_json(&json).unwrap())
        .unwrap()
        .facts
}

#[test]
fn taurus_lagna_saturn_in_aquarius_is_tenth_house() {
    let facts = chart(2, &[("Saturn", 11)]);
    assert_eq!(facts.house_of(Graha::Shani), Some(10));
}

#[test]
fn saturn_own_sign_kendra_fires_shasha() {
    let facts = chart(1, &[("Saturn", 10)]);
    let detections = evaluate_rules(&facts);
    let shasha = detections
        .iter()
        .find(|d| d.key == "shasha")
        .expect("shasha should fire");
    assert_eq!(shasha.planets, vec![Graha::Shani]);
    for factor in ["kendra=10", "dignity=Own", "planet=Saturn"] {
        assert!(shasha.factors.iter().any(|f| f == factor), "missing {factor}");
    }
}

#[test]
fn outline_crediting_shasha_to_moon_is_invalid() {
    let facts = chart(1, &[("Saturn", 10), ("Moon", 4)]);
    let outline =
        parse_outline_json(r#"{"yogas": [{"key": "shasha", "planet": "Moon"}]}"#).unwrap();
    let result = validate_outline(&facts, &outline).unwrap();
    assert!(!result.valid);
    assert!(!result.errors.is_empty());
    assert!(result.errors[0].contains("Moon"));
}

#[test]
fn viparita_fires_only_for_lordship_outside_placement() {
    // Aries lagna: Mars rules 8 and sits in 6; Jupiter rules 12 and sits in 12.
    let facts = chart(1, &[("Mars", 6), ("Jupiter", 12)]);
    let viparita: Vec<_> = evaluate_rules(&facts)
        .into_iter()
        .filter(|d| d.rule == Some("viparita_raja"))
        .collect();
    assert_eq!(viparita.len(), 1);
    assert_eq!(viparita[0].key, "viparita_raja_8_in_6");
    assert_eq!(viparita[0].planets, vec![Graha::Mangal]);
}

#[test]
fn sample_chart_facts() {
    let input = parse_chart_json(SAMPLE).unwrap();
    let build = build_fact_sheet(&input).unwrap();
    let facts = &build.facts;

    assert_eq!(facts.ascendant.sign, Rashi::Mesha);
    assert_eq!(facts.ascendant.lord, Graha::Mangal);
    assert_eq!(facts.planets.len(), 9);
    assert_eq!(facts.sign_of(Graha::Chandra), Some(Rashi::Karka));
    assert_eq!(facts.planet(Graha::Guru).map(|p| p.is_retro), Some(true));
    assert_eq!(facts.sign_of(Graha::Ketu), Some(Rashi::Vrischika));
    assert_eq!(facts.planet(Graha::Shani).map(|p| p.dignity), Some(Dignity::Own));

    let diags: Vec<&Diagnostic> = build.diagnostics.iter().collect();
    assert_eq!(diags.len(), 1);
    assert!(matches!(
        diags[0],
        Diagnostic::AmbiguousProviderHouse {
            planet: Graha::Shani,
            provider: 9,
            computed: 10
        }
    ));

    for p in &facts.planets {
        assert!((1..=12).contains(&p.house));
        assert!((1..=12).contains(&p.sign.number()));
    }
}

#[test]
fn sample_chart_pipeline() {
    let input = parse_chart_json(SAMPLE).unwrap();
    let analysis = analyze(&input, &AnalysisConfig::default()).unwrap();

    let yogas: Vec<&str> = analysis.yogas.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(
        yogas,
        vec!["shasha", "viparita_raja_8_in_6", "budhaditya", "dhana_yoga"]
    );
    assert!(analysis.doshas.is_empty());

    let sun = analysis.derived.strength(Graha::Surya).unwrap();
    assert!((sun.score - 80.0).abs() < 1e-9);

    let current = analysis.dasha.current.as_ref().unwrap();
    let chain: Vec<Graha> = current.levels().map(|v| v.planet).collect();
    assert_eq!(chain, vec![Graha::Shani, Graha::Buddh, Graha::Buddh]);
    assert_eq!(current.maha.strength_band, StrengthBand::Strong);
    assert_eq!(
        current.maha.themes,
        vec![
            "career and status",
            "lordship: career and status",
            "lordship: gains and networks"
        ]
    );
    assert_eq!(analysis.dasha.timeline.len(), 2);
    assert!(analysis.yogini.is_none());
}

#[test]
fn sample_chart_outline_round() {
    let input = parse_chart_json(SAMPLE).unwrap();
    let analysis = analyze(&input, &AnalysisConfig::default()).unwrap();

    let good = parse_outline_json(
        r#"{
            "ascendant": {"sign": "Aries", "lord": "Mars"},
            "planets": [
                {"planet": "Saturn", "sign": "Capricorn", "house": 10, "lordOf": [10, 11]},
                {"planet": "Jupiter", "house": 12, "lordOf": [12, 9]}
            ],
            "yogas": [
                {"name": "Shasha Yoga", "planet": "Saturn"},
                {"name": "Budhaditya Yoga", "planets": ["Sun", "Mercury"]},
                {"name": "Dhana Yoga"}
            ]
        }"#,
    )
    .unwrap();
    let result = analysis.validate(&good).unwrap();
    assert!(result.valid, "{:?}", result.errors);

    let bad = parse_outline_json(
        r#"{
            "planets": [{"planet": "Saturn", "house": 9}],
            "yogas": [{"name": "Gajakesari Yoga"}]
        }"#,
    )
    .unwrap();
    let result = analysis.validate(&bad).unwrap();
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn analysis_serializes_with_canonical_names() {
    let input = parse_chart_json(SAMPLE).unwrap();
    let analysis = analyze(&input, &AnalysisConfig::default()).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["facts"]["ascendant"]["sign"], 1);
    assert_eq!(json["facts"]["planets"][0]["planet"], "Sun");
    assert_eq!(json["derived"]["houses"][0]["signId"], 1);
    assert_eq!(json["dasha"]["current"]["maha"]["strengthBand"], "strong");
    assert_eq!(json["diagnostics"][0]["kind"], "ambiguousProviderHouse");
}
