use adoption_match::catalog::ViewCounts;
use adoption_match::preference::Preference;
use adoption_match::record::{DesiredFilters, Record};
use adoption_match::selection::{rank, RankConfig};
use adoption_match::types::{
    Effect, RankQuery, RankingMetadata, RankingResult, Reason, ScoredCandidate, Section,
};

fn strip(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn golden_candidate_serialization() {
    let candidate = ScoredCandidate {
        id: "muddy_paws:42".to_string(),
        source_id: "muddy_paws".to_string(),
        section: Section::Explore,
        base_score: 0.75,
        pref_score: 0.5,
        core_score: 1.25,
        exploration_bonus: 0.05,
        final_score: 1.3,
        completeness: 0.5,
        reasons: vec![
            Reason::new("good_with_kids", Effect::Match, "good_with_kids matched"),
            Reason::new("status", Effect::Base, "status score 1.00"),
            Reason::new("explore_slot", Effect::Explore, "Shown in Explore to surface lower-info animals"),
        ],
        record: Record::new("muddy_paws:42")
            .with("source_id", "muddy_paws")
            .with("status", "Available")
            .with("good_with_kids", true),
    };
    let result = RankingResult {
        candidates: vec![candidate],
        ranking: RankingMetadata {
            config_version: "sha256:mock".to_string(),
            top_n: 14,
            records_considered: 20,
            records_dropped: 3,
            records_capped: 0,
            best_selected: 8,
            explore_selected: 6,
            explore_from_fallback: 1,
        },
    };

    let json_str = serde_json::to_string_pretty(&result).unwrap();

    let candidates_pos = json_str.find("\"candidates\":").expect("Missing candidates key");
    let ranking_pos = json_str.find("\"ranking\":").expect("Missing ranking key");
    assert!(candidates_pos < ranking_pos, "candidates should appear before ranking metadata");

    const EXPECTED_JSON: &str = r#"{
      "candidates": [
        {
          "id": "muddy_paws:42",
          "source_id": "muddy_paws",
          "section": "explore",
          "base_score": 0.75,
          "pref_score": 0.5,
          "core_score": 1.25,
          "exploration_bonus": 0.05,
          "final_score": 1.3,
          "completeness": 0.5,
          "reasons": [
            {"field": "good_with_kids", "effect": "match", "message": "good_with_kids matched"},
            {"field": "status", "effect": "base", "message": "status score 1.00"},
            {"field": "explore_slot", "effect": "explore", "message": "Shown in Explore to surface lower-info animals"}
          ],
          "record": {
            "id": "muddy_paws:42",
            "good_with_kids": true,
            "source_id": "muddy_paws",
            "status": "Available"
          }
        }
      ],
      "ranking": {
        "config_version": "sha256:mock",
        "top_n": 14,
        "records_considered": 20,
        "records_dropped": 3,
        "records_capped": 0,
        "best_selected": 8,
        "explore_selected": 6,
        "explore_from_fallback": 1
      }
    }"#;

    assert_eq!(strip(&json_str), strip(EXPECTED_JSON), "JSON structure mismatch against golden snapshot");

    let roundtrip: RankingResult = serde_json::from_str(&json_str).expect("Deserialization failed");
    assert_eq!(roundtrip, result);
}

#[test]
fn golden_end_to_end_ranking() {
    let records = vec![
        Record::new("a").with("status", "Available").with("good_with_kids", true),
        Record::new("b").with("status", "Pending").with("good_with_kids", false),
        Record::new("c").with("status", "Available").with("special_needs", true),
    ];
    let query = RankQuery::new(vec![Preference::must("good_with_kids")], DesiredFilters::new());
    let views: ViewCounts = [("c", 3_u64)].into_iter().collect();
    let config = RankConfig::v0().with_top_n(2).with_exploration_slots(1);

    let result = rank(&records, &query, &views, config).unwrap();
    let json = serde_json::to_string_pretty(&result.candidates).unwrap();

    let expected = r#"[
      {
        "id": "a",
        "source_id": "unknown",
        "section": "best",
        "base_score": 1.0,
        "pref_score": 1.0,
        "core_score": 2.0,
        "exploration_bonus": 0.1,
        "final_score": 2.1,
        "completeness": 0.15384615384615385,
        "reasons": [
          {"field": "good_with_kids", "effect": "match", "message": "good_with_kids matched"},
          {"field": "status", "effect": "base", "message": "status score 1.00"}
        ],
        "record": {"id": "a", "good_with_kids": true, "status": "Available"}
      },
      {
        "id": "c",
        "source_id": "unknown",
        "section": "explore",
        "base_score": 0.8,
        "pref_score": 0.0,
        "core_score": 0.8,
        "exploration_bonus": 0.05,
        "final_score": 0.8500000000000001,
        "completeness": 0.15384615384615385,
        "reasons": [
          {"field": "good_with_kids", "effect": "neutral", "message": "good_with_kids unknown"},
          {"field": "status", "effect": "base", "message": "status score 1.00"},
          {"field": "special_needs", "effect": "base", "message": "needs special care"},
          {"field": "explore_slot", "effect": "explore", "message": "Shown in Explore to surface lower-info animals"}
        ],
        "record": {"id": "c", "special_needs": true, "status": "Available"}
      }
    ]"#;

    assert_eq!(strip(&json), strip(expected), "Golden snapshot mismatch");
}

#[test]
fn attribute_nulls_are_dropped_and_other_shapes_survive() {
    let raw = r#"{
        "id": "wagtopia:7",
        "name": "Pickles",
        "good_with_cats": null,
        "energy_level": 4,
        "weight_lbs": 37.5,
        "photos": ["https://example.org/1.jpg"],
        "house_trained": false
    }"#;

    let record: Record = serde_json::from_str(raw).unwrap();

    assert!(!record.is_present("good_with_cats"));
    assert!(record.is_present("house_trained"));
    assert_eq!(record.get("house_trained").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("Pickles"));
    assert_eq!(record.get("energy_level").map(|v| v.match_key()), Some("4".to_string()));
    assert_eq!(record.get("weight_lbs").map(|v| v.match_key()), Some("37.5".to_string()));
    assert!(record.get("photos").is_some());
    assert_eq!(record.source_id(), "unknown");

    let back = serde_json::to_value(&record).unwrap();
    assert!(back.get("good_with_cats").is_none());
    assert_eq!(back["photos"][0], "https://example.org/1.jpg");
}
