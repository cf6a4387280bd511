use adoption_match::catalog::ViewCounts;
use adoption_match::record::{DesiredFilters, Record, RecordId};
use adoption_match::scoring::{
    base_score, closeness, completeness, exploration_bonus, location_match, status_score,
    BaseScorer, LocationMatch, ScoringProfile, StandardBaseScorer,
};
use adoption_match::types::Effect;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn sizes() -> Vec<String> {
    ScoringProfile::v0().size_order
}

#[test]
fn status_scores() {
    assert_eq!(status_score(Some("Available")), 1.0);
    assert_eq!(status_score(Some("PENDING")), 0.5);
    assert_eq!(status_score(Some("Adopted")), 0.25);
    assert_eq!(status_score(Some("")), 0.25);
    assert_eq!(status_score(None), 0.25);
}

#[test]
fn closeness_follows_category_distance() {
    let order = sizes();
    assert_eq!(closeness(Some("M"), Some("M"), &order), Some(1.0));
    assert_eq!(closeness(Some("M"), Some("L"), &order), Some(0.7));
    assert_eq!(closeness(Some("L"), Some("M"), &order), Some(0.7));
    assert_eq!(closeness(Some("S"), Some("L"), &order), Some(0.4));
    assert_eq!(closeness(Some("Giant"), Some("M"), &order), Some(0.4));
    assert_eq!(closeness(None, Some("M"), &order), None);
    assert_eq!(closeness(Some("M"), None, &order), None);
    assert_eq!(closeness(Some(""), Some("M"), &order), None);
}

#[test]
fn status_alone_when_nothing_else_applies() {
    let record = Record::new("a").with("status", "Available");
    let base = base_score(&record, &DesiredFilters::new(), false, &ScoringProfile::v0());

    assert_eq!(base.score, 1.0);
    assert_eq!(base.reasons.len(), 1);
    assert_eq!(base.reasons[0].field, "status");
    assert_eq!(base.reasons[0].effect, Effect::Base);
    assert_eq!(base.reasons[0].message, "status score 1.00");
}

#[test]
fn special_needs_pulls_the_mean_down_unless_opted_in() {
    let record = Record::new("a")
        .with("status", "Available")
        .with("special_needs", true);
    let profile = ScoringProfile::v0();

    let penalized = base_score(&record, &DesiredFilters::new(), false, &profile);
    assert!(approx(penalized.score, 0.8));
    assert_eq!(penalized.reasons[1].message, "needs special care");

    let opted_in = base_score(&record, &DesiredFilters::new(), true, &profile);
    assert_eq!(opted_in.score, 1.0);

    let known_false = Record::new("b")
        .with("status", "Available")
        .with("special_needs", false);
    let base = base_score(&known_false, &DesiredFilters::new(), false, &profile);
    assert_eq!(base.score, 1.0);
}

#[test]
fn location_tiers() {
    let desired = DesiredFilters::new()
        .with("location_label", "Brooklyn")
        .with("location_state", "NY");

    let exact = Record::new("a").with("location_label", "brooklyn");
    let region = Record::new("b")
        .with("location_label", "Queens")
        .with("location_state", "ny");
    let far = Record::new("c")
        .with("location_label", "Hoboken")
        .with("location_state", "NJ");
    let unknown = Record::new("d");

    assert_eq!(location_match(&exact, &desired), Some(LocationMatch::Exact));
    assert_eq!(location_match(&region, &desired), Some(LocationMatch::SameRegion));
    assert_eq!(location_match(&far, &desired), Some(LocationMatch::Different));
    assert_eq!(location_match(&unknown, &desired), Some(LocationMatch::Different));
    assert_eq!(location_match(&exact, &DesiredFilters::new()), None);

    let base = base_score(
        &far.clone().with("status", "Available"),
        &desired,
        false,
        &ScoringProfile::v0(),
    );
    assert!(approx(base.score, 0.7));
    assert_eq!(base.reasons[1].message, "different location");
}

#[test]
fn size_and_age_closeness_join_the_mean() {
    let desired = DesiredFilters::new()
        .with("size", "M")
        .with("age_group", "Adult");
    let record = Record::new("a")
        .with("status", "Available")
        .with("size", "L")
        .with("age_group", "Senior");

    let base = base_score(&record, &desired, false, &ScoringProfile::v0());

    assert!(approx(base.score, (1.0 + 0.7 + 0.7) / 3.0));
    let messages: Vec<&str> = base.reasons.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["status score 1.00", "size closeness 0.70", "age closeness 0.70"]
    );
}

#[test]
fn missing_record_category_is_skipped() {
    let desired = DesiredFilters::new().with("size", "M");
    let record = Record::new("a").with("status", "Pending");

    let base = base_score(&record, &desired, false, &ScoringProfile::v0());

    assert_eq!(base.score, 0.5);
    assert_eq!(base.reasons.len(), 1);
}

#[test]
fn standard_scorer_matches_free_function() {
    let desired = DesiredFilters::new().with("size", "S");
    let record = Record::new("a")
        .with("status", "Pending")
        .with("size", "XS")
        .with("special_needs", true);
    let profile = ScoringProfile::v0();

    let via_trait = StandardBaseScorer.score(&record, &desired, false, &profile);
    let direct = base_score(&record, &desired, false, &profile);
    assert_eq!(via_trait, direct);
}

#[test]
fn completeness_is_bounded_and_monotone() {
    let profile = ScoringProfile::v0();
    let fields = profile.completeness_fields.clone();

    let mut record = Record::new("a").with("name", "Biscuit");
    let mut previous = completeness(&record, &profile);
    assert_eq!(previous, 0.0, "untracked fields do not count");

    for field in &fields {
        record = record.with(field.as_str(), false);
        let current = completeness(&record, &profile);
        assert!((0.0..=1.0).contains(&current));
        assert!(current > previous, "adding {field} must raise completeness");
        previous = current;
    }

    assert_eq!(previous, 1.0);
}

#[test]
fn completeness_with_custom_profile() {
    let profile = ScoringProfile {
        completeness_fields: vec!["size".into(), "status".into()],
        ..ScoringProfile::v0()
    };
    let record = Record::new("a").with("size", "M");
    assert_eq!(completeness(&record, &profile), 0.5);

    let empty = ScoringProfile {
        completeness_fields: Vec::new(),
        ..ScoringProfile::v0()
    };
    assert_eq!(completeness(&record, &empty), 1.0);
}

#[test]
fn exploration_bonus_decays_with_views() {
    let id = RecordId::from("a");
    let k = 0.1;

    assert!(approx(exploration_bonus(&id, &ViewCounts::new(), k), 0.1));

    let three: ViewCounts = [("a", 3_u64)].into_iter().collect();
    assert!(approx(exploration_bonus(&id, &three, k), 0.05));

    let mut previous = f64::INFINITY;
    for seen in 0..50_u64 {
        let views: ViewCounts = [("a", seen)].into_iter().collect();
        let bonus = exploration_bonus(&id, &views, k);
        assert!(bonus > 0.0);
        assert!(bonus < previous, "bonus must fall as views rise");
        previous = bonus;
    }
}

#[test]
fn exploration_bonus_ignores_other_records() {
    let views: ViewCounts = [("b", 99_u64)].into_iter().collect();
    assert!(approx(exploration_bonus(&RecordId::from("a"), &views, 0.2), 0.2));
}
