use mineral_id::identification::{
    Channel, MatchOutcome, Observation, ObservationInput, ReferenceCatalog, ScoreResult,
    ScoringEngine, STANDARD_CHANNELS,
};
use std::path::PathBuf;

fn catalog() -> ReferenceCatalog {
    ReferenceCatalog::standard().expect("standard catalog validates")
}

fn percent_of(ranked: &[ScoreResult<'_>], name: &str) -> f64 {
    ranked
        .iter()
        .find(|result| result.name() == name)
        .map(ScoreResult::percent)
        .unwrap_or_else(|| panic!("{name} missing from ranking"))
}

fn names<'a>(ranked: &'a [ScoreResult<'_>]) -> Vec<&'a str> {
    ranked.iter().map(ScoreResult::name).collect()
}

#[test]
fn calcite_outranks_feldspar_for_fizzing_white_specimen() {
    let catalog = catalog();
    let observation = Observation::default()
        .with_colors(["white"])
        .with_streak("white")
        .with_hardness(3.0)
        .with_cleavage(["perfect rhombohedral"])
        .with_acid_reactive(true);

    let ranked = ScoringEngine::standard().rank(&observation, &catalog);

    assert_eq!(ranked[0].name(), "Calcite");
    assert_eq!(ranked[0].percent(), 100.0);
    assert!(percent_of(&ranked, "Calcite") > percent_of(&ranked, "Feldspar"));
}

#[test]
fn magnetism_singles_out_magnetite() {
    let catalog = catalog();
    let observation = Observation::default()
        .with_hardness(5.0)
        .with_magnetic(true);

    let ranked = ScoringEngine::standard().rank(&observation, &catalog);

    assert_eq!(ranked[0].name(), "Magnetite");
    assert!(ranked[0].percent() > ranked[1].percent());
}

#[test]
fn pyrite_center_hardness_earns_full_weight() {
    let catalog = catalog();
    let pyrite = catalog.get("Pyrite").expect("pyrite in catalog");
    let observation = Observation::default().with_hardness(6.25);

    let score = ScoringEngine::standard().score_one(&observation, pyrite);

    let hardness = score
        .components
        .iter()
        .find(|component| component.channel == Channel::Hardness)
        .expect("hardness evaluated");
    assert_eq!(hardness.earned, 2.5);
    assert_eq!(hardness.outcome, MatchOutcome::Full);
    assert_eq!(score.percent, 100.0);
}

#[test]
fn hardness_only_ranking_depends_only_on_hardness_channel() {
    let catalog = catalog();
    let engine = ScoringEngine::standard();
    let hardness_spec = STANDARD_CHANNELS
        .iter()
        .find(|spec| spec.channel == Channel::Hardness)
        .expect("hardness channel");

    for observed in [1.5, 3.0, 4.4, 5.0, 6.25, 7.0, 9.0] {
        let observation = Observation::default().with_hardness(observed);
        let ranked = engine.rank(&observation, &catalog);

        for result in &ranked {
            let diff = (observed - result.record.hardness.center()).abs();
            let expected = hardness_spec.credit_for(diff) * 100.0;
            assert!(
                (result.percent() - expected).abs() < 1e-9,
                "{} at hardness {observed}",
                result.name()
            );
        }
    }
}

#[test]
fn equal_scores_preserve_catalog_order() {
    let catalog = catalog();
    let observation = Observation::default().with_hardness(6.25);

    let ranked = ScoringEngine::standard().rank(&observation, &catalog);

    assert_eq!(
        names(&ranked)[..4],
        ["Feldspar", "Pyrite", "Hematite", "Magnetite"]
    );
    assert!(ranked[..4].iter().all(|result| result.percent() == 100.0));
}

#[test]
fn ranking_is_deterministic() {
    let catalog = catalog();
    let engine = ScoringEngine::standard();
    let observation = Observation::default()
        .with_colors(["black", "brassy"])
        .with_luster(["metallic"])
        .with_hardness(6.0)
        .with_density(5.2);

    let first = engine.rank(&observation, &catalog);
    let second = engine.rank(&observation, &catalog);

    assert_eq!(first, second);
}

#[test]
fn scores_stay_within_percent_bounds() {
    let catalog = catalog();
    let engine = ScoringEngine::standard();
    let observations = [
        Observation::default(),
        Observation::default().with_hardness(10.0),
        Observation::default()
            .with_colors(["white"])
            .with_streak("black")
            .with_hardness(1.0)
            .with_luster(["earthy"])
            .with_cleavage(["perfect basal"])
            .with_density(7.4)
            .with_magnetic(false)
            .with_acid_reactive(false),
    ];

    for observation in &observations {
        for result in engine.rank(observation, &catalog) {
            assert!((0.0..=100.0).contains(&result.percent()), "{}", result.name());
        }
    }
}

#[test]
fn adding_a_matching_attribute_never_lowers_a_score() {
    let catalog = catalog();
    let engine = ScoringEngine::standard();
    let base = Observation::default()
        .with_colors(["white"])
        .with_hardness(5.0);

    for record in catalog.records() {
        let before = engine.score_one(&base, record).percent;

        let with_streak = base.clone().with_streak(record.streak.clone());
        let with_density = base.clone().with_density(record.density);
        let with_acid = base.clone().with_acid_reactive(record.acid_reactive);

        for observation in [with_streak, with_density, with_acid] {
            let after = engine.score_one(&observation, record).percent;
            assert!(after >= before, "{} dropped from {before} to {after}", record.name);
        }
    }
}

#[test]
fn unknown_fields_are_neither_rewarded_nor_penalized() {
    let catalog = catalog();
    let engine = ScoringEngine::standard();
    let streak_only = Observation::default().with_streak("lead-gray");

    let ranked = engine.rank(&streak_only, &catalog);

    assert_eq!(ranked[0].name(), "Galena");
    assert_eq!(ranked[0].percent(), 100.0);
    assert!(ranked[1..].iter().all(|result| result.percent() == 0.0));
    assert_eq!(ranked[0].score.weight_total, 2.0);
}

#[test]
fn form_input_flows_through_to_a_ranking() {
    let catalog = catalog();
    let input = ObservationInput {
        color: "Steel-Gray, reddish".to_string(),
        streak: Some("reddish-brown".to_string()),
        hardness: Some(6.0),
        luster: vec!["metallic".to_string()],
        cleavage: Vec::new(),
        density: Some(0.0),
        magnetic: Some("no".to_string()),
        acid: Some("unknown".to_string()),
    };

    let observation = input.normalize(None).expect("valid form input");
    let identification = ScoringEngine::standard().identify(&observation, &catalog);
    let summary = identification.summary();

    let best = summary.best_guess.expect("best guess present");
    assert_eq!(best.name, "Hematite");
    assert_eq!(best.score_pct, 100.0);
    assert_eq!(summary.ranking.len(), catalog.len());
    assert_eq!(summary.comparison.len(), 3);
    assert!(identification.unobserved().contains(&Channel::Density));
}

#[test]
fn csv_catalog_ranks_with_the_same_engine() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/minerals.csv");
    let catalog = ReferenceCatalog::from_path(&path).expect("fixture catalog loads");
    assert_eq!(catalog.len(), 4);

    let observation = Observation::default()
        .with_hardness(4.0)
        .with_magnetic(true)
        .with_luster(["metallic"]);

    let ranked = ScoringEngine::standard().rank(&observation, &catalog);

    assert_eq!(ranked[0].name(), "Pyrrhotite");
}
