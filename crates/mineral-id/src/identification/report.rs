use super::channels::{Channel, ChannelScore};
use super::domain::{HardnessRange, Observation};
use super::engine::ScoreResult;
use serde::Serialize;

/// Number of candidates shown side by side in the comparison view.
pub const COMPARISON_DEPTH: usize = 3;

/// Hands-on tests a collector can run to firm up an identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticalTest {
    AcidReaction,
    Magnetism,
    StreakPlate,
    MohsScratch,
    CleavageInspection,
    Heft,
}

impl PracticalTest {
    /// Pragmatic order: quickest and most decisive first.
    pub const fn ordered() -> [Self; 6] {
        [
            Self::AcidReaction,
            Self::Magnetism,
            Self::StreakPlate,
            Self::MohsScratch,
            Self::CleavageInspection,
            Self::Heft,
        ]
    }

    pub const fn channel(self) -> Channel {
        match self {
            Self::AcidReaction => Channel::AcidReactivity,
            Self::Magnetism => Channel::Magnetic,
            Self::StreakPlate => Channel::Streak,
            Self::MohsScratch => Channel::Hardness,
            Self::CleavageInspection => Channel::Cleavage,
            Self::Heft => Channel::Density,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AcidReaction => "Acid test (HCl)",
            Self::Magnetism => "Magnet test",
            Self::StreakPlate => "Streak plate",
            Self::MohsScratch => "Mohs hardness",
            Self::CleavageInspection => "Cleavage",
            Self::Heft => "Density by heft",
        }
    }

    pub const fn instruction(self) -> &'static str {
        match self {
            Self::AcidReaction => {
                "Place one or two drops of dilute HCl on the specimen; fizzing points to calcite."
            }
            Self::Magnetism => "Hold a strong magnet close; attraction points to magnetite.",
            Self::StreakPlate => {
                "Rub the specimen on unglazed porcelain; the powder color is often conclusive (hematite leaves reddish-brown)."
            }
            Self::MohsScratch => {
                "Scratch against a fingernail, copper coin, glass, and steel knife to bracket the hardness."
            }
            Self::CleavageInspection => {
                "Look for flat breakage planes: thin sheets (mica), cubes (galena, halite), rhombs (calcite)."
            }
            Self::Heft => {
                "Compare the weight in hand with a similar-sized quartz piece; unusually heavy suggests galena or metallic ores."
            }
        }
    }
}

/// Ranked result of one identification request with its presentation projections.
#[derive(Debug, Clone)]
pub struct Identification<'c> {
    results: Vec<ScoreResult<'c>>,
    unobserved: Vec<Channel>,
}

impl<'c> Identification<'c> {
    pub(crate) fn new(observation: &Observation, results: Vec<ScoreResult<'c>>) -> Self {
        let unobserved = Channel::ordered()
            .into_iter()
            .filter(|channel| !channel.is_observed(observation))
            .collect();

        Self {
            results,
            unobserved,
        }
    }

    pub fn results(&self) -> &[ScoreResult<'c>] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ScoreResult<'c>> {
        self.results
    }

    /// Channels the observation left blank, in channel order.
    pub fn unobserved(&self) -> &[Channel] {
        &self.unobserved
    }

    pub fn table(&self) -> Vec<RankingRow> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| RankingRow {
                rank: index + 1,
                name: result.record.name.clone(),
                score_pct: round_tenth(result.score.percent),
                notes: result.record.notes.clone(),
            })
            .collect()
    }

    pub fn best_guess(&self) -> Option<BestGuess> {
        self.results.first().map(|top| BestGuess {
            name: top.record.name.clone(),
            score_pct: round_tenth(top.score.percent),
            rationale: top.record.notes.clone(),
        })
    }

    /// Raw diagnostic attributes of the top `depth` candidates for manual cross-checking.
    pub fn comparison(&self, depth: usize) -> Vec<ComparisonRow> {
        self.results
            .iter()
            .take(depth)
            .map(|result| {
                let record = result.record;
                ComparisonRow {
                    name: record.name.clone(),
                    score_pct: round_tenth(result.score.percent),
                    streak: record.streak.clone(),
                    hardness: record.hardness,
                    hardness_label: record.hardness.to_string(),
                    luster: record.luster.iter().cloned().collect(),
                    cleavage: record.cleavage.iter().cloned().collect(),
                    density: record.density,
                    magnetic: record.magnetic,
                    acid_reactive: record.acid_reactive,
                }
            })
            .collect()
    }

    /// Follow-up tests for the channels that were not observed.
    pub fn suggested_tests(&self) -> Vec<SuggestedTest> {
        PracticalTest::ordered()
            .into_iter()
            .filter(|test| self.unobserved.contains(&test.channel()))
            .map(|test| SuggestedTest {
                test,
                label: test.label(),
                instruction: test.instruction(),
            })
            .collect()
    }

    pub fn breakdown(&self) -> Vec<CandidateBreakdown> {
        self.results
            .iter()
            .map(|result| CandidateBreakdown {
                name: result.record.name.clone(),
                earned: result.score.earned,
                weight_total: result.score.weight_total,
                components: result.score.components.clone(),
            })
            .collect()
    }

    pub fn summary(&self) -> IdentificationSummary {
        IdentificationSummary {
            best_guess: self.best_guess(),
            ranking: self.table(),
            comparison: self.comparison(COMPARISON_DEPTH),
            suggested_tests: self.suggested_tests(),
            breakdown: self.breakdown(),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub name: String,
    pub score_pct: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestGuess {
    pub name: String,
    pub score_pct: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub score_pct: f64,
    pub streak: String,
    pub hardness: HardnessRange,
    pub hardness_label: String,
    pub luster: Vec<String>,
    pub cleavage: Vec<String>,
    pub density: f64,
    pub magnetic: bool,
    pub acid_reactive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedTest {
    pub test: PracticalTest,
    pub label: &'static str,
    pub instruction: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateBreakdown {
    pub name: String,
    pub earned: f64,
    pub weight_total: f64,
    pub components: Vec<ChannelScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentificationSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_guess: Option<BestGuess>,
    pub ranking: Vec<RankingRow>,
    pub comparison: Vec<ComparisonRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_tests: Vec<SuggestedTest>,
    pub breakdown: Vec<CandidateBreakdown>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identification::{ReferenceCatalog, ScoringEngine};

    #[test]
    fn projections_follow_ranking_order() {
        let catalog = ReferenceCatalog::standard().expect("standard catalog");
        let observation = Observation::default()
            .with_streak("reddish-brown")
            .with_hardness(6.0)
            .with_magnetic(false);

        let identification = ScoringEngine::standard().identify(&observation, &catalog);

        let table = identification.table();
        assert_eq!(table.len(), catalog.len());
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[0].name, "Hematite");
        assert!(table.windows(2).all(|pair| pair[0].score_pct >= pair[1].score_pct));

        let best = identification.best_guess().expect("non-empty catalog");
        assert_eq!(best.name, "Hematite");
        assert!(best.rationale.contains("streak"));

        let comparison = identification.comparison(COMPARISON_DEPTH);
        assert_eq!(comparison.len(), 3);
        assert_eq!(comparison[0].streak, "reddish-brown");
        assert_eq!(comparison[0].hardness_label, "5.5 - 6.5");
    }

    #[test]
    fn suggests_only_tests_for_unobserved_channels() {
        let catalog = ReferenceCatalog::standard().expect("standard catalog");
        let observation = Observation::default()
            .with_hardness(3.0)
            .with_acid_reactive(true);

        let tests: Vec<PracticalTest> = ScoringEngine::standard()
            .identify(&observation, &catalog)
            .suggested_tests()
            .into_iter()
            .map(|suggestion| suggestion.test)
            .collect();

        assert_eq!(
            tests,
            vec![
                PracticalTest::Magnetism,
                PracticalTest::StreakPlate,
                PracticalTest::CleavageInspection,
                PracticalTest::Heft,
            ]
        );
    }

    #[test]
    fn scores_are_rounded_to_one_decimal_for_display() {
        assert_eq!(round_tenth(66.666_666), 66.7);
        assert_eq!(round_tenth(100.0), 100.0);
    }
}
