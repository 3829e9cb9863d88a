use super::catalog::ReferenceCatalog;
use super::channels::{ChannelScore, ChannelSpec, STANDARD_CHANNELS};
use super::domain::{Observation, ReferenceRecord};
use super::report::Identification;
use serde::Serialize;
use tracing::debug;

/// Stateless scorer that compares one observation against every catalog record.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    channels: Vec<ChannelSpec>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringEngine {
    pub fn standard() -> Self {
        Self::with_channels(STANDARD_CHANNELS.to_vec())
    }

    pub fn with_channels(channels: Vec<ChannelSpec>) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> &[ChannelSpec] {
        &self.channels
    }

    /// Percent match of a single record; only observed channels enter the denominator.
    pub fn score_one(&self, observation: &Observation, record: &ReferenceRecord) -> RecordScore {
        let components: Vec<ChannelScore> = self
            .channels
            .iter()
            .filter_map(|spec| spec.evaluate(observation, record))
            .collect();

        let earned: f64 = components.iter().map(|component| component.earned).sum();
        let weight_total: f64 = components.iter().map(|component| component.weight).sum();
        let percent = if weight_total > 0.0 {
            (earned / weight_total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        RecordScore {
            percent,
            earned,
            weight_total,
            components,
        }
    }

    /// Scores every record and orders them by descending percent.
    ///
    /// The sort is stable, so equal scores keep catalog order.
    pub fn rank<'c>(
        &self,
        observation: &Observation,
        catalog: &'c ReferenceCatalog,
    ) -> Vec<ScoreResult<'c>> {
        let mut results: Vec<ScoreResult<'c>> = catalog
            .records()
            .iter()
            .map(|record| ScoreResult {
                record,
                score: self.score_one(observation, record),
            })
            .collect();

        results.sort_by(|a, b| b.score.percent.total_cmp(&a.score.percent));

        if let Some(top) = results.first() {
            debug!(
                candidates = results.len(),
                top = %top.record.name,
                percent = top.score.percent,
                "ranked reference catalog"
            );
        }

        results
    }

    /// Ranks the catalog and wraps the result with the projections the presentation layer reads.
    pub fn identify<'c>(
        &self,
        observation: &Observation,
        catalog: &'c ReferenceCatalog,
    ) -> Identification<'c> {
        Identification::new(observation, self.rank(observation, catalog))
    }
}

/// Score of one record with its per-channel audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordScore {
    pub percent: f64,
    pub earned: f64,
    pub weight_total: f64,
    pub components: Vec<ChannelScore>,
}

/// Entry of a ranked list, borrowing the record from the catalog it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult<'c> {
    pub record: &'c ReferenceRecord,
    pub score: RecordScore,
}

impl ScoreResult<'_> {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn percent(&self) -> f64 {
        self.score.percent
    }

    pub fn notes(&self) -> &str {
        &self.record.notes
    }
}
