//! Declarative table of the attribute channels used to compare an observation
//! with a reference record.
//!
//! Every channel reduces its comparison to a distance. Categorical channels
//! report `0.0` on a match and infinity otherwise; numeric channels report the
//! absolute difference. The channel's tolerance bands then map that distance to
//! the share of its weight that is earned.

use super::domain::{Observation, ReferenceRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Slack applied to band limits so decimal thresholds such as `0.1` stay inclusive.
const BAND_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Color,
    Streak,
    Hardness,
    Luster,
    Cleavage,
    Density,
    Magnetic,
    AcidReactivity,
}

impl Channel {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Color,
            Self::Streak,
            Self::Hardness,
            Self::Luster,
            Self::Cleavage,
            Self::Density,
            Self::Magnetic,
            Self::AcidReactivity,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Streak => "Streak",
            Self::Hardness => "Hardness",
            Self::Luster => "Luster",
            Self::Cleavage => "Cleavage",
            Self::Density => "Density",
            Self::Magnetic => "Magnetic",
            Self::AcidReactivity => "Acid reactivity",
        }
    }

    /// Whether the observation carries a value for this channel.
    pub fn is_observed(self, observation: &Observation) -> bool {
        match self {
            Self::Color => !observation.colors.is_empty(),
            Self::Streak => observation.streak.is_some(),
            Self::Hardness => observation.hardness.is_some(),
            Self::Luster => !observation.luster.is_empty(),
            Self::Cleavage => !observation.cleavage.is_empty(),
            Self::Density => observation.density.is_some(),
            Self::Magnetic => observation.magnetic.is_some(),
            Self::AcidReactivity => observation.acid_reactive.is_some(),
        }
    }

    /// Distance between the observed value and the record, or `None` when unobserved.
    pub(crate) fn distance(self, observation: &Observation, record: &ReferenceRecord) -> Option<f64> {
        match self {
            Self::Color => labels_distance(&observation.colors, &record.colors),
            Self::Streak => observation
                .streak
                .as_deref()
                .map(|streak| categorical(streak == record.streak)),
            Self::Hardness => observation
                .hardness
                .map(|hardness| (hardness - record.hardness.center()).abs()),
            Self::Luster => labels_distance(&observation.luster, &record.luster),
            Self::Cleavage => labels_distance(&observation.cleavage, &record.cleavage),
            Self::Density => observation
                .density
                .map(|density| (density - record.density).abs()),
            Self::Magnetic => observation
                .magnetic
                .map(|magnetic| categorical(magnetic == record.magnetic)),
            Self::AcidReactivity => observation
                .acid_reactive
                .map(|acid| categorical(acid == record.acid_reactive)),
        }
    }
}

fn categorical(matched: bool) -> f64 {
    if matched {
        0.0
    } else {
        f64::INFINITY
    }
}

fn labels_distance(observed: &BTreeSet<String>, reference: &BTreeSet<String>) -> Option<f64> {
    if observed.is_empty() {
        return None;
    }
    Some(categorical(!observed.is_disjoint(reference)))
}

/// Share of the channel weight earned once the distance is within `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceBand {
    pub limit: f64,
    pub credit: f64,
}

impl ToleranceBand {
    pub const fn new(limit: f64, credit: f64) -> Self {
        Self { limit, credit }
    }
}

const EXACT: &[ToleranceBand] = &[ToleranceBand::new(0.0, 1.0)];

const HARDNESS_BANDS: &[ToleranceBand] = &[
    ToleranceBand::new(0.25, 1.0),
    ToleranceBand::new(1.0, 0.5),
    ToleranceBand::new(2.0, 0.2),
];

const DENSITY_BANDS: &[ToleranceBand] = &[
    ToleranceBand::new(0.1, 1.0),
    ToleranceBand::new(0.5, 0.5),
];

/// A channel with its weight and tolerance bands, ordered by ascending limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub weight: f64,
    pub bands: &'static [ToleranceBand],
}

impl ChannelSpec {
    pub const fn new(channel: Channel, weight: f64, bands: &'static [ToleranceBand]) -> Self {
        Self {
            channel,
            weight,
            bands,
        }
    }

    /// Fraction of the weight awarded for a distance; the first band that holds wins.
    pub fn credit_for(&self, distance: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| distance <= band.limit + BAND_EPSILON)
            .map(|band| band.credit)
            .unwrap_or(0.0)
    }

    /// Scores a single record, returning `None` when the observation is silent on this channel.
    pub fn evaluate(&self, observation: &Observation, record: &ReferenceRecord) -> Option<ChannelScore> {
        let distance = self.channel.distance(observation, record)?;
        let credit = self.credit_for(distance);
        Some(ChannelScore {
            channel: self.channel,
            weight: self.weight,
            earned: self.weight * credit,
            outcome: MatchOutcome::from_credit(credit),
        })
    }
}

/// Channel weights and tolerances used by the reference identification flow.
pub const STANDARD_CHANNELS: [ChannelSpec; 8] = [
    ChannelSpec::new(Channel::Color, 1.5, EXACT),
    ChannelSpec::new(Channel::Streak, 2.0, EXACT),
    ChannelSpec::new(Channel::Hardness, 2.5, HARDNESS_BANDS),
    ChannelSpec::new(Channel::Luster, 1.5, EXACT),
    ChannelSpec::new(Channel::Cleavage, 1.5, EXACT),
    ChannelSpec::new(Channel::Density, 1.5, DENSITY_BANDS),
    ChannelSpec::new(Channel::Magnetic, 1.0, EXACT),
    ChannelSpec::new(Channel::AcidReactivity, 1.0, EXACT),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Full,
    Partial,
    Miss,
}

impl MatchOutcome {
    fn from_credit(credit: f64) -> Self {
        if credit >= 1.0 {
            Self::Full
        } else if credit > 0.0 {
            Self::Partial
        } else {
            Self::Miss
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "match",
            Self::Partial => "partial",
            Self::Miss => "miss",
        }
    }
}

/// Contribution of one evaluated channel to a record's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelScore {
    pub channel: Channel,
    pub weight: f64,
    pub earned: f64,
    pub outcome: MatchOutcome,
}
