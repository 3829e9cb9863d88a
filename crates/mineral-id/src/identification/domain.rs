use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Lowest value on the Mohs hardness scale.
pub const HARDNESS_SCALE_MIN: f64 = 1.0;
/// Highest value on the Mohs hardness scale.
pub const HARDNESS_SCALE_MAX: f64 = 10.0;

/// Closed hardness interval a reference mineral typically falls in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardnessRange {
    pub min: f64,
    pub max: f64,
}

impl HardnessRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn exact(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn is_on_scale(&self) -> bool {
        let scale = HARDNESS_SCALE_MIN..=HARDNESS_SCALE_MAX;
        scale.contains(&self.min) && scale.contains(&self.max)
    }
}

impl fmt::Display for HardnessRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// One known mineral with the attributes every scoring channel reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: String,
    pub colors: BTreeSet<String>,
    pub streak: String,
    pub hardness: HardnessRange,
    pub luster: BTreeSet<String>,
    pub cleavage: BTreeSet<String>,
    /// Reference density in g/cm³.
    pub density: f64,
    pub magnetic: bool,
    pub acid_reactive: bool,
    /// Identification hint shown to the user, never scored.
    pub notes: String,
}

/// Field observation of an unknown specimen.
///
/// Empty sets and `None` mean "not observed". Those channels are skipped when
/// scoring rather than counted as a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub colors: BTreeSet<String>,
    #[serde(default)]
    pub streak: Option<String>,
    #[serde(default)]
    pub hardness: Option<f64>,
    #[serde(default)]
    pub luster: BTreeSet<String>,
    #[serde(default)]
    pub cleavage: BTreeSet<String>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub magnetic: Option<bool>,
    #[serde(default)]
    pub acid_reactive: Option<bool>,
}

impl Observation {
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors.extend(colors.into_iter().map(Into::into));
        self
    }

    pub fn with_streak(mut self, streak: impl Into<String>) -> Self {
        self.streak = Some(streak.into());
        self
    }

    pub fn with_hardness(mut self, hardness: f64) -> Self {
        self.hardness = Some(hardness);
        self
    }

    pub fn with_luster<I, S>(mut self, luster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.luster.extend(luster.into_iter().map(Into::into));
        self
    }

    pub fn with_cleavage<I, S>(mut self, cleavage: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cleavage.extend(cleavage.into_iter().map(Into::into));
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_magnetic(mut self, magnetic: bool) -> Self {
        self.magnetic = Some(magnetic);
        self
    }

    pub fn with_acid_reactive(mut self, acid_reactive: bool) -> Self {
        self.acid_reactive = Some(acid_reactive);
        self
    }
}
