//! Raw form values as a dashboard collects them, and their normalization into
//! an [`Observation`].

use super::catalog::ReferenceCatalog;
use super::domain::{Observation, HARDNESS_SCALE_MAX, HARDNESS_SCALE_MIN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const UNKNOWN: &str = "unknown";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be one of yes, no, or unknown (got '{value}')")]
    InvalidAnswer { field: &'static str, value: String },
    #[error("hardness {0} is outside the Mohs scale (1-10)")]
    HardnessOffScale(f64),
    #[error("density must be a non-negative number (got {0})")]
    InvalidDensity(f64),
}

/// Unvalidated observation fields.
///
/// `color` is free text separated by commas. Selectors use the literal
/// `unknown` (or omission) for "not observed", and a density of `0` also
/// means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationInput {
    pub color: String,
    pub streak: Option<String>,
    pub hardness: Option<f64>,
    pub luster: Vec<String>,
    pub cleavage: Vec<String>,
    pub density: Option<f64>,
    pub magnetic: Option<String>,
    pub acid: Option<String>,
}

impl ObservationInput {
    /// Trims and lower-cases every label and resolves the unknown markers.
    ///
    /// `default_hardness` fills in hardness when the form left it blank.
    pub fn normalize(&self, default_hardness: Option<f64>) -> Result<Observation, InputError> {
        let hardness = match self.hardness.or(default_hardness) {
            Some(value) if !(HARDNESS_SCALE_MIN..=HARDNESS_SCALE_MAX).contains(&value) => {
                return Err(InputError::HardnessOffScale(value));
            }
            other => other,
        };

        let density = match self.density {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(InputError::InvalidDensity(value));
            }
            Some(value) if value > 0.0 => Some(value),
            _ => None,
        };

        Ok(Observation {
            colors: normalize_labels(self.color.split(',')),
            streak: self
                .streak
                .as_deref()
                .map(normalize_label)
                .filter(|streak| !streak.is_empty() && streak != UNKNOWN),
            hardness,
            luster: normalize_labels(self.luster.iter().map(String::as_str)),
            cleavage: normalize_labels(self.cleavage.iter().map(String::as_str)),
            density,
            magnetic: parse_answer("magnetic", self.magnetic.as_deref())?,
            acid_reactive: parse_answer("acid", self.acid.as_deref())?,
        })
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn normalize_labels<'a>(raw: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    raw.map(normalize_label)
        .filter(|label| !label.is_empty())
        .collect()
}

/// Reads a yes/no/unknown selector; blank and `unknown` both mean not observed.
pub fn parse_answer(field: &'static str, raw: Option<&str>) -> Result<Option<bool>, InputError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | UNKNOWN => Ok(None),
        "yes" | "y" | "true" => Ok(Some(true)),
        "no" | "n" | "false" => Ok(Some(false)),
        _ => Err(InputError::InvalidAnswer {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Distinct labels present in a catalog, for populating form selectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldVocabulary {
    pub colors: Vec<String>,
    pub streaks: Vec<String>,
    pub lusters: Vec<String>,
    pub cleavages: Vec<String>,
}

impl FieldVocabulary {
    pub fn from_catalog(catalog: &ReferenceCatalog) -> Self {
        let mut colors = BTreeSet::new();
        let mut streaks = BTreeSet::new();
        let mut lusters = BTreeSet::new();
        let mut cleavages = BTreeSet::new();

        for record in catalog.records() {
            colors.extend(record.colors.iter().cloned());
            streaks.insert(record.streak.clone());
            lusters.extend(record.luster.iter().cloned());
            cleavages.extend(record.cleavage.iter().cloned());
        }

        Self {
            colors: colors.into_iter().collect(),
            streaks: streaks.into_iter().collect(),
            lusters: lusters.into_iter().collect(),
            cleavages: cleavages.into_iter().collect(),
        }
    }
}
