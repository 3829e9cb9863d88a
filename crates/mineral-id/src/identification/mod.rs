//! Mineral identification: the reference catalog, the weighted channel table,
//! and the engine that ranks catalog records against a field observation.

mod catalog;
pub mod channels;
pub mod domain;
mod engine;
pub mod input;
pub mod report;

pub use catalog::{CatalogError, ReferenceCatalog};
pub use channels::{Channel, ChannelScore, ChannelSpec, MatchOutcome, STANDARD_CHANNELS};
pub use domain::{
    HardnessRange, Observation, ReferenceRecord, HARDNESS_SCALE_MAX, HARDNESS_SCALE_MIN,
};
pub use engine::{RecordScore, ScoreResult, ScoringEngine};
pub use input::{FieldVocabulary, InputError, ObservationInput};
pub use report::{Identification, IdentificationSummary, PracticalTest, COMPARISON_DEPTH};
