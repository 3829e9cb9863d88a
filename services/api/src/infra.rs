use metrics_exporter_prometheus::PrometheusHandle;
use mineral_id::config::IdentificationConfig;
use mineral_id::error::AppError;
use mineral_id::identification::{
    FieldVocabulary, Identification, Observation, ObservationInput, ReferenceCatalog,
    ScoringEngine,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only catalog plus engine shared by every request.
#[derive(Debug)]
pub(crate) struct IdentificationService {
    catalog: ReferenceCatalog,
    engine: ScoringEngine,
    default_hardness: Option<f64>,
}

impl IdentificationService {
    pub(crate) fn new(catalog: ReferenceCatalog, default_hardness: Option<f64>) -> Self {
        Self {
            catalog,
            engine: ScoringEngine::standard(),
            default_hardness,
        }
    }

    /// Loads the configured catalog, falling back to the built-in reference set.
    pub(crate) fn from_config(config: &IdentificationConfig) -> Result<Self, AppError> {
        let catalog = match &config.catalog_path {
            Some(path) => ReferenceCatalog::from_path(path)?,
            None => ReferenceCatalog::standard()?,
        };
        Ok(Self::new(catalog, config.default_hardness))
    }

    pub(crate) fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub(crate) fn vocabulary(&self) -> FieldVocabulary {
        FieldVocabulary::from_catalog(&self.catalog)
    }

    pub(crate) fn observe(&self, input: &ObservationInput) -> Result<Observation, AppError> {
        Ok(input.normalize(self.default_hardness)?)
    }

    pub(crate) fn identify(&self, observation: &Observation) -> Identification<'_> {
        self.engine.identify(observation, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineral_id::identification::CatalogError;

    #[test]
    fn default_config_uses_builtin_catalog() {
        let service = IdentificationService::from_config(&IdentificationConfig::default())
            .expect("builtin catalog loads");
        assert_eq!(service.catalog().len(), 10);
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let config = IdentificationConfig {
            catalog_path: Some("does/not/exist.csv".into()),
            default_hardness: None,
        };
        match IdentificationService::from_config(&config) {
            Err(AppError::Catalog(CatalogError::Io(_))) => {}
            other => panic!("expected catalog io error, got {other:?}"),
        }
    }

    #[test]
    fn default_hardness_is_applied_to_blank_forms() {
        let catalog = ReferenceCatalog::standard().expect("standard catalog");
        let service = IdentificationService::new(catalog, Some(5.0));
        let observation = service
            .observe(&ObservationInput::default())
            .expect("blank form is valid");
        assert_eq!(observation.hardness, Some(5.0));
    }
}
