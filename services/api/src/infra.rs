use metrics_exporter_prometheus::PrometheusHandle;
use shipment_dossier::config::AppConfig;
use shipment_dossier::error::AppError;
use shipment_dossier::validation::ValidationEngine;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<ValidationEngine>,
}

/// Builds the engine from the configured profile set, letting a command-line
/// path take precedence over `APP_PROFILES_PATH`.
pub(crate) fn build_engine(
    config: &mut AppConfig,
    profiles_override: Option<PathBuf>,
) -> Result<ValidationEngine, AppError> {
    if let Some(path) = profiles_override {
        config.validation.profiles_path = Some(path);
    }
    let registry = config.validation.registry()?;
    Ok(ValidationEngine::new(registry))
}
