use dermascan::app::DiagnosisApp;
use dermascan::config::{LoggingSettings, Settings};
use dermascan::error::AppError;
use dermascan::pipeline::services::Preprocessor;
use dermascan::pipeline::{DiagnosisPipeline, DiseaseCatalog, LabelIndexMap, OnnxClassifier};
use tracing::{info, warn, Level};

fn init_logging(settings: &LoggingSettings) {
    let level = settings.level.parse::<Level>();
    tracing_subscriber::fmt()
        .with_max_level(level.as_ref().copied().unwrap_or(Level::INFO))
        .init();
    if level.is_err() {
        warn!("Unknown log level '{}', using info", settings.level);
    }
}

fn main() -> Result<(), AppError> {
    let settings = Settings::load()?;
    init_logging(&settings.logging);

    let preprocessor = Preprocessor::from_settings(&settings.model)?;
    let classifier = OnnxClassifier::load(&settings.model.path, preprocessor.tensor_shape())?;
    let labels = LabelIndexMap::from_path(&settings.model.labels_path)?;

    let pipeline = DiagnosisPipeline::builder()
        .classifier(Box::new(classifier))
        .labels(labels)
        .catalog(DiseaseCatalog::builtin())
        .preprocessor(preprocessor)
        .build()?;

    info!("Starting UI");
    DiagnosisApp::start_gui(&settings.ui, pipeline)
}
