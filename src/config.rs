use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::Deserialize;

use crate::error::AppError;

const ENV_PREFIX: &str = "DERMASCAN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub path: PathBuf,
    pub labels_path: PathBuf,
    pub input_width: u32,
    pub input_height: u32,
    pub layout: TensorLayout,
    pub resize_filter: ResizeFilter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub window_title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

/// Memory order of the classifier input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensorLayout {
    /// `[1, height, width, 3]`, as exported from Keras.
    Nhwc,
    /// `[1, 3, height, width]`, as exported from PyTorch.
    Nchw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResizeFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/skin_cancer.onnx"),
            labels_path: PathBuf::from("models/class_indices.json"),
            input_width: 224,
            input_height: 224,
            layout: TensorLayout::Nhwc,
            // Bicubic, matching the resampling used at training time.
            resize_filter: ResizeFilter::CatmullRom,
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_title: "DermaScan - Chẩn đoán Ung thư Da".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings in order of precedence:
    /// 1. `config/default.toml` (optional)
    /// 2. `config/local.toml` (optional)
    /// 3. Environment variables with the `DERMASCAN__` prefix
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, AppError> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join("local")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.input_width == 0 || self.model.input_height == 0 {
            return Err(AppError::InvalidSettings(format!(
                "model input size must be non-zero, got {}x{}",
                self.model.input_width, self.model.input_height
            )));
        }

        if self.model.path.as_os_str().is_empty() {
            return Err(AppError::InvalidSettings(
                "model path must not be empty".to_string(),
            ));
        }

        if self.model.labels_path.as_os_str().is_empty() {
            return Err(AppError::InvalidSettings(
                "label map path must not be empty".to_string(),
            ));
        }

        if self.ui.width <= 0.0 || self.ui.height <= 0.0 {
            return Err(AppError::InvalidSettings(
                "window size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dermascan-config-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_match_the_trained_model() {
        let settings = Settings::default();
        assert_eq!(settings.model.input_width, 224);
        assert_eq!(settings.model.input_height, 224);
        assert_eq!(settings.model.layout, TensorLayout::Nhwc);
        assert_eq!(settings.model.resize_filter, ResizeFilter::CatmullRom);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = scratch_dir();
        let settings = Settings::load_from(&dir).unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(
            settings.model.labels_path,
            PathBuf::from("models/class_indices.json")
        );
    }

    #[test]
    fn local_file_overrides_default_file() {
        let dir = scratch_dir();
        std::fs::write(
            dir.join("default.toml"),
            "[model]\ninput_width = 256\ninput_height = 256\nlayout = \"nchw\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("local.toml"),
            "[model]\ninput_width = 299\nresize_filter = \"lanczos3\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&dir).unwrap();
        assert_eq!(settings.model.input_width, 299);
        assert_eq!(settings.model.input_height, 256);
        assert_eq!(settings.model.layout, TensorLayout::Nchw);
        assert_eq!(settings.model.resize_filter, ResizeFilter::Lanczos3);
    }

    // Only touches `ui.*` keys so it cannot disturb the other loader tests.
    #[test]
    fn environment_overrides_files() {
        let dir = scratch_dir();
        std::fs::write(
            dir.join("default.toml"),
            "[ui]\nwindow_title = \"from file\"\nheight = 600.0\n",
        )
        .unwrap();

        std::env::set_var("DERMASCAN__UI__HEIGHT", "900");
        std::env::set_var("DERMASCAN__UI__WINDOW_TITLE", "from env");
        let loaded = Settings::load_from(&dir);
        std::env::remove_var("DERMASCAN__UI__HEIGHT");
        std::env::remove_var("DERMASCAN__UI__WINDOW_TITLE");

        let settings = loaded.unwrap();
        assert_eq!(settings.ui.height, 900.0);
        assert_eq!(settings.ui.window_title, "from env");
        assert_eq!(settings.ui.width, 1280.0);
    }

    #[test]
    fn zero_input_size_is_rejected() {
        let mut settings = Settings::default();
        settings.model.input_height = 0;
        assert!(matches!(
            settings.validate(),
            Err(AppError::InvalidSettings(_))
        ));
    }

    #[test]
    fn empty_model_path_is_rejected() {
        let mut settings = Settings::default();
        settings.model.path = PathBuf::new();
        assert!(settings.validate().is_err());
    }
}
