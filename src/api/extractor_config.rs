use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ExtractError, ExtractResult};

/// Extraction coordinator bootstrap configuration.
///
/// Serializable so a host can keep the asset location and chart size
/// alongside its own settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default = "default_image_name")]
    pub image_name: String,
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
    #[serde(default = "default_fragment_separator")]
    pub fragment_separator: String,
    #[serde(default = "default_chart_viewport")]
    pub chart_viewport: Viewport,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            image_name: default_image_name(),
            asset_dir: default_asset_dir(),
            image_extensions: default_image_extensions(),
            fragment_separator: default_fragment_separator(),
            chart_viewport: default_chart_viewport(),
        }
    }
}

impl ExtractorConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ExtractResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ExtractError::Config(format!("failed to parse extractor config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ExtractResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExtractError::Config(format!("failed to serialize extractor config: {e}")))
    }

    pub fn validate(self) -> ExtractResult<Self> {
        if self.image_name.trim().is_empty() {
            return Err(ExtractError::Config("image name must not be empty".to_owned()));
        }
        if self.image_extensions.is_empty() {
            return Err(ExtractError::Config(
                "at least one image extension is required".to_owned(),
            ));
        }
        if !self.chart_viewport.is_valid() {
            return Err(ExtractError::InvalidViewport {
                width: self.chart_viewport.width,
                height: self.chart_viewport.height,
            });
        }
        Ok(self)
    }

    /// Sets the logical image name resolved inside `asset_dir`.
    #[must_use]
    pub fn with_image_name(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    #[must_use]
    pub fn with_asset_dir(mut self, asset_dir: impl AsRef<Path>) -> Self {
        self.asset_dir = asset_dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_fragment_separator(mut self, separator: impl Into<String>) -> Self {
        self.fragment_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_chart_viewport(mut self, viewport: Viewport) -> Self {
        self.chart_viewport = viewport;
        self
    }
}

fn default_image_name() -> String {
    "time_series_report".to_owned()
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_image_extensions() -> Vec<String> {
    vec!["png".to_owned(), "jpg".to_owned(), "jpeg".to_owned()]
}

fn default_fragment_separator() -> String {
    " ".to_owned()
}

fn default_chart_viewport() -> Viewport {
    Viewport::new(800, 300)
}
