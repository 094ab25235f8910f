//! Run configuration: which girders to draw and where the files live.
//!
//! Every field has a default describing the screened bridge: five girders of
//! nine elements over a 25 m span, with the third girder as the reference for
//! the longitudinal diagram. A `bridge.json` file may override any subset of
//! the fields:
//!
//! ```json
//! {
//!   "reference_girder": "Girder 2",
//!   "scale_factor": 0.25,
//!   "show": false
//! }
//! ```

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::errors::{ConfigError, LoadError};
use crate::ElementId;

/// Default location of the optional configuration file.
pub const CONFIG_FILE: &str = "bridge.json";

/// One longitudinal load path, elements in geometric order.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GirderChain {
    /// Display name used in legends and trace names.
    pub name: String,
    /// Element IDs from one end of the bridge to the other.
    pub elements: Vec<ElementId>,
}

impl GirderChain {
    /// Create a chain from a name and its elements.
    #[must_use]
    pub fn new(name: impl Into<String>, elements: Vec<ElementId>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Number of elements in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the chain has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Settings shared by both pipelines.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Results dataset in xarray `to_dict` JSON layout.
    pub dataset: PathBuf,
    /// Node and member tables.
    pub geometry: PathBuf,
    /// Girders drawn in the 3D model, in legend order.
    pub girders: Vec<GirderChain>,
    /// Girder drawn in the 2D diagram.
    pub reference_girder: String,
    /// Total girder span in metres, divided evenly between its elements.
    pub span: f64,
    /// Multiplier from force units to display units for curtain heights.
    pub scale_factor: f64,
    /// Largest jump between adjacent element ends that is not reported.
    pub continuity_tolerance: f64,
    /// Where the 2D diagram is written.
    pub diagram_output: PathBuf,
    /// Where the interactive 3D model is written.
    pub model_output: PathBuf,
    /// Whether to open each artifact in a viewer once written.
    pub show: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let girder = |number: u32, first: ElementId| {
            let mut elements: Vec<ElementId> = (0..8).map(|step| first + 9 * step).collect();
            elements.push(first + 68);
            GirderChain::new(format!("Girder {number}"), elements)
        };
        Self {
            dataset: PathBuf::from("screening_task.json"),
            geometry: PathBuf::from("bridge_geometry.json"),
            girders: (1..=5).map(|number| girder(number, 12 + number)).collect(),
            reference_girder: "Girder 3".to_owned(),
            span: 25.0,
            scale_factor: 0.5,
            continuity_tolerance: 1.0e-6,
            diagram_output: PathBuf::from("2d_images/Task1_2D_Results.png"),
            model_output: PathBuf::from("3d_view/Interactive_Bridge_Model.html"),
            show: true,
        }
    }
}

impl BridgeConfig {
    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file, or use the defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if path.exists() {
            info!("using configuration from {}", path.display());
            Self::load(path)
        } else {
            info!("{} not found, using built-in bridge configuration", path.display());
            Ok(Self::default())
        }
    }

    /// Look up a configured girder by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownGirder`] when no girder has that name.
    pub fn girder(&self, name: &str) -> Result<&GirderChain, ConfigError> {
        self.girders
            .iter()
            .find(|girder| girder.name == name)
            .ok_or_else(|| ConfigError::UnknownGirder(name.to_owned()))
    }

    /// The girder drawn in the 2D diagram.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownGirder`] when the reference girder is not configured.
    pub fn reference(&self) -> Result<&GirderChain, ConfigError> {
        self.girder(&self.reference_girder)
    }

    /// Check the values the builders rely on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.span.is_finite() && self.span > 0.0) {
            return Err(ConfigError::InvalidSpan(self.span));
        }
        if !self.scale_factor.is_finite() {
            return Err(ConfigError::InvalidScaleFactor(self.scale_factor));
        }
        if let Some(empty) = self.girders.iter().find(|girder| girder.is_empty()) {
            return Err(ConfigError::EmptyGirder(empty.name.clone()));
        }
        self.reference().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_describe_the_screened_bridge() {
        let config = BridgeConfig::default();
        assert_eq!(config.girders.len(), 5);
        assert_eq!(
            config.girders[0],
            GirderChain::new("Girder 1", vec![13, 22, 31, 40, 49, 58, 67, 76, 81])
        );
        assert_eq!(
            config.reference().expect("reference configured").elements,
            vec![15, 24, 33, 42, 51, 60, 69, 78, 83]
        );
        assert_eq!(
            config.girders[4].elements,
            vec![17, 26, 35, 44, 53, 62, 71, 80, 85]
        );
        assert!((config.scale_factor - 0.5).abs() < f64::EPSILON);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temporary file");
        file.write_all(br#"{"reference_girder": "Girder 1", "show": false, "span": 30.0}"#)
            .expect("config written");
        let config = BridgeConfig::load_or_default(file.path()).expect("config loads");
        assert_eq!(config.reference_girder, "Girder 1");
        assert!(!config.show);
        assert!((config.span - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.girders, BridgeConfig::default().girders);
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let config =
            BridgeConfig::load_or_default(directory.path().join(CONFIG_FILE)).expect("defaults");
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = BridgeConfig {
            span: 0.0,
            ..BridgeConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpan(0.0)));

        config.span = 25.0;
        config.reference_girder = "Girder 9".to_owned();
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownGirder("Girder 9".to_owned()))
        );

        config.reference_girder = "Girder 3".to_owned();
        config.girders.push(GirderChain::new("Stub", Vec::new()));
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGirder("Stub".to_owned()))
        );
    }
}
