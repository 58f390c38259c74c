pub mod schema;

use crate::error::BpError;
use crate::parsing::{dates, pattern};
use schema::ExtractionConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIG_FILENAME: &str = "bp_extractor_config.yaml";

/// On-disk format of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<ConfigFormat, BpError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(BpError::UnsupportedConfigFormat { extension: ext }),
        }
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, BpError> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| BpError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, format).map_err(|e| match e {
        BpError::Json(_) | BpError::Yaml(_) => BpError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
        other => other,
    })
}

/// Parse and validate config text in the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ExtractionConfig, BpError> {
    let config: ExtractionConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    validate_config(&config)?;
    Ok(config)
}

/// Render a config in the given format.
pub fn to_string(config: &ExtractionConfig, format: ConfigFormat) -> Result<String, BpError> {
    Ok(match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    })
}

/// Validate that a config is usable for extraction.
pub fn validate_config(config: &ExtractionConfig) -> Result<(), BpError> {
    pattern::compile_pattern(&config.bp_data_pattern)?;

    for (name, format) in [
        ("input_date_format", &config.input_date_format),
        ("output_date_format", &config.output_date_format),
    ] {
        if !dates::is_valid_format(format) {
            return Err(BpError::ConfigInvalid(format!(
                "{} '{}' is not a valid strftime format",
                name, format
            )));
        }
    }

    if config.csv_headers.len() != 4 {
        return Err(BpError::ConfigInvalid(format!(
            "csv_headers must have 4 entries (date/time, systolic, diastolic, pulse), got {}",
            config.csv_headers.len()
        )));
    }

    if config.delimiter_byte().is_none() {
        return Err(BpError::ConfigInvalid(format!(
            "csv_delimiter '{}' must be a single ASCII character",
            config.csv_delimiter
        )));
    }

    if let Some(bounds) = &config.validation {
        for (field, range) in bounds.ranges() {
            if range.min > range.max {
                return Err(BpError::ConfigInvalid(format!(
                    "{} range has min {} greater than max {}",
                    field, range.min, range.max
                )));
            }
        }
    }

    Ok(())
}

/// Locates, loads and saves the config file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    /// Use `path` if given, otherwise the first existing default location.
    pub fn new(path: Option<&Path>) -> Self {
        match path {
            Some(p) => ConfigManager {
                path: p.to_path_buf(),
                explicit: true,
            },
            None => Self::discovered(Self::discover()),
        }
    }

    /// Manage `path` as if it had been found by lookup rather than named by
    /// the user, so load failures fall back to defaults.
    pub fn discovered(path: impl Into<PathBuf>) -> Self {
        ConfigManager {
            path: path.into(),
            explicit: false,
        }
    }

    /// Default config locations in lookup order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILENAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("bp_extractor").join(DEFAULT_CONFIG_FILENAME));
        }
        paths
    }

    fn discover() -> PathBuf {
        let candidates = Self::candidate_paths();
        candidates
            .iter()
            .find(|p| p.is_file())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config.
    ///
    /// An explicitly given file must load. A discovered file that fails to
    /// load is reported and replaced by the defaults, as is a missing one.
    pub fn load(&self) -> Result<ExtractionConfig, BpError> {
        if self.explicit {
            if !self.path.is_file() {
                return Err(BpError::ConfigLoad {
                    path: self.path.clone(),
                    reason: "file does not exist".into(),
                });
            }
            let config = load_config(&self.path)?;
            debug!("Loaded configuration from {}", self.path.display());
            return Ok(config);
        }

        if !self.path.is_file() {
            info!(
                "No configuration file found at {}, using defaults",
                self.path.display()
            );
            return Ok(ExtractionConfig::default());
        }

        match load_config(&self.path) {
            Ok(config) => {
                debug!("Loaded configuration from {}", self.path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("{e}; using default configuration");
                Ok(ExtractionConfig::default())
            }
        }
    }

    /// Write `config` to the managed path, creating parent directories.
    pub fn save(&self, config: &ExtractionConfig) -> Result<(), BpError> {
        let format = ConfigFormat::from_path(&self.path)?;
        let content = to_string(config, format)?;
        let write_err = |source| BpError::OutputWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, content).map_err(write_err)?;
        info!("Configuration saved to {}", self.path.display());
        Ok(())
    }

    /// Write the default config and return it.
    pub fn create_default(&self) -> Result<ExtractionConfig, BpError> {
        let config = ExtractionConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Like [`create_default`](Self::create_default), but an existing file
    /// is only replaced when `force` is set.
    pub fn init(&self, force: bool) -> Result<ExtractionConfig, BpError> {
        if self.path.exists() && !force {
            return Err(BpError::OutputWrite {
                path: self.path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "file exists (use --force to overwrite)",
                ),
            });
        }
        self.create_default()
    }
}
