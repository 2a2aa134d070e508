use serde::Deserialize;

use crate::error::{ClientError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/client.toml";

pub const DEFAULT_ROWS_PER_PAGE: u32 = 25;
pub const DEFAULT_START_ROW: u32 = 1;

/// Per-instance pagination defaults, read-only after construction.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub rows_per_page: u32,
    pub start_row: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            start_row: DEFAULT_START_ROW,
        }
    }
}

impl ClientConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.rows_per_page == 0 {
            return Err(ClientError::Invalid(
                "rows_per_page must be >= 1".to_string(),
            ));
        }
        if self.start_row == 0 {
            return Err(ClientError::Invalid("start_row must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Connection settings for building a client from a config file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub rows_per_page: u32,
    pub start_row: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8010".to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            start_row: DEFAULT_START_ROW,
        }
    }
}

/// Loads settings from an optional TOML file overlaid with `IGSVC_*`
/// environment variables.
pub fn load(path: Option<&str>) -> Result<Settings> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("IGSVC"));
    let settings: Settings = builder.build()?.try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = ClientConfig::default();
        assert_eq!(config.rows_per_page, 25);
        assert_eq!(config.start_row, 1);
    }

    #[test]
    fn load_reads_values_from_a_toml_file() {
        let dir =
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_cfg");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("client.toml");
        std::fs::write(&path, "base_url = \"http://svc:9090\"\nrows_per_page = 40\n").unwrap();

        let settings = load(path.to_str()).unwrap();
        assert_eq!(settings.base_url, "http://svc:9090");
        assert_eq!(settings.rows_per_page, 40);
        // Keys absent from the file keep their defaults.
        assert_eq!(settings.start_row, 1);
    }

    #[test]
    fn load_falls_back_to_defaults_when_the_file_is_absent() {
        let settings = load(Some("target/does_not_exist/client")).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8010");
        assert_eq!(settings.rows_per_page, 25);
        assert_eq!(settings.start_row, 1);
    }

    #[test]
    fn zero_values_are_rejected() {
        let config = ClientConfig {
            rows_per_page: 0,
            start_row: 1,
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            rows_per_page: 25,
            start_row: 0,
        };
        assert!(config.validate().is_err());
    }
}
