use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::DEFAULT_PAGE_SIZE,
    currency::{AmountFormat, NegativeStyle},
    errors::BookError,
    utils::{ensure_dir, PathResolver},
};

const TMP_SUFFIX: &str = "tmp";

pub type ConfigResult<T> = Result<T, BookError>;

/// User preferences persisted as `config.json` under the data root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub page_size: usize,
    pub negative_style: NegativeStyle,
    pub color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            page_size: DEFAULT_PAGE_SIZE,
            negative_style: NegativeStyle::Sign,
            color_enabled: true,
            data_root: None,
        }
    }
}

impl Config {
    pub fn amount_format(&self) -> AmountFormat {
        AmountFormat::for_currency(&self.currency)
            .with_locale(&self.locale)
            .with_negative_style(self.negative_style)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 {
            return Err(BookError::ConfigError("page_size must be at least 1".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(BookError::ConfigError("currency must not be empty".into()));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> ConfigResult<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> ConfigResult<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the stored configuration, falling back to defaults when absent.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            BookError::ConfigError(format!("{}: {}", self.path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{}", TMP_SUFFIX));
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_and_reload() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            currency: "EUR".into(),
            page_size: 25,
            negative_style: NegativeStyle::Parentheses,
            color_enabled: false,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "currency": "ILS" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "ILS");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "page_size": 0 }"#).unwrap();
        assert!(matches!(manager.load(), Err(BookError::ConfigError(_))));
        fs::write(manager.path(), "not json").unwrap();
        assert!(matches!(manager.load(), Err(BookError::ConfigError(_))));
    }
}
