use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "qrattend.sqlite";
const LEDGER_FILE_NAME: &str = "attendance.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_ledger")]
    pub ledger: String,
    #[serde(default = "default_sheet_title")]
    pub sheet_title: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_ledger() -> String {
    Config::ledger_file().to_string_lossy().to_string()
}
fn default_sheet_title() -> String {
    "Attendance Records".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            ledger: default_ledger(),
            sheet_title: default_sheet_title(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("qrattend")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".qrattend")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("qrattend.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE_NAME)
    }

    /// Return the default path of the scanning-station CSV ledger
    pub fn ledger_file() -> PathBuf {
        Self::config_dir().join(LEDGER_FILE_NAME)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Initialize the configuration directory and file.
    ///
    /// Relative `custom_db` / `custom_ledger` names are placed inside the
    /// configuration directory. In test mode the config file is left untouched.
    pub fn init_all(
        custom_db: Option<String>,
        custom_ledger: Option<String>,
        is_test: bool,
    ) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let resolve = |name: Option<String>, fallback: &str| -> PathBuf {
            match name {
                Some(n) => {
                    let p = Path::new(&n);
                    if p.is_absolute() {
                        p.to_path_buf()
                    } else {
                        dir.join(p)
                    }
                }
                None => dir.join(fallback),
            }
        };

        let config = Config {
            database: resolve(custom_db, DB_FILE_NAME)
                .to_string_lossy()
                .to_string(),
            ledger: resolve(custom_ledger, LEDGER_FILE_NAME)
                .to_string_lossy()
                .to_string(),
            sheet_title: default_sheet_title(),
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }
}
