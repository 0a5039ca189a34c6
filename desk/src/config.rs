//! # Desk Configuration
//!
//! Settings live in a single YAML file under the platform config directory:
//!
//! ```text
//! <config_dir>/port-agency-desk/config.yaml
//! ```
//!
//! ```yaml
//! api_base_url: "http://localhost:3000"
//! session_file: null
//! sscec_warning_days: 30
//! birthday_window_days: 7
//! birthday_wrap_year_end: false
//! display_style: dotted
//! ```
//!
//! Missing keys take their defaults and a missing file means all defaults.
//! `PORTDESK_API_URL` overrides `api_base_url`.

use anyhow::{Context, Result};
use log::debug;
use port_agency_frontend::domain::birthday::{BirthdayWindow, DEFAULT_ALERT_WINDOW_DAYS};
use port_agency_frontend::domain::sscec::DEFAULT_WARNING_DAYS;
use port_agency_frontend::services::date_utils::DisplayStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "PORTDESK_API_URL";

const APP_DIR: &str = "port-agency-desk";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub api_base_url: String,
    /// Where the login token is kept; the platform data directory when unset
    pub session_file: Option<PathBuf>,
    pub sscec_warning_days: i64,
    pub birthday_window_days: i64,
    pub birthday_wrap_year_end: bool,
    pub display_style: DisplayStyle,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            session_file: None,
            sscec_warning_days: DEFAULT_WARNING_DAYS,
            birthday_window_days: DEFAULT_ALERT_WINDOW_DAYS,
            birthday_wrap_year_end: false,
            display_style: DisplayStyle::default(),
        }
    }
}

impl DeskConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
    }

    /// Load from `path` (or the default location), then apply the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                debug!("No config at {:?}, using defaults", path);
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_overrides(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: DeskConfig = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            debug!("{} overrides api_base_url", API_URL_ENV);
            self.api_base_url = url.trim().to_string();
        }
    }

    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR).join("session.json")))
    }

    pub fn birthday_window(&self) -> BirthdayWindow {
        BirthdayWindow {
            days: self.birthday_window_days,
            wrap_year_end: self.birthday_wrap_year_end,
        }
    }
}
