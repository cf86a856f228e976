use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u32 = 3000;
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1000;
const DEFAULT_IP: &str = "localhost";

/// A custom line appended to the scraped output by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddLine {
    pub name: String,
    pub value: String,
    /// Whether the line takes part in line filtering.
    pub filtered: bool,
}

/// Scrape configuration as supplied by the config owner.
///
/// The core never mutates it; it only reads the link list and interval and
/// forwards the whole value with `start`/`preview` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub links: Vec<String>,
    pub port: u32,
    pub ip: String,
    pub domains: Vec<String>,
    pub enable_server: bool,
    pub with_eq: bool,
    /// 1-based line numbers to keep.
    pub filter_lines: Vec<u32>,
    pub add_lines: Vec<AddLine>,
    pub add_sum: bool,
    pub sum_symbols: String,
    /// Poll interval in milliseconds.
    pub update_interval: u64,
    pub write_to_csv: bool,
    pub csv_path: String,
    pub write_to_txt: bool,
    pub txt_path: String,
    pub txt_encoding: String,
    pub dataset_name: String,
    pub debug: bool,
    pub stop_on_line_count_change: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            port: DEFAULT_PORT,
            ip: DEFAULT_IP.to_string(),
            domains: Vec::new(),
            enable_server: true,
            with_eq: false,
            filter_lines: Vec::new(),
            add_lines: Vec::new(),
            add_sum: false,
            sum_symbols: String::new(),
            update_interval: DEFAULT_UPDATE_INTERVAL_MS,
            write_to_csv: false,
            csv_path: String::new(),
            write_to_txt: false,
            txt_path: String::new(),
            txt_encoding: String::new(),
            dataset_name: String::new(),
            debug: false,
            stop_on_line_count_change: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("port must be between 1 and 65535, got {0}")]
    InvalidPort(u32),
    #[error("csv_path is required when write_to_csv is true")]
    MissingCsvPath,
    #[error("txt_path is required when write_to_txt is true")]
    MissingTxtPath,
    #[error("dataset_name is required when write_to_txt is true")]
    MissingDatasetName,
}

impl Config {
    /// Fills blank fields with their defaults and sorts the line filter.
    pub fn apply_defaults(&mut self) {
        if self.ip.is_empty() {
            self.ip = DEFAULT_IP.to_string();
        }
        if self.update_interval == 0 {
            self.update_interval = DEFAULT_UPDATE_INTERVAL_MS;
        }
        self.filter_lines.sort_unstable();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 || self.port > 65535 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if self.write_to_csv && self.csv_path.is_empty() {
            return Err(ConfigError::MissingCsvPath);
        }
        if self.write_to_txt && self.txt_path.is_empty() {
            return Err(ConfigError::MissingTxtPath);
        }
        if self.write_to_txt && self.dataset_name.is_empty() {
            return Err(ConfigError::MissingDatasetName);
        }
        Ok(())
    }

    /// Non-fatal problems worth surfacing to the user.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.links.is_empty() {
            warnings.push("no URLs configured".to_string());
        }
        for (index, line) in self.add_lines.iter().enumerate() {
            if line.name.is_empty() || line.value.is_empty() {
                warnings.push(format!("custom line {index} has an empty field"));
            }
        }
        if self.add_sum && self.sum_symbols.is_empty() {
            warnings.push("add_sum enabled but sum_symbols is empty".to_string());
        }
        warnings
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
