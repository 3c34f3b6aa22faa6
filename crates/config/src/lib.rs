use std::path::PathBuf;
use serde::Deserialize;

/// Runtime settings for the gigbook server and CLI.
///
/// Layers, lowest first: built-in defaults, `~/.gigbook/config.toml`,
/// `GIGBOOK_*` environment variables. The binary applies CLI flags last.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_url: String,
    pub port: u16,
    pub static_dir: String,
    pub log_level: String,
    pub utc: bool,
}

/// One layer of settings. Unset fields leave the layer below untouched.
#[derive(Debug, Deserialize, Default, PartialEq)]
struct Overrides {
    db_url: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
    log_level: Option<String>,
    utc: Option<bool>,
}

impl Overrides {
    fn from_file(contents: &str) -> Option<Self> {
        toml::from_str(contents).ok()
    }

    /// Reads `GIGBOOK_*` variables through `var`. Values that fail to parse are skipped.
    fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            db_url: var("GIGBOOK_DB_URL"),
            port: var("GIGBOOK_PORT").and_then(|v| v.parse().ok()),
            static_dir: var("GIGBOOK_STATIC_DIR"),
            log_level: var("GIGBOOK_LOG_LEVEL"),
            utc: var("GIGBOOK_UTC").map(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: "sqlite:gigbook.db".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
            log_level: "info".to_string(),
            utc: false,
        }
    }
}

impl Config {
    /// `~/.gigbook/config.toml`, or `./.gigbook/config.toml` without a home directory.
    pub fn file_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gigbook")
            .join("config.toml")
    }

    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(file) = std::fs::read_to_string(Self::file_path())
            .ok()
            .and_then(|contents| Overrides::from_file(&contents))
        {
            config.apply(file);
        }
        config.apply(Overrides::from_env(|key| std::env::var(key).ok()));
        config
    }

    fn apply(&mut self, layer: Overrides) {
        if let Some(v) = layer.db_url { self.db_url = v; }
        if let Some(v) = layer.static_dir { self.static_dir = v; }
        if let Some(v) = layer.log_level { self.log_level = v; }
        self.port = layer.port.unwrap_or(self.port);
        self.utc = layer.utc.unwrap_or(self.utc);
    }
}
