use serde::Deserialize;

pub const DEFAULT_DATA_URL: &str = "./data/propuesta.json";

#[derive(Debug, Clone, Deserialize)]
pub struct KiwaConfig {
    #[serde(default = "default_data_url")]
    pub data_url: String,
    /// Overrides `anexos.tsv_horario_url` from the document.
    #[serde(default)]
    pub tsv_url: Option<String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Year written over `2025` in the period and titles; `None` keeps the
    /// document as is.
    #[serde(default = "default_force_year")]
    pub force_year: Option<u32>,
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.into()
}
fn default_locale() -> String {
    "es".into()
}
fn default_force_year() -> Option<u32> {
    Some(2026)
}
fn default_fetch_timeout_ms() -> u64 {
    15_000
}

impl Default for KiwaConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            tsv_url: None,
            locale: default_locale(),
            force_year: default_force_year(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

impl KiwaConfig {
    pub fn from_env() -> Self {
        let data_url = std::env::var("KIWA_DATA_URL").unwrap_or_else(|_| default_data_url());
        let tsv_url = std::env::var("KIWA_TSV_URL").ok().filter(|s| !s.is_empty());
        let locale = std::env::var("KIWA_LOCALE").unwrap_or_else(|_| default_locale());
        // 0 disables the year patch
        let force_year = match std::env::var("KIWA_FORCE_YEAR").ok().and_then(|s| s.parse::<u32>().ok()) {
            Some(0) => None,
            Some(y) => Some(y),
            None => default_force_year(),
        };
        let fetch_timeout_ms = std::env::var("KIWA_FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default_fetch_timeout_ms());

        Self { data_url, tsv_url, locale, force_year, fetch_timeout_ms }
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Settings file; missing keys take the defaults.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        serde_json::from_str(raw).context("parse kiwa config")
    }
}
