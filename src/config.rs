use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::gesture::DEFAULT_TAP_WINDOW_MS;
use crate::ingest::MAX_SENTENCES;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7331".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentConfig {
    /// Cap on sentences kept per ingested document.
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            max_sentences: default_max_sentences(),
        }
    }
}

fn default_max_sentences() -> usize {
    MAX_SENTENCES
}

#[derive(Debug, Deserialize, Clone)]
pub struct GestureConfig {
    /// Window within which two same-side taps pair into a command.
    #[serde(default = "default_tap_window_ms")]
    pub double_tap_window_ms: i64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            double_tap_window_ms: default_tap_window_ms(),
        }
    }
}

fn default_tap_window_ms() -> i64 {
    DEFAULT_TAP_WINDOW_MS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Chat-completions base URL; `/v1/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.x.ai".to_string()
}
fn default_model() -> String {
    "grok-2-latest".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of a running `lento serve` that `read`/`ask` talk to.
    #[serde(default = "default_ask_url")]
    pub ask_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            ask_url: default_ask_url(),
        }
    }
}

fn default_ask_url() -> String {
    "http://127.0.0.1:7331".to_string()
}

impl Config {
    /// All-defaults config for commands run without a config file.
    pub fn minimal() -> Self {
        Config::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.document.max_sentences == 0 {
        anyhow::bail!("document.max_sentences must be > 0");
    }

    if config.gesture.double_tap_window_ms <= 0 {
        anyhow::bail!("gesture.double_tap_window_ms must be > 0");
    }

    if config.provider.timeout_secs == 0 {
        anyhow::bail!("provider.timeout_secs must be > 0");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_config("");
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:7331");
        assert_eq!(cfg.document.max_sentences, 2200);
        assert_eq!(cfg.gesture.double_tap_window_ms, 320);
    }

    #[test]
    fn overrides_are_honored() {
        let f = write_config(
            r#"
[server]
bind = "0.0.0.0:9000"

[document]
max_sentences = 50

[provider]
model = "grok-3"
"#,
        );
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:9000");
        assert_eq!(cfg.document.max_sentences, 50);
        assert_eq!(cfg.provider.model, "grok-3");
    }

    #[test]
    fn zero_max_sentences_is_rejected() {
        let f = write_config("[document]\nmax_sentences = 0\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn nonpositive_tap_window_is_rejected() {
        let f = write_config("[gesture]\ndouble_tap_window_ms = 0\n");
        assert!(load_config(f.path()).is_err());
    }
}
