use std::str::FromStr;

use crate::error::{InvestorError, Result};

/// How a key is drawn from the classification key pool on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySelection {
    #[default]
    Random,
    RoundRobin,
}

impl FromStr for KeySelection {
    type Err = InvestorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(KeySelection::Random),
            "round_robin" | "round-robin" | "roundrobin" => Ok(KeySelection::RoundRobin),
            other => Err(InvestorError::Config(format!(
                "EXA_KEY_SELECTION must be 'random' or 'round_robin', got '{other}'"
            ))),
        }
    }
}

/// Process configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Classification (Exa)
    pub exa_api_keys: Vec<String>,
    pub exa_key_selection: KeySelection,
    pub exa_base_url: Option<String>,

    // Deep research
    pub research_api_url: String,
    pub research_api_key: Option<String>,

    // Structured extraction (OpenAI)
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub extraction_max_tokens: u32,

    // Pipeline
    pub skip_existing_default: bool,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                InvestorError::Config(format!("{key} environment variable is required"))
            })
        };

        let exa_api_keys = parse_key_pool(&required("EXA_API_KEYS")?);
        if exa_api_keys.is_empty() {
            return Err(InvestorError::Config(
                "EXA_API_KEYS must contain at least one key".to_string(),
            ));
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            exa_api_keys,
            exa_key_selection: get("EXA_KEY_SELECTION")
                .map(|v| v.parse::<KeySelection>())
                .transpose()?
                .unwrap_or_default(),
            exa_base_url: get("EXA_BASE_URL"),
            research_api_url: required("RESEARCH_API_URL")?,
            research_api_key: get("RESEARCH_API_KEY"),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            openai_base_url: get("OPENAI_BASE_URL"),
            extraction_max_tokens: parse_number(get("EXTRACTION_MAX_TOKENS"), "EXTRACTION_MAX_TOKENS", 4096)?,
            skip_existing_default: get("SKIP_EXISTING_DEFAULT")
                .map(|v| parse_flag(&v, "SKIP_EXISTING_DEFAULT"))
                .transpose()?
                .unwrap_or(true),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number(get("PORT"), "PORT", 8080)?,
        })
    }
}

/// Split a comma-separated key list, dropping blanks.
pub fn parse_key_pool(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str, key: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(InvestorError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}

fn parse_number<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T> {
    match raw {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| InvestorError::Config(format!("{key} must be a number, got '{v}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/investors"),
        ("EXA_API_KEYS", "k1, k2 ,,k3"),
        ("RESEARCH_API_URL", "https://research.example/run"),
        ("OPENAI_API_KEY", "sk-test"),
    ];

    #[test]
    fn minimal_env_uses_defaults() {
        let config = Config::from_lookup(lookup(MINIMAL)).unwrap();

        assert_eq!(config.exa_api_keys, vec!["k1", "k2", "k3"]);
        assert_eq!(config.exa_key_selection, KeySelection::Random);
        assert!(config.skip_existing_default);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.extraction_max_tokens, 4096);
        assert_eq!(config.port, 8080);
        assert_eq!(config.research_api_key, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend([
            ("EXA_KEY_SELECTION", "round_robin"),
            ("SKIP_EXISTING_DEFAULT", "false"),
            ("EXTRACTION_MAX_TOKENS", "8000"),
            ("PORT", "9090"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.exa_key_selection, KeySelection::RoundRobin);
        assert!(!config.skip_existing_default);
        assert_eq!(config.extraction_max_tokens, 8000);
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn missing_required_value_is_a_config_error() {
        let pairs: Vec<_> = MINIMAL
            .iter()
            .copied()
            .filter(|(k, _)| *k != "OPENAI_API_KEY")
            .collect();
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, InvestorError::Config(ref m) if m.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn blank_key_pool_is_rejected() {
        let mut pairs = MINIMAL.to_vec();
        pairs.retain(|(k, _)| *k != "EXA_API_KEYS");
        pairs.push(("EXA_API_KEYS", " , ,"));
        assert!(matches!(
            Config::from_lookup(lookup(&pairs)),
            Err(InvestorError::Config(_))
        ));
    }

    #[test]
    fn malformed_flag_is_rejected() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("SKIP_EXISTING_DEFAULT", "maybe"));
        assert!(Config::from_lookup(lookup(&pairs)).is_err());
    }
}
