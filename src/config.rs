use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marketplace settings shared by search, listing views and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Search form value meaning "do not filter by city"
    pub all_cities_label: String,
    /// Search form value meaning "do not filter by property type"
    pub all_types_label: String,
    /// Cities offered when registering a property
    pub cities: Vec<String>,
    /// Number of listings on the featured shelf
    pub featured_limit: usize,
    /// Number of listings in the recently listed view
    pub recent_limit: usize,
    /// Plausible year built, inclusive. Wide enough for Solar Hijri and Gregorian years.
    pub min_year_built: u32,
    pub max_year_built: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            all_cities_label: "همه شهرها".to_string(),
            all_types_label: "همه انواع".to_string(),
            cities: ["تهران", "مشهد", "تبریز", "شیراز", "یزد", "طبس", "اقلید"]
                .into_iter()
                .map(String::from)
                .collect(),
            featured_limit: 6,
            recent_limit: 10,
            min_year_built: 1200,
            max_year_built: 2100,
        }
    }
}

impl MarketConfig {
    /// Load overrides from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: MarketConfig = serde_json::from_str(raw).context("Invalid config JSON")?;
        if config.min_year_built > config.max_year_built {
            anyhow::bail!(
                "min_year_built ({}) is greater than max_year_built ({})",
                config.min_year_built,
                config.max_year_built
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MarketConfig::from_json_str(r#"{ "featured_limit": 3 }"#).unwrap();
        assert_eq!(config.featured_limit, 3);
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.all_cities_label, "همه شهرها");
    }

    #[test]
    fn rejects_inverted_year_range() {
        let err = MarketConfig::from_json_str(r#"{ "min_year_built": 2000, "max_year_built": 1990 }"#);
        assert!(err.is_err());
    }
}
