use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::models::{Property, PropertyType};
use serde::{Deserialize, Serialize};

/// Active criteria of a listing search. `None` means "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    /// Free text matched against title, description and barter preferences
    pub term: String,
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
}

impl SearchFilters {
    /// Build filters from raw search form values, where the configured
    /// "all cities" / "all types" labels switch a filter off.
    pub fn from_form(term: &str, city: &str, property_type: &str, config: &MarketConfig) -> Result<Self> {
        let city = if city == config.all_cities_label {
            None
        } else {
            Some(city.to_string())
        };

        let property_type = if property_type == config.all_types_label {
            None
        } else {
            Some(
                property_type
                    .parse::<PropertyType>()
                    .map_err(|reason| MarketError::validation("property_type", reason))?,
            )
        };

        Ok(Self {
            term: term.to_string(),
            city,
            property_type,
        })
    }

    /// Does this property satisfy every active criterion?
    pub fn matches(&self, property: &Property) -> bool {
        if !property.is_available() {
            return false;
        }

        if let Some(city) = &self.city {
            if &property.city != city {
                return false;
            }
        }

        if let Some(property_type) = self.property_type {
            if property.property_type != property_type {
                return false;
            }
        }

        let term = self.term.trim();
        if term.is_empty() {
            return true;
        }

        // The untrimmed term is what gets matched; trimming only decides whether it is active
        let needle = self.term.to_lowercase();
        property.title.to_lowercase().contains(&needle)
            || property.description.to_lowercase().contains(&needle)
            || property
                .barter_preferences
                .iter()
                .any(|pref| pref.to_lowercase().contains(&needle))
    }
}

/// Available properties matching `filters`, in collection order
pub fn search<'a>(properties: &'a [Property], filters: &SearchFilters) -> Vec<&'a Property> {
    properties.iter().filter(|p| filters.matches(p)).collect()
}

/// The first `limit` available properties
pub fn featured(properties: &[Property], limit: usize) -> Vec<&Property> {
    properties.iter().filter(|p| p.is_available()).take(limit).collect()
}

/// The last `limit` available properties, newest first
pub fn recently_listed(properties: &[Property], limit: usize) -> Vec<&Property> {
    let available: Vec<&Property> = properties.iter().filter(|p| p.is_available()).collect();
    let start = available.len().saturating_sub(limit);
    available[start..].iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::fixture;
    use crate::models::PropertyStatus;

    fn collection() -> Vec<Property> {
        let mut villa = fixture("p1", "u1", "Shiraz", PropertyType::Villa);
        villa.title = "Garden villa north of the city".to_string();

        let mut flat = fixture("p2", "u2", "Tehran", PropertyType::Apartment);
        flat.title = "Two bedroom flat".to_string();
        flat.barter_preferences = vec!["Car".to_string(), "Land in the north".to_string()];

        let mut sold = fixture("p3", "u3", "Shiraz", PropertyType::Villa);
        sold.title = "Villa north, already traded".to_string();
        sold.status = PropertyStatus::Exchanged;

        let mut pending = fixture("p4", "u3", "Shiraz", PropertyType::Villa);
        pending.status = PropertyStatus::PendingDeal;

        vec![villa, flat, sold, pending]
    }

    fn ids(found: &[&Property]) -> Vec<String> {
        found.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn empty_filters_return_available_subset() {
        let props = collection();
        let found = search(&props, &SearchFilters::default());
        assert_eq!(ids(&found), vec!["p1", "p2"]);
    }

    #[test]
    fn never_returns_unavailable_properties() {
        let props = collection();
        let filters = SearchFilters {
            term: "villa".to_string(),
            city: Some("Shiraz".to_string()),
            property_type: Some(PropertyType::Villa),
        };
        let found = search(&props, &filters);
        assert_eq!(ids(&found), vec!["p1"]);
    }

    #[test]
    fn term_matches_case_insensitively_across_fields() {
        let props = collection();

        let by_title = SearchFilters { term: "GARDEN".to_string(), ..Default::default() };
        assert_eq!(ids(&search(&props, &by_title)), vec!["p1"]);

        let by_tag = SearchFilters { term: "car".to_string(), ..Default::default() };
        assert_eq!(ids(&search(&props, &by_tag)), vec!["p2"]);

        let both = SearchFilters { term: "north".to_string(), ..Default::default() };
        assert_eq!(ids(&search(&props, &both)), vec!["p1", "p2"]);
    }

    #[test]
    fn blank_term_is_ignored() {
        let props = collection();
        let filters = SearchFilters { term: "   ".to_string(), ..Default::default() };
        assert_eq!(search(&props, &filters).len(), 2);
    }

    #[test]
    fn property_without_preferences_needs_title_or_description_match() {
        let mut p = fixture("p9", "u1", "Yazd", PropertyType::Land);
        p.title = "Plot".to_string();
        p.description = "Flat land".to_string();
        let props = vec![p];
        let filters = SearchFilters { term: "orchard".to_string(), ..Default::default() };
        assert!(search(&props, &filters).is_empty());
    }

    #[test]
    fn form_sentinels_disable_filters() {
        let config = MarketConfig::default();
        let filters = SearchFilters::from_form("", "همه شهرها", "همه انواع", &config).unwrap();
        assert_eq!(filters, SearchFilters::default());

        let filters = SearchFilters::from_form("باغ", "شیراز", "ویلا", &config).unwrap();
        assert_eq!(filters.city.as_deref(), Some("شیراز"));
        assert_eq!(filters.property_type, Some(PropertyType::Villa));
    }

    #[test]
    fn unknown_type_is_a_validation_error() {
        let config = MarketConfig::default();
        let err = SearchFilters::from_form("", "همه شهرها", "castle", &config).unwrap_err();
        assert_eq!(err.field(), Some("property_type"));
    }

    #[test]
    fn featured_and_recent_views() {
        let props: Vec<Property> = (1..=8)
            .map(|i| fixture(&format!("p{}", i), "u1", "Tehran", PropertyType::Apartment))
            .collect();

        assert_eq!(ids(&featured(&props, 3)), vec!["p1", "p2", "p3"]);
        assert_eq!(ids(&recently_listed(&props, 3)), vec!["p8", "p7", "p6"]);
        assert_eq!(recently_listed(&props, 20).len(), 8);
    }
}
