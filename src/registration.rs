use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::models::{Property, PropertyId, PropertyStatus, PropertyType, UserId, VerificationStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Raw values of the property registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub city: String,
    pub address: String,
    pub area: String,
    pub rooms: String,
    pub year_built: String,
    pub estimated_value: String,
    /// Comma separated, optional
    pub barter_preferences: String,
    pub images: Vec<String>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            property_type: PropertyType::Apartment,
            city: "تهران".to_string(),
            address: String::new(),
            area: String::new(),
            rooms: String::new(),
            year_built: String::new(),
            estimated_value: String::new(),
            barter_preferences: String::new(),
            images: Vec::new(),
        }
    }
}

impl RegistrationForm {
    /// Validate every required field, in form order, and build the listing.
    ///
    /// Fails on the first missing or invalid field.
    pub fn validate(&self, owner: &UserId, config: &MarketConfig) -> Result<Property> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let address = required("address", &self.address)?;

        let area: f64 = parse_field("area", &self.area)?;
        if !area.is_finite() || area <= 0.0 {
            return Err(MarketError::validation("area", "must be a positive number"));
        }

        let rooms: u32 = parse_field("rooms", &self.rooms)?;

        let year_built: u32 = parse_field("year_built", &self.year_built)?;
        if year_built < config.min_year_built || year_built > config.max_year_built {
            return Err(MarketError::validation(
                "year_built",
                format!(
                    "must be between {} and {}",
                    config.min_year_built, config.max_year_built
                ),
            ));
        }

        let estimated_value: i64 = parse_field("estimated_value", &self.estimated_value)?;
        if estimated_value <= 0 {
            return Err(MarketError::validation("estimated_value", "must be a positive amount"));
        }

        let city = required("city", &self.city)?;

        Ok(Property {
            id: PropertyId::generate(),
            title,
            description,
            owner: owner.clone(),
            property_type: self.property_type,
            address,
            city,
            area,
            rooms,
            year_built,
            images: self.images.clone(),
            estimated_value,
            status: PropertyStatus::Available,
            barter_preferences: split_preferences(&self.barter_preferences),
            verification_status: Some(VerificationStatus::Unverified),
            listed_at: Utc::now(),
        })
    }
}

/// Split a delimited preference string into trimmed, non-empty tags.
/// Both the latin and the arabic comma separate tags.
pub fn split_preferences(raw: &str) -> Vec<String> {
    raw.split([',', '،'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MarketError::validation(field, "is required"));
    }
    Ok(value.to_string())
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    let value = required(field, value)?;
    value
        .parse::<T>()
        .map_err(|_| MarketError::validation(field, format!("'{}' is not a valid number", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            title: "آپارتمان دو خوابه".to_string(),
            description: "نزدیک مترو".to_string(),
            city: "تهران".to_string(),
            address: "خیابان ولیعصر".to_string(),
            area: "95".to_string(),
            rooms: "2".to_string(),
            year_built: "1395".to_string(),
            estimated_value: "5000000000".to_string(),
            barter_preferences: "car, land".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_builds_available_unverified_property() {
        let owner = UserId::from("u1");
        let property = valid_form().validate(&owner, &MarketConfig::default()).unwrap();

        assert_eq!(property.owner, owner);
        assert_eq!(property.status, PropertyStatus::Available);
        assert_eq!(property.verification(), VerificationStatus::Unverified);
        assert_eq!(property.barter_preferences, vec!["car", "land"]);
        assert_eq!(property.area, 95.0);
        assert_eq!(property.estimated_value, 5_000_000_000);
    }

    #[test]
    fn zero_area_names_area() {
        let form = RegistrationForm { area: "0".to_string(), ..valid_form() };
        let err = form.validate(&UserId::from("u1"), &MarketConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("area"));
    }

    #[test]
    fn reports_first_offending_field() {
        let form = RegistrationForm {
            description: "  ".to_string(),
            rooms: "many".to_string(),
            ..valid_form()
        };
        let err = form.validate(&UserId::from("u1"), &MarketConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }

    #[test]
    fn rejects_bad_numbers() {
        let config = MarketConfig::default();
        let owner = UserId::from("u1");

        let cases = [
            (RegistrationForm { rooms: "-1".to_string(), ..valid_form() }, "rooms"),
            (RegistrationForm { year_built: "95".to_string(), ..valid_form() }, "year_built"),
            (RegistrationForm { estimated_value: "0".to_string(), ..valid_form() }, "estimated_value"),
            (RegistrationForm { area: "NaN".to_string(), ..valid_form() }, "area"),
        ];

        for (form, field) in cases {
            let err = form.validate(&owner, &config).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn preferences_accept_both_commas() {
        assert_eq!(split_preferences("خودرو، زمین ,, طلا"), vec!["خودرو", "زمین", "طلا"]);
        assert!(split_preferences("  ").is_empty());
    }
}
