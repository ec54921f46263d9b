use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of real estate being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    Villa,
    Land,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::Land,
        PropertyType::Commercial,
    ];

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "آپارتمان",
            PropertyType::Villa => "ویلا",
            PropertyType::Land => "زمین",
            PropertyType::Commercial => "تجاری",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Villa => "villa",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    /// Accepts either the user-facing label or the snake_case key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.label() == s || t.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown property type '{}'", s))
    }
}

/// Trading status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    PendingDeal,
    Exchanged,
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            PropertyStatus::Available => "موجود",
            PropertyStatus::PendingDeal => "در حال معامله",
            PropertyStatus::Exchanged => "تهاتر شده",
        })
    }
}

/// Lifecycle of a barter proposal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    InReview,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ProposalStatus::Pending => "در انتظار پاسخ",
            ProposalStatus::Accepted => "پذیرفته شده",
            ProposalStatus::Rejected => "رد شده",
            ProposalStatus::InReview => "در حال بررسی کارشناسی",
        })
    }
}

/// Expert review state of a listing, independent of trading status.
///
/// Moves forward only: unverified -> pending -> verified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Pending,
    Verified,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            VerificationStatus::Unverified => "تأیید نشده",
            VerificationStatus::Pending => "در حال بررسی",
            VerificationStatus::Verified => "تأیید شده",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_parses_label_and_key() {
        assert_eq!("ویلا".parse::<PropertyType>(), Ok(PropertyType::Villa));
        assert_eq!("Commercial".parse::<PropertyType>(), Ok(PropertyType::Commercial));
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn statuses_serialize_as_snake_case() {
        let json = serde_json::to_string(&PropertyStatus::PendingDeal).unwrap();
        assert_eq!(json, "\"pending_deal\"");
        let json = serde_json::to_string(&ProposalStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
    }
}
