mod status;

pub use status::{PropertyStatus, PropertyType, ProposalStatus, VerificationStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Fresh time-ordered id
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identity of a marketplace participant
    UserId
);
id_type!(
    /// Identity of a listing
    PropertyId
);
id_type!(
    /// Identity of a barter proposal
    ProposalId
);

/// Marketplace participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub profile_picture: Option<String>,
    pub city: Option<String>,
}

/// A listed property offered for barter.
///
/// The owner is held by id; resolve it through a `UserDirectory`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub owner: UserId,
    pub property_type: PropertyType,
    pub address: String,
    pub city: String,
    /// Square meters, always positive
    pub area: f64,
    pub rooms: u32,
    pub year_built: u32,
    pub images: Vec<String>,
    /// Toman, always positive
    pub estimated_value: i64,
    pub status: PropertyStatus,
    pub barter_preferences: Vec<String>,
    pub verification_status: Option<VerificationStatus>,
    pub listed_at: DateTime<Utc>,
}

impl Property {
    pub fn is_available(&self) -> bool {
        self.status == PropertyStatus::Available
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Current verification state; listings that never recorded one are unverified
    pub fn verification(&self) -> VerificationStatus {
        self.verification_status.unwrap_or_default()
    }

    /// Estimated value rendered for display
    pub fn display_value(&self) -> String {
        format_value(self.estimated_value)
    }
}

/// A directed swap offer from the proposer's property to the receiver's property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarterProposal {
    pub id: ProposalId,
    pub proposer: UserId,
    pub proposer_property: PropertyId,
    pub receiver: UserId,
    pub receiver_property: PropertyId,
    pub status: ProposalStatus,
    pub message: String,
    /// Positive: proposer pays the receiver. Negative: proposer receives.
    pub cash_difference: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl BarterProposal {
    pub fn is_even_swap(&self) -> bool {
        self.cash_difference.unwrap_or(0) == 0
    }
}

const BILLION: i64 = 1_000_000_000;
const MILLION: i64 = 1_000_000;

/// Format a toman amount the way listings show it: billions above one
/// billion, millions otherwise.
pub fn format_value(value: i64) -> String {
    // Pick the unit after rounding so 999.999 million shows as 1 billion
    let millions = round_cents(value as f64 / MILLION as f64);
    if value >= BILLION || millions >= 1_000.0 {
        format!("{} میلیارد تومان", trim_fraction(value as f64 / BILLION as f64))
    } else {
        format!("{} میلیون تومان", trim_fraction(millions))
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn trim_fraction(amount: f64) -> String {
    let text = format!("{:.2}", round_cents(amount));
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
