//! Domain core of a real-estate barter marketplace: listings, search,
//! swap proposals between owners, and expert verification of listings.

pub mod config;
pub mod error;
pub mod listing;
pub mod market;
pub mod mock;
pub mod models;
pub mod proposals;
pub mod registration;
pub mod settlement;
pub mod store;
pub mod verification;

pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use listing::SearchFilters;
pub use market::{Marketplace, ProposalSummary};
pub use models::{
    BarterProposal, Property, PropertyId, PropertyStatus, PropertyType, ProposalId, ProposalStatus, User,
    UserId, VerificationStatus,
};
pub use proposals::{CashFlow, Decision, Perspective, ProposalDraft};
pub use registration::RegistrationForm;
pub use store::MemoryStore;
