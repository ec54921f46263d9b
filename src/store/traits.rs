use crate::error::{MarketError, Result};
use crate::models::{
    BarterProposal, Property, PropertyId, ProposalId, User, UserId, VerificationStatus,
};
use crate::proposals::{Decider, Decision};
use crate::verification::VerificationStep;
use async_trait::async_trait;

/// Identity lookups for owners, proposers and receivers
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn load_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Like `load_user`, but a missing user is an error
    async fn require_user(&self, id: &UserId) -> Result<User> {
        self.load_user(id)
            .await?
            .ok_or_else(|| MarketError::not_found("user", id))
    }
}

/// Persistence of listings
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn load_property(&self, id: &PropertyId) -> Result<Option<Property>>;

    /// Every listing, in insertion order
    async fn list_properties(&self) -> Result<Vec<Property>>;

    /// Insert a new listing. Returns `AlreadyExists` if the id is taken.
    async fn insert_property(&self, property: &Property) -> Result<()>;

    /// Apply a verification step to the stored listing atomically.
    /// Fails without writing if the stored status does not allow it.
    async fn advance_verification(&self, id: &PropertyId, step: &VerificationStep) -> Result<VerificationStatus>;

    async fn require_property(&self, id: &PropertyId) -> Result<Property> {
        self.load_property(id)
            .await?
            .ok_or_else(|| MarketError::not_found("property", id))
    }

    /// Listings of one owner, whatever their trading status
    async fn properties_by_owner(&self, owner: &UserId) -> Result<Vec<Property>> {
        let properties = self.list_properties().await?;
        Ok(properties.into_iter().filter(|p| p.is_owned_by(owner)).collect())
    }
}

/// Persistence of barter proposals
#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn load_proposal(&self, id: &ProposalId) -> Result<Option<BarterProposal>>;

    /// Every proposal, in insertion order
    async fn list_proposals(&self) -> Result<Vec<BarterProposal>>;

    /// Insert a new proposal. Returns `AlreadyExists` if the id is taken.
    async fn insert_proposal(&self, proposal: &BarterProposal) -> Result<()>;

    async fn require_proposal(&self, id: &ProposalId) -> Result<BarterProposal> {
        self.load_proposal(id)
            .await?
            .ok_or_else(|| MarketError::not_found("proposal", id))
    }

    async fn sent_by(&self, proposer: &UserId) -> Result<Vec<BarterProposal>> {
        let proposals = self.list_proposals().await?;
        Ok(proposals.into_iter().filter(|p| &p.proposer == proposer).collect())
    }

    async fn received_by(&self, receiver: &UserId) -> Result<Vec<BarterProposal>> {
        let proposals = self.list_proposals().await?;
        Ok(proposals.into_iter().filter(|p| &p.receiver == receiver).collect())
    }
}

/// Transitions that touch a proposal and both its properties at once.
///
/// Implementations must apply each call atomically and re-check every
/// precondition against the stored state, not a caller's copy.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Decide a proposal. An accept also reserves both properties.
    async fn record_decision(
        &self,
        id: &ProposalId,
        by: &Decider,
        decision: Decision,
    ) -> Result<BarterProposal>;

    /// Move a stored pending proposal to expert review
    async fn begin_review(&self, id: &ProposalId) -> Result<BarterProposal>;

    /// Mark both properties of an accepted proposal as exchanged
    async fn finalize_exchange(&self, id: &ProposalId) -> Result<()>;
}

/// Everything the marketplace needs from its backing store
pub trait MarketStore: UserDirectory + PropertyStore + ProposalStore + SettlementStore {}

impl<T> MarketStore for T where T: UserDirectory + PropertyStore + ProposalStore + SettlementStore {}
