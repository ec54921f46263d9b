use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::listing::{self, SearchFilters};
use crate::models::{BarterProposal, Property, PropertyId, ProposalId, User, UserId, VerificationStatus};
use crate::proposals::{CashFlow, Decider, Decision, Perspective, ProposalDraft};
use crate::registration::RegistrationForm;
use crate::verification::VerificationStep;
use crate::store::{MarketStore, PropertyStore, ProposalStore, SettlementStore, UserDirectory};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One row of a user's sent or received proposals
#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    pub proposal: BarterProposal,
    pub perspective: Perspective,
    pub my_property: Property,
    pub their_property: Property,
    pub counterpart: User,
    pub cash_flow: CashFlow,
}

/// Marketplace operations over a backing store.
///
/// Every mutating call takes the acting user explicitly.
pub struct Marketplace<S> {
    store: Arc<S>,
    config: MarketConfig,
}

impl<S: MarketStore> Marketplace<S> {
    pub fn new(store: Arc<S>, config: MarketConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    // ---- Listings ----

    /// Search with raw form values, honoring the "all" sentinels
    pub async fn search_form(&self, term: &str, city: &str, property_type: &str) -> Result<Vec<Property>> {
        let filters = SearchFilters::from_form(term, city, property_type, &self.config)?;
        self.search(&filters).await
    }

    pub async fn search(&self, filters: &SearchFilters) -> Result<Vec<Property>> {
        let properties = self.store.list_properties().await?;
        let found: Vec<Property> = listing::search(&properties, filters).into_iter().cloned().collect();
        debug!("Search {:?} matched {} of {} properties", filters, found.len(), properties.len());
        Ok(found)
    }

    pub async fn featured(&self) -> Result<Vec<Property>> {
        let properties = self.store.list_properties().await?;
        Ok(listing::featured(&properties, self.config.featured_limit).into_iter().cloned().collect())
    }

    pub async fn recently_listed(&self) -> Result<Vec<Property>> {
        let properties = self.store.list_properties().await?;
        Ok(listing::recently_listed(&properties, self.config.recent_limit).into_iter().cloned().collect())
    }

    pub async fn property(&self, id: &PropertyId) -> Result<Property> {
        self.store.require_property(id).await
    }

    /// The actor's own listings, whatever their trading status
    pub async fn my_properties(&self, actor: &UserId) -> Result<Vec<Property>> {
        self.store.require_user(actor).await?;
        self.store.properties_by_owner(actor).await
    }

    // ---- Registration ----

    /// Validate a registration form and list the new property under the actor
    pub async fn register_property(&self, actor: &UserId, form: &RegistrationForm) -> Result<Property> {
        self.store.require_user(actor).await?;

        let property = form.validate(actor, &self.config).map_err(|err| {
            warn!("Registration by {} rejected: {}", actor, err);
            err
        })?;
        self.store.insert_property(&property).await?;

        info!("Registered property {} ({}) for {}", property.id, property.title, actor);
        Ok(property)
    }

    // ---- Proposals ----

    /// Offer one of the actor's properties for `target`
    pub async fn submit_proposal(
        &self,
        actor: &UserId,
        target: &PropertyId,
        draft: ProposalDraft,
    ) -> Result<BarterProposal> {
        self.store.require_user(actor).await?;
        let target = self.store.require_property(target).await?;

        let offered_id = draft
            .offered_property
            .clone()
            .ok_or_else(|| MarketError::validation("proposer_property", "select one of your properties"))?;
        let offered = self.store.require_property(&offered_id).await?;

        let proposal = draft.into_proposal(actor, &offered, &target).map_err(|err| {
            warn!("Proposal by {} for {} rejected: {}", actor, target.id, err);
            err
        })?;
        self.store.insert_proposal(&proposal).await?;

        info!(
            "Proposal {} sent: {} offers {} for {}",
            proposal.id, actor, proposal.proposer_property, proposal.receiver_property
        );
        Ok(proposal)
    }

    /// Receiver accepts or rejects a pending proposal.
    ///
    /// Accepting reserves both properties in the same step.
    pub async fn decide_proposal(
        &self,
        actor: &UserId,
        id: &ProposalId,
        decision: Decision,
    ) -> Result<BarterProposal> {
        self.record(id, &Decider::Receiver(actor.clone()), decision).await
    }

    /// Expert review takes over a pending proposal
    pub async fn begin_review(&self, id: &ProposalId) -> Result<BarterProposal> {
        let proposal = self.store.begin_review(id).await.map_err(|err| {
            warn!("Review of proposal {} not started: {}", id, err);
            err
        })?;
        info!("Proposal {} moved to expert review", id);
        Ok(proposal)
    }

    /// Expert verdict on a proposal in review
    pub async fn conclude_review(&self, id: &ProposalId, decision: Decision) -> Result<BarterProposal> {
        self.record(id, &Decider::Expert, decision).await
    }

    async fn record(&self, id: &ProposalId, by: &Decider, decision: Decision) -> Result<BarterProposal> {
        match self.store.record_decision(id, by, decision).await {
            Ok(proposal) => {
                info!("Proposal {} is now {:?} ({:?})", id, proposal.status, by);
                Ok(proposal)
            }
            Err(err) => {
                warn!("Decision {:?} on proposal {} by {:?} failed: {}", decision, id, by, err);
                Err(err)
            }
        }
    }

    /// Settlement authority closes an accepted deal
    pub async fn complete_exchange(&self, id: &ProposalId) -> Result<()> {
        self.store.finalize_exchange(id).await?;
        info!("Proposal {} settled, both properties exchanged", id);
        Ok(())
    }

    pub async fn sent_proposals(&self, actor: &UserId) -> Result<Vec<ProposalSummary>> {
        let proposals = self.store.sent_by(actor).await?;
        self.summarize(proposals, Perspective::Sent).await
    }

    pub async fn received_proposals(&self, actor: &UserId) -> Result<Vec<ProposalSummary>> {
        let proposals = self.store.received_by(actor).await?;
        self.summarize(proposals, Perspective::Received).await
    }

    async fn summarize(&self, proposals: Vec<BarterProposal>, perspective: Perspective) -> Result<Vec<ProposalSummary>> {
        let mut summaries = Vec::with_capacity(proposals.len());
        for proposal in proposals {
            let (mine, theirs) = proposal.properties_for(perspective);
            let my_property = self.store.require_property(mine).await?;
            let their_property = self.store.require_property(theirs).await?;
            let counterpart = match perspective {
                Perspective::Sent => &proposal.receiver,
                Perspective::Received => &proposal.proposer,
            };
            let counterpart = self.store.require_user(counterpart).await?;
            let cash_flow = proposal.cash_flow(perspective);

            summaries.push(ProposalSummary {
                proposal,
                perspective,
                my_property,
                their_property,
                counterpart,
                cash_flow,
            });
        }
        Ok(summaries)
    }

    // ---- Verification ----

    /// Owner requests expert verification of a listing
    pub async fn submit_for_verification(&self, actor: &UserId, id: &PropertyId) -> Result<VerificationStatus> {
        let step = VerificationStep::Submit(actor.clone());
        let status = self.store.advance_verification(id, &step).await.map_err(|err| {
            warn!("Verification request for {} by {} rejected: {}", id, actor, err);
            err
        })?;
        info!("Property {} submitted for verification by {}", id, actor);
        Ok(status)
    }

    /// Verification authority marks a pending listing verified
    pub async fn complete_verification(&self, id: &PropertyId) -> Result<VerificationStatus> {
        let status = self.store.advance_verification(id, &VerificationStep::Complete).await?;
        info!("Property {} verified", id);
        Ok(status)
    }

    pub async fn verification_status(&self, id: &PropertyId) -> Result<VerificationStatus> {
        Ok(self.store.require_property(id).await?.verification())
    }
}
