use crate::error::{MarketError, Result};
use crate::models::{
    BarterProposal, Property, PropertyId, ProposalId, ProposalStatus, User, UserId,
    VerificationStatus,
};
use crate::proposals::{Decider, Decision};
use crate::settlement;
use crate::verification::VerificationStep;
use crate::store::traits::{PropertyStore, ProposalStore, SettlementStore, UserDirectory};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    // Vecs keep insertion order, which listings preserve
    properties: Vec<Property>,
    proposals: Vec<BarterProposal>,
}

impl MemoryState {
    fn property_index(&self, id: &PropertyId) -> Result<usize> {
        self.properties
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| MarketError::not_found("property", id))
    }

    fn proposal_index(&self, id: &ProposalId) -> Result<usize> {
        self.proposals
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| MarketError::not_found("proposal", id))
    }

    /// Mutable access to two distinct properties at once
    fn property_pair(&mut self, a: &PropertyId, b: &PropertyId) -> Result<(&mut Property, &mut Property)> {
        let i = self.property_index(a)?;
        let j = self.property_index(b)?;
        if i == j {
            return Err(MarketError::validation("receiver_property", "a property cannot be swapped with itself"));
        }
        if i < j {
            let (left, right) = self.properties.split_at_mut(j);
            Ok((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.properties.split_at_mut(i);
            Ok((&mut right[0], &mut left[j]))
        }
    }
}

/// In-memory storage for tests, demos and local development.
///
/// One lock guards all collections, so every settlement is atomic.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with users, listings and proposals
    pub fn seeded(users: Vec<User>, properties: Vec<Property>, proposals: Vec<BarterProposal>) -> Self {
        let state = MemoryState {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            properties,
            proposals,
        };
        Self {
            state: RwLock::new(state),
        }
    }

    pub async fn insert_user(&self, user: User) -> Result<()> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&user.id) {
            return Err(MarketError::AlreadyExists {
                kind: "user",
                id: user.id.to_string(),
            });
        }
        state.users.insert(user.id.clone(), user);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn load_user(&self, id: &UserId) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(id).cloned())
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn load_property(&self, id: &PropertyId) -> Result<Option<Property>> {
        let state = self.state.read().await;
        Ok(state.properties.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_properties(&self) -> Result<Vec<Property>> {
        let state = self.state.read().await;
        Ok(state.properties.clone())
    }

    async fn insert_property(&self, property: &Property) -> Result<()> {
        let mut state = self.state.write().await;
        if state.properties.iter().any(|p| p.id == property.id) {
            return Err(MarketError::AlreadyExists {
                kind: "property",
                id: property.id.to_string(),
            });
        }
        state.properties.push(property.clone());
        Ok(())
    }

    async fn advance_verification(&self, id: &PropertyId, step: &VerificationStep) -> Result<VerificationStatus> {
        let mut state = self.state.write().await;
        let idx = state.property_index(id)?;
        state.properties[idx].advance_verification(step)
    }
}

#[async_trait]
impl ProposalStore for MemoryStore {
    async fn load_proposal(&self, id: &ProposalId) -> Result<Option<BarterProposal>> {
        let state = self.state.read().await;
        Ok(state.proposals.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_proposals(&self) -> Result<Vec<BarterProposal>> {
        let state = self.state.read().await;
        Ok(state.proposals.clone())
    }

    async fn insert_proposal(&self, proposal: &BarterProposal) -> Result<()> {
        let mut state = self.state.write().await;
        if state.proposals.iter().any(|p| p.id == proposal.id) {
            return Err(MarketError::AlreadyExists {
                kind: "proposal",
                id: proposal.id.to_string(),
            });
        }
        state.proposals.push(proposal.clone());
        Ok(())
    }
}

#[async_trait]
impl SettlementStore for MemoryStore {
    async fn record_decision(
        &self,
        id: &ProposalId,
        by: &Decider,
        decision: Decision,
    ) -> Result<BarterProposal> {
        let mut state = self.state.write().await;
        let idx = state.proposal_index(id)?;

        // Work on copies and commit only once every check has passed
        let mut proposal = state.proposals[idx].clone();
        let status = proposal.decide(by, decision)?;

        if status == ProposalStatus::Accepted {
            let (offered, target) =
                state.property_pair(&proposal.proposer_property, &proposal.receiver_property)?;
            let (mut offered_next, mut target_next) = (offered.clone(), target.clone());
            settlement::reserve(&proposal, &mut offered_next, &mut target_next)?;
            *offered = offered_next;
            *target = target_next;
            debug!("Reserved {} and {} for proposal {}", proposal.proposer_property, proposal.receiver_property, id);
        }

        state.proposals[idx] = proposal.clone();
        Ok(proposal)
    }

    async fn begin_review(&self, id: &ProposalId) -> Result<BarterProposal> {
        let mut state = self.state.write().await;
        let idx = state.proposal_index(id)?;
        let proposal = &mut state.proposals[idx];
        proposal.begin_review()?;
        Ok(proposal.clone())
    }

    async fn finalize_exchange(&self, id: &ProposalId) -> Result<()> {
        let mut state = self.state.write().await;
        let idx = state.proposal_index(id)?;
        let proposal = state.proposals[idx].clone();

        let (offered, target) = state.property_pair(&proposal.proposer_property, &proposal.receiver_property)?;
        settlement::complete(&proposal, offered, target)
    }
}
