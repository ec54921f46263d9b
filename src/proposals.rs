use crate::error::{MarketError, Result};
use crate::models::{BarterProposal, Property, PropertyId, ProposalId, ProposalStatus, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What a would-be trader fills in when making an offer on a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalDraft {
    /// One of the proposer's own properties
    pub offered_property: Option<PropertyId>,
    pub message: String,
    pub cash_difference: Option<i64>,
}

impl ProposalDraft {
    /// Turn the draft into a pending proposal of `offered` for `target`.
    ///
    /// `offered` must be the property named by the draft and belong to `proposer`.
    pub fn into_proposal(self, proposer: &UserId, offered: &Property, target: &Property) -> Result<BarterProposal> {
        let offered_id = self
            .offered_property
            .ok_or_else(|| MarketError::validation("proposer_property", "select one of your properties"))?;
        if offered_id != offered.id {
            return Err(MarketError::validation(
                "proposer_property",
                format!("expected {}, got {}", offered_id, offered.id),
            ));
        }

        if !offered.is_owned_by(proposer) {
            return Err(MarketError::unauthorized(proposer, "offer a property they do not own"));
        }
        if target.is_owned_by(proposer) {
            return Err(MarketError::validation(
                "receiver_property",
                "cannot propose a barter for your own property",
            ));
        }

        if !offered.is_available() {
            return Err(MarketError::invalid_state("property", &offered.id, offered.status, "offer"));
        }
        if !target.is_available() {
            return Err(MarketError::invalid_state(
                "property",
                &target.id,
                target.status,
                "propose a barter for",
            ));
        }

        Ok(BarterProposal {
            id: ProposalId::generate(),
            proposer: proposer.clone(),
            proposer_property: offered.id.clone(),
            receiver: target.owner.clone(),
            receiver_property: target.id.clone(),
            status: ProposalStatus::Pending,
            message: self.message.trim().to_string(),
            cash_difference: self.cash_difference.filter(|amount| *amount != 0),
            created_at: Utc::now(),
            decided_at: None,
        })
    }
}

/// Outcome chosen by the receiver or the expert reviewer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    fn status(self) -> ProposalStatus {
        match self {
            Decision::Accept => ProposalStatus::Accepted,
            Decision::Reject => ProposalStatus::Rejected,
        }
    }
}

/// Who is deciding a proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decider {
    /// The proposal's receiver, deciding a pending proposal
    Receiver(UserId),
    /// The expert reviewer, concluding a proposal in review
    Expert,
}

/// Which side of a proposal the viewing user is on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Sent,
    Received,
}

/// Cash movement seen from one side of the deal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CashFlow {
    Pays(i64),
    Receives(i64),
    Even,
}

impl BarterProposal {
    /// Receiver's accept or reject. Only a pending proposal can be decided.
    pub fn evaluate(&mut self, actor: &UserId, decision: Decision) -> Result<ProposalStatus> {
        if actor != &self.receiver {
            return Err(MarketError::unauthorized(actor, "decide a proposal they did not receive"));
        }
        if self.status != ProposalStatus::Pending {
            return Err(MarketError::invalid_state("proposal", &self.id, self.status, "decide"));
        }
        self.finish(decision);
        Ok(self.status)
    }

    /// Route a decision to the receiver or expert flow
    pub fn decide(&mut self, by: &Decider, decision: Decision) -> Result<ProposalStatus> {
        match by {
            Decider::Receiver(actor) => self.evaluate(actor, decision),
            Decider::Expert => self.conclude_review(decision),
        }
    }

    /// Hand a pending proposal over to expert review
    pub fn begin_review(&mut self) -> Result<()> {
        if self.status != ProposalStatus::Pending {
            return Err(MarketError::invalid_state("proposal", &self.id, self.status, "send to review"));
        }
        self.status = ProposalStatus::InReview;
        Ok(())
    }

    /// Expert verdict on a proposal under review
    pub fn conclude_review(&mut self, decision: Decision) -> Result<ProposalStatus> {
        if self.status != ProposalStatus::InReview {
            return Err(MarketError::invalid_state("proposal", &self.id, self.status, "conclude review of"));
        }
        self.finish(decision);
        Ok(self.status)
    }

    fn finish(&mut self, decision: Decision) {
        self.status = decision.status();
        self.decided_at = Some(Utc::now());
    }

    /// Side of the deal `user` is on, if any
    pub fn perspective_of(&self, user: &UserId) -> Option<Perspective> {
        if &self.proposer == user {
            Some(Perspective::Sent)
        } else if &self.receiver == user {
            Some(Perspective::Received)
        } else {
            None
        }
    }

    pub fn cash_flow(&self, perspective: Perspective) -> CashFlow {
        let amount = self.cash_difference.unwrap_or(0);
        let signed = match perspective {
            Perspective::Sent => amount,
            Perspective::Received => -amount,
        };
        match signed {
            0 => CashFlow::Even,
            s if s > 0 => CashFlow::Pays(s),
            s => CashFlow::Receives(-s),
        }
    }

    /// True when the viewing side hands over cash
    pub fn is_payment_by_user(&self, perspective: Perspective) -> bool {
        matches!(self.cash_flow(perspective), CashFlow::Pays(_))
    }

    /// The viewer's own property and the counterpart's, in that order
    pub fn properties_for(&self, perspective: Perspective) -> (&PropertyId, &PropertyId) {
        match perspective {
            Perspective::Sent => (&self.proposer_property, &self.receiver_property),
            Perspective::Received => (&self.receiver_property, &self.proposer_property),
        }
    }
}
