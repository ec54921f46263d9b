use crate::error::{MarketError, Result};
use crate::models::{Property, UserId, VerificationStatus};

/// A forward move in a listing's verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStep {
    /// The owner asks for review
    Submit(UserId),
    /// The verification authority signs off
    Complete,
}

impl Property {
    pub fn advance_verification(&mut self, step: &VerificationStep) -> Result<VerificationStatus> {
        match step {
            VerificationStep::Submit(actor) => self.submit_for_verification(actor),
            VerificationStep::Complete => self.complete_verification(),
        }
    }

    /// Owner asks for expert review: unverified -> pending.
    ///
    /// Re-submitting a pending or verified listing fails rather than regressing it.
    pub fn submit_for_verification(&mut self, actor: &UserId) -> Result<VerificationStatus> {
        if !self.is_owned_by(actor) {
            return Err(MarketError::unauthorized(actor, "submit someone else's property for verification"));
        }
        advance(self, VerificationStatus::Unverified, VerificationStatus::Pending, "submit for verification")
    }

    /// Verification authority signs off: pending -> verified
    pub fn complete_verification(&mut self) -> Result<VerificationStatus> {
        advance(self, VerificationStatus::Pending, VerificationStatus::Verified, "complete verification of")
    }
}

fn advance(
    property: &mut Property,
    from: VerificationStatus,
    to: VerificationStatus,
    action: &'static str,
) -> Result<VerificationStatus> {
    let current = property.verification();
    if current != from {
        return Err(MarketError::invalid_state("property", &property.id, current, action));
    }
    property.verification_status = Some(to);
    Ok(to)
}
