use crate::error::{MarketError, Result};
use crate::models::{BarterProposal, Property, PropertyStatus, ProposalStatus};

/// Move both sides of an accepted proposal from available to pending deal.
///
/// Checks both properties before touching either, so a failure leaves everything as it was.
pub fn reserve(proposal: &BarterProposal, offered: &mut Property, target: &mut Property) -> Result<()> {
    if proposal.status != ProposalStatus::Accepted {
        return Err(MarketError::invalid_state("proposal", &proposal.id, proposal.status, "settle"));
    }
    check_sides(proposal, offered, target)?;

    for property in [&*offered, &*target] {
        if property.status != PropertyStatus::Available {
            return Err(MarketError::invalid_state("property", &property.id, property.status, "reserve"));
        }
    }

    offered.status = PropertyStatus::PendingDeal;
    target.status = PropertyStatus::PendingDeal;
    Ok(())
}

/// Close the deal: both reserved properties become exchanged
pub fn complete(proposal: &BarterProposal, offered: &mut Property, target: &mut Property) -> Result<()> {
    if proposal.status != ProposalStatus::Accepted {
        return Err(MarketError::invalid_state("proposal", &proposal.id, proposal.status, "complete exchange of"));
    }
    check_sides(proposal, offered, target)?;

    for property in [&*offered, &*target] {
        if property.status != PropertyStatus::PendingDeal {
            return Err(MarketError::invalid_state("property", &property.id, property.status, "exchange"));
        }
    }

    offered.status = PropertyStatus::Exchanged;
    target.status = PropertyStatus::Exchanged;
    Ok(())
}

fn check_sides(proposal: &BarterProposal, offered: &Property, target: &Property) -> Result<()> {
    if offered.id != proposal.proposer_property || !offered.is_owned_by(&proposal.proposer) {
        return Err(MarketError::validation("proposer_property", "does not match the proposal"));
    }
    if target.id != proposal.receiver_property || !target.is_owned_by(&proposal.receiver) {
        return Err(MarketError::validation("receiver_property", "does not match the proposal"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::fixture;
    use crate::models::{PropertyType, UserId};
    use crate::proposals::{Decision, ProposalDraft};

    fn accepted() -> (BarterProposal, Property, Property) {
        let offered = fixture("a", "u1", "Tehran", PropertyType::Apartment);
        let target = fixture("b", "u2", "Shiraz", PropertyType::Villa);
        let mut proposal = ProposalDraft {
            offered_property: Some(offered.id.clone()),
            ..Default::default()
        }
        .into_proposal(&UserId::from("u1"), &offered, &target)
        .unwrap();
        proposal.evaluate(&UserId::from("u2"), Decision::Accept).unwrap();
        (proposal, offered, target)
    }

    #[test]
    fn reserve_then_complete() {
        let (proposal, mut offered, mut target) = accepted();

        reserve(&proposal, &mut offered, &mut target).unwrap();
        assert_eq!(offered.status, PropertyStatus::PendingDeal);
        assert_eq!(target.status, PropertyStatus::PendingDeal);

        complete(&proposal, &mut offered, &mut target).unwrap();
        assert_eq!(offered.status, PropertyStatus::Exchanged);
        assert_eq!(target.status, PropertyStatus::Exchanged);
    }

    #[test]
    fn reserve_is_all_or_nothing() {
        let (proposal, mut offered, mut target) = accepted();
        target.status = PropertyStatus::PendingDeal;

        assert!(reserve(&proposal, &mut offered, &mut target).unwrap_err().is_invalid_state());
        assert_eq!(offered.status, PropertyStatus::Available);
    }

    #[test]
    fn complete_requires_reservation() {
        let (proposal, mut offered, mut target) = accepted();
        assert!(complete(&proposal, &mut offered, &mut target).unwrap_err().is_invalid_state());
    }

    #[test]
    fn mismatched_property_is_rejected() {
        let (proposal, _, mut target) = accepted();
        let mut stranger = fixture("z", "u9", "Tabas", PropertyType::Land);
        let err = reserve(&proposal, &mut stranger, &mut target).unwrap_err();
        assert_eq!(err.field(), Some("proposer_property"));
    }
}
