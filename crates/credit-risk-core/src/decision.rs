use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Zone;

/// Final recommendation merged from the Altman and Merton zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditDecision {
    Approved,
    ApprovedWithCaution,
    AnalysisRequired,
    Dismissed,
}

impl fmt::Display for CreditDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "Approved"),
            Self::ApprovedWithCaution => write!(f, "Approved with Caution"),
            Self::AnalysisRequired => write!(f, "Analysis Required"),
            Self::Dismissed => write!(f, "Dismissed"),
        }
    }
}

/// Merge the two zone classifications.
///
/// A Distress signal from either model dismisses the request; that check runs
/// before anything else.
pub fn combine(altman_zone: Zone, merton_zone: Zone) -> CreditDecision {
    if altman_zone == Zone::Distress || merton_zone == Zone::Distress {
        return CreditDecision::Dismissed;
    }
    match (altman_zone, merton_zone) {
        (Zone::Safe, Zone::Safe) => CreditDecision::Approved,
        (Zone::Grey, Zone::Grey) => CreditDecision::AnalysisRequired,
        // Only (Safe, Grey) and (Grey, Safe) remain.
        _ => CreditDecision::ApprovedWithCaution,
    }
}
