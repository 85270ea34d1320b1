use clap::Args;
use serde_json::Value;

use credit_risk_core::{combine, Zone};

/// Arguments for merging two zone classifications
#[derive(Args)]
pub struct CombineArgs {
    /// Altman zone: safe, grey or distress
    #[arg(long)]
    pub altman: Zone,

    /// Merton zone: safe, grey or distress
    #[arg(long)]
    pub merton: Zone,
}

pub fn run_combine(args: CombineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let decision = combine(args.altman, args.merton);
    Ok(serde_json::json!({
        "altman_zone": args.altman,
        "merton_zone": args.merton,
        "decision": decision,
        "decision_label": decision.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grey_and_safe() {
        let value = run_combine(CombineArgs {
            altman: Zone::Grey,
            merton: Zone::Safe,
        })
        .unwrap();
        assert_eq!(value["decision"], "ApprovedWithCaution");
        assert_eq!(value["decision_label"], "Approved with Caution");
    }
}
