use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::RatioSet;
use crate::types::{FirmType, Zone};
use crate::{CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltmanResult {
    pub variant: FirmType,
    pub model: String,
    pub score: Decimal,
    pub zone: Zone,
    pub ratios: RatioSet,
    pub components: Vec<ZScoreComponent>,
    /// (distress_upper_bound, safe_lower_bound)
    pub zone_thresholds: (Decimal, Decimal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreComponent {
    pub name: String,
    pub ratio: Decimal,
    pub coefficient: Decimal,
    pub weighted_value: Decimal,
}

// ---------------------------------------------------------------------------
// Coefficient table
// ---------------------------------------------------------------------------

/// One row of the published Altman reference table.
#[derive(Debug)]
struct Variant {
    model: &'static str,
    /// Score symbol used in the formula text.
    symbol: &'static str,
    x4_symbol: &'static str,
    x4_label: &'static str,
    /// Weights on X1..X4.
    weights: [Decimal; 4],
    /// Weight on X5, `None` when the variant omits turnover.
    turnover_weight: Option<Decimal>,
    distress_below: Decimal,
    safe_above: Decimal,
}

static CLASSIC: Variant = Variant {
    model: "Z-Score (Public Manufacturing)",
    symbol: "Z",
    x4_symbol: "X4",
    x4_label: "X4: Market Value of Equity / Total Liabilities",
    weights: [dec!(1.2), dec!(1.4), dec!(3.3), dec!(0.6)],
    turnover_weight: Some(dec!(1.0)),
    distress_below: dec!(1.81),
    safe_above: dec!(2.99),
};

static PRIME: Variant = Variant {
    model: "Z'-Score (Private / Non-Manufacturing)",
    symbol: "Z'",
    x4_symbol: "X4'",
    x4_label: "X4': Book Equity / Total Liabilities",
    weights: [dec!(0.717), dec!(0.847), dec!(3.107), dec!(0.420)],
    turnover_weight: Some(dec!(0.998)),
    distress_below: dec!(1.1),
    safe_above: dec!(2.6),
};

static DOUBLE_PRIME: Variant = Variant {
    model: "Z''-Score (Emerging Markets)",
    symbol: "Z''",
    x4_symbol: "X4'",
    x4_label: "X4': Book Equity / Total Liabilities",
    weights: [dec!(6.56), dec!(3.26), dec!(6.72), dec!(1.05)],
    turnover_weight: None,
    distress_below: dec!(1.1),
    safe_above: dec!(2.6),
};

fn variant(firm_type: FirmType) -> &'static Variant {
    match firm_type {
        FirmType::PublicManufacturing => &CLASSIC,
        FirmType::PrivateOrNonManufacturing => &PRIME,
        FirmType::EmergingMarket => &DOUBLE_PRIME,
    }
}

const RATIO_LABELS: [&str; 3] = [
    "X1: Working Capital / Total Assets",
    "X2: Retained Earnings / Total Assets",
    "X3: EBIT / Total Assets",
];
const X5_LABEL: &str = "X5: Revenue / Total Assets";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply the firm type's coefficient vector to a ratio set.
pub fn score(ratios: &RatioSet, firm_type: FirmType) -> CreditRiskResult<AltmanResult> {
    if ratios.firm_type != firm_type {
        return Err(CreditRiskError::InvalidInput {
            field: "ratios.firm_type".into(),
            reason: format!(
                "Ratios were extracted for {} but scored as {}; X4 definitions differ.",
                ratios.firm_type, firm_type
            ),
        });
    }

    let v = variant(firm_type);
    let base = [ratios.x1, ratios.x2, ratios.x3, ratios.x4];

    let mut components: Vec<ZScoreComponent> = RATIO_LABELS
        .iter()
        .chain(std::iter::once(&v.x4_label))
        .zip(base.iter().zip(v.weights.iter()))
        .map(|(name, (&ratio, &coefficient))| build_component(name, ratio, coefficient))
        .collect();

    if let Some(weight) = v.turnover_weight {
        let x5 = ratios.x5.ok_or_else(|| CreditRiskError::MissingField {
            field: "x5".into(),
        })?;
        components.push(build_component(X5_LABEL, x5, weight));
    }

    let score: Decimal = components.iter().map(|c| c.weighted_value).sum();
    let zone = classify(score, firm_type);

    tracing::debug!(
        model = v.model,
        score = %score,
        zone = %zone,
        "altman score computed"
    );

    Ok(AltmanResult {
        variant: firm_type,
        model: v.model.to_string(),
        score,
        zone,
        ratios: ratios.clone(),
        components,
        zone_thresholds: (v.distress_below, v.safe_above),
    })
}

/// Zone for a score under the firm type's thresholds. Grey is closed at
/// both ends.
pub fn classify(score: Decimal, firm_type: FirmType) -> Zone {
    let v = variant(firm_type);
    if score > v.safe_above {
        Zone::Safe
    } else if score < v.distress_below {
        Zone::Distress
    } else {
        Zone::Grey
    }
}

/// (distress_upper_bound, safe_lower_bound) for the firm type.
pub fn thresholds(firm_type: FirmType) -> (Decimal, Decimal) {
    let v = variant(firm_type);
    (v.distress_below, v.safe_above)
}

/// Human-readable formula of the variant, rendered from the coefficient
/// table.
pub fn formula(firm_type: FirmType) -> String {
    let v = variant(firm_type);
    let [w1, w2, w3, w4] = v.weights;
    let mut text = format!(
        "{} = {w1}*X1 + {w2}*X2 + {w3}*X3 + {w4}*{}",
        v.symbol, v.x4_symbol
    );
    if let Some(w5) = v.turnover_weight {
        text.push_str(&format!(" + {w5}*X5"));
    }
    text
}

fn build_component(name: &str, ratio: Decimal, coefficient: Decimal) -> ZScoreComponent {
    ZScoreComponent {
        name: name.to_string(),
        ratio,
        coefficient,
        weighted_value: coefficient * ratio,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios(firm_type: FirmType, x: [Decimal; 4], x5: Option<Decimal>) -> RatioSet {
        RatioSet {
            firm_type,
            x1: x[0],
            x2: x[1],
            x3: x[2],
            x4: x[3],
            x5,
        }
    }

    #[test]
    fn test_grey_zone_public() {
        // Z = 0.12 + 0.07 + 0.066 + 0.48 + 1.2 = 1.936
        let r = ratios(
            FirmType::PublicManufacturing,
            [dec!(0.10), dec!(0.05), dec!(0.02), dec!(0.8)],
            Some(dec!(1.2)),
        );
        let out = score(&r, FirmType::PublicManufacturing).unwrap();
        assert_eq!(out.score, dec!(1.936));
        assert_eq!(out.zone, Zone::Grey);
        assert_eq!(out.variant, FirmType::PublicManufacturing);
    }

    #[test]
    fn test_coefficients_correct() {
        let r = ratios(
            FirmType::PublicManufacturing,
            [dec!(0.2), dec!(0.3), dec!(0.1), dec!(2)],
            Some(dec!(1.5)),
        );
        let out = score(&r, FirmType::PublicManufacturing).unwrap();

        assert_eq!(out.components.len(), 5);
        // X1: 1.2 * 0.2 = 0.24
        assert_eq!(out.components[0].coefficient, dec!(1.2));
        assert_eq!(out.components[0].weighted_value, dec!(0.24));
        // X4: 0.6 * 2.0 = 1.2
        assert_eq!(out.components[3].coefficient, dec!(0.6));
        assert_eq!(out.components[3].weighted_value, dec!(1.2));
        // X5: 1.0 * 1.5 = 1.5
        assert_eq!(out.components[4].weighted_value, dec!(1.5));

        // 0.24 + 0.42 + 0.33 + 1.2 + 1.5 = 3.69
        assert_eq!(out.score, dec!(3.69));
        assert_eq!(out.zone, Zone::Safe);
    }

    #[test]
    fn test_private_coefficients() {
        let r = ratios(
            FirmType::PrivateOrNonManufacturing,
            [dec!(1), dec!(1), dec!(1), dec!(1)],
            Some(dec!(1)),
        );
        let out = score(&r, FirmType::PrivateOrNonManufacturing).unwrap();
        // 0.717 + 0.847 + 3.107 + 0.420 + 0.998
        assert_eq!(out.score, dec!(6.089));
        assert_eq!(out.zone_thresholds, (dec!(1.1), dec!(2.6)));
    }

    #[test]
    fn test_emerging_market_has_four_components() {
        let r = ratios(
            FirmType::EmergingMarket,
            [dec!(0.05), dec!(0.05), dec!(0.02), dec!(0.3)],
            None,
        );
        let out = score(&r, FirmType::EmergingMarket).unwrap();
        assert_eq!(out.components.len(), 4, "Z'' should have 4 components (no X5)");
        // 0.328 + 0.163 + 0.1344 + 0.315 = 0.9404
        assert_eq!(out.score, dec!(0.9404));
        assert_eq!(out.zone, Zone::Distress);
    }

    #[test]
    fn test_emerging_market_ignores_stray_x5() {
        let r = ratios(
            FirmType::EmergingMarket,
            [dec!(0.1), dec!(0.1), dec!(0.1), dec!(1)],
            Some(dec!(50)),
        );
        let out = score(&r, FirmType::EmergingMarket).unwrap();
        assert_eq!(out.components.len(), 4);
    }

    #[test]
    fn test_missing_x5_for_public() {
        let r = ratios(
            FirmType::PublicManufacturing,
            [dec!(0.1), dec!(0.1), dec!(0.1), dec!(1)],
            None,
        );
        let err = score(&r, FirmType::PublicManufacturing).unwrap_err();
        assert!(matches!(err, CreditRiskError::MissingField { .. }));
    }

    #[test]
    fn test_firm_type_mismatch_rejected() {
        let r = ratios(
            FirmType::PrivateOrNonManufacturing,
            [dec!(0.1), dec!(0.1), dec!(0.1), dec!(1)],
            Some(dec!(1)),
        );
        let err = score(&r, FirmType::PublicManufacturing).unwrap_err();
        match err {
            CreditRiskError::InvalidInput { field, .. } => assert_eq!(field, "ratios.firm_type"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_boundaries_public() {
        let ft = FirmType::PublicManufacturing;
        assert_eq!(classify(dec!(2.99), ft), Zone::Grey);
        assert_eq!(classify(dec!(2.9900001), ft), Zone::Safe);
        assert_eq!(classify(dec!(1.81), ft), Zone::Grey);
        assert_eq!(classify(dec!(1.8099999), ft), Zone::Distress);
    }

    #[test]
    fn test_boundaries_private_and_emerging() {
        for ft in [FirmType::PrivateOrNonManufacturing, FirmType::EmergingMarket] {
            assert_eq!(classify(dec!(2.6), ft), Zone::Grey);
            assert_eq!(classify(dec!(2.61), ft), Zone::Safe);
            assert_eq!(classify(dec!(1.1), ft), Zone::Grey);
            assert_eq!(classify(dec!(1.09), ft), Zone::Distress);
        }
    }

    #[test]
    fn test_negative_score_is_distress() {
        assert_eq!(classify(dec!(-3), FirmType::EmergingMarket), Zone::Distress);
    }

    #[test]
    fn test_formula_text_follows_table() {
        assert_eq!(
            formula(FirmType::PublicManufacturing),
            "Z = 1.2*X1 + 1.4*X2 + 3.3*X3 + 0.6*X4 + 1.0*X5"
        );
        assert_eq!(
            formula(FirmType::PrivateOrNonManufacturing),
            "Z' = 0.717*X1 + 0.847*X2 + 3.107*X3 + 0.420*X4' + 0.998*X5"
        );
        assert_eq!(
            formula(FirmType::EmergingMarket),
            "Z'' = 6.56*X1 + 3.26*X2 + 6.72*X3 + 1.05*X4'"
        );
    }
}
