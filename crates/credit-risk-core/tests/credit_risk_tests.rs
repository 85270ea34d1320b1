use credit_risk_core::altman::{self, RatioSet};
use credit_risk_core::evaluation::{self, InMemoryProvider};
use credit_risk_core::statements::{
    AssetHistory, CompanyFinancials, FinancialSnapshot, HistoryOrder, ReportingFrequency,
};
use credit_risk_core::structural::{self, MertonInputs};
use credit_risk_core::{
    combine, CreditDecision, CreditRiskError, EngineConfig, ErrorKind, FirmType, Ticker, Zone,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn snapshot() -> FinancialSnapshot {
    FinancialSnapshot {
        period_end: None,
        total_assets: dec!(10_000_000),
        working_capital: dec!(1_000_000),
        retained_earnings: dec!(500_000),
        ebit: dec!(200_000),
        total_revenue: dec!(12_000_000),
        total_liabilities: dec!(5_000_000),
        current_liabilities: dec!(2_000_000),
        stockholders_equity: dec!(5_000_000),
        market_value_of_equity: Some(dec!(4_000_000)),
    }
}

fn company(symbol: &str) -> CompanyFinancials {
    CompanyFinancials {
        ticker: Ticker::new(symbol).unwrap(),
        period_end: None,
        total_assets: Some(dec!(10_000_000)),
        working_capital: Some(dec!(1_000_000)),
        retained_earnings: Some(dec!(500_000)),
        ebit: Some(dec!(200_000)),
        total_revenue: Some(dec!(12_000_000)),
        total_liabilities: Some(dec!(5_000_000)),
        current_liabilities: Some(dec!(2_000_000)),
        stockholders_equity: Some(dec!(5_000_000)),
        share_price: Some(dec!(40)),
        shares_outstanding: Some(dec!(100_000)),
        asset_history: vec![
            dec!(10_000_000),
            dec!(9_500_000),
            dec!(9_800_000),
            dec!(9_000_000),
        ],
        history_order: HistoryOrder::NewestFirst,
        frequency: ReportingFrequency::Annual,
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_scenario_a_merton_reference_firm() {
    let out = structural::score(&MertonInputs {
        asset_value: dec!(1_000_000_000),
        default_barrier: dec!(200_000_000),
        asset_volatility: dec!(0.25),
        risk_free_rate: dec!(0.04),
        horizon_years: dec!(2),
    })
    .unwrap();
    assert!((out.distance_to_default - 4.60).abs() < 0.01);
    assert!(out.default_probability < 1e-5);
    assert_eq!(out.zone, Zone::Safe);
}

#[test]
fn test_scenario_b_public_grey_zone() {
    let ratios = RatioSet {
        firm_type: FirmType::PublicManufacturing,
        x1: dec!(0.10),
        x2: dec!(0.05),
        x3: dec!(0.02),
        x4: dec!(0.8),
        x5: Some(dec!(1.2)),
    };
    let out = altman::score(&ratios, FirmType::PublicManufacturing).unwrap();
    assert_eq!(out.score, dec!(1.936));
    assert_eq!(out.zone, Zone::Grey);
}

#[test]
fn test_scenario_c_grey_and_safe() {
    assert_eq!(combine(Zone::Grey, Zone::Safe), CreditDecision::ApprovedWithCaution);
}

#[test]
fn test_scenario_d_zero_total_assets() {
    let mut snap = snapshot();
    snap.total_assets = Decimal::ZERO;
    for ft in FirmType::ALL {
        let err = altman::extract(&snap, ft).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero, "{ft:?}");
    }
}

#[test]
fn test_scenario_b_reached_from_statements() {
    // Statements that reproduce the scenario B ratios exactly.
    let snap = FinancialSnapshot {
        period_end: None,
        total_assets: dec!(1_000),
        working_capital: dec!(100),
        retained_earnings: dec!(50),
        ebit: dec!(20),
        total_revenue: dec!(1_200),
        total_liabilities: dec!(500),
        current_liabilities: dec!(200),
        stockholders_equity: dec!(500),
        market_value_of_equity: Some(dec!(400)),
    };
    let ratios = altman::extract(&snap, FirmType::PublicManufacturing).unwrap();
    let out = altman::score(&ratios, FirmType::PublicManufacturing).unwrap();
    assert_eq!(out.score, dec!(1.936));
}

// ===========================================================================
// Pipeline
// ===========================================================================

#[test]
fn test_assess_snapshot_and_history() {
    let history = AssetHistory::new(
        vec![dec!(9_000_000), dec!(9_800_000), dec!(9_500_000), dec!(10_000_000)],
        HistoryOrder::OldestFirst,
        ReportingFrequency::Annual,
    )
    .unwrap();
    let outcomes = evaluation::assess(
        &snapshot(),
        &history,
        FirmType::PublicManufacturing,
        &EngineConfig::default(),
    )
    .unwrap();
    let altman = outcomes.altman.as_ref().unwrap();
    // Z = 0.12 + 0.07 + 0.066 + 0.48 + 1.2 = 1.936
    assert_eq!(altman.score, dec!(1.936));
    assert_eq!(altman.zone, Zone::Grey);
    let merton = outcomes.merton.as_ref().unwrap();
    assert_eq!(merton.inputs.asset_value, dec!(10_000_000));
    assert_eq!(merton.inputs.default_barrier, dec!(2_000_000));
    assert_eq!(merton.result.zone, Zone::Safe);
    assert_eq!(outcomes.decision().unwrap(), CreditDecision::ApprovedWithCaution);
}

#[test]
fn test_assess_matches_assess_financials() {
    let f = company("same");
    let via_record =
        evaluation::assess_financials(&f, FirmType::EmergingMarket, &EngineConfig::default())
            .unwrap();
    let via_parts = evaluation::assess(
        &f.snapshot().unwrap(),
        &f.asset_history().unwrap(),
        FirmType::EmergingMarket,
        &EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(via_record.altman, via_parts.altman);
    assert_eq!(via_record.merton, via_parts.merton);
}

#[test]
fn test_evaluate_is_deterministic() {
    let provider = InMemoryProvider::new().with(company("DET"));
    let cfg = EngineConfig::default();
    let first = evaluation::evaluate(&provider, "DET", FirmType::PublicManufacturing, &cfg).unwrap();
    let second = evaluation::evaluate(&provider, "DET", FirmType::PublicManufacturing, &cfg).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.result.merton.default_probability.to_bits(),
        second.result.merton.default_probability.to_bits()
    );
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_evaluate_unknown_ticker() {
    let provider = InMemoryProvider::new();
    let err = evaluation::evaluate(
        &provider,
        "GHOST",
        FirmType::PublicManufacturing,
        &EngineConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataUnavailable);
}

#[test]
fn test_evaluate_empty_ticker() {
    let provider = InMemoryProvider::new().with(company("X"));
    let err = evaluation::evaluate(&provider, "  ", FirmType::EmergingMarket, &EngineConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_public_without_market_data_is_missing_field() {
    let mut f = company("NOPX");
    f.share_price = None;
    let provider = InMemoryProvider::new().with(f);
    let err = evaluation::evaluate(
        &provider,
        "NOPX",
        FirmType::PublicManufacturing,
        &EngineConfig::default(),
    )
    .unwrap_err();
    match err {
        CreditRiskError::MissingField { field } => assert_eq!(field, "market_value_of_equity"),
        other => panic!("Expected MissingField, got {other:?}"),
    }
    // Book-equity variants do not need a share price.
    assert!(evaluation::evaluate(
        &provider,
        "NOPX",
        FirmType::PrivateOrNonManufacturing,
        &EngineConfig::default()
    )
    .is_ok());
}

#[test]
fn test_short_history_keeps_altman_result() {
    let mut f = company("SHRT");
    f.asset_history = vec![dec!(10_000_000), dec!(9_000_000)];
    let outcomes =
        evaluation::assess_financials(&f, FirmType::PrivateOrNonManufacturing, &EngineConfig::default())
            .unwrap();
    assert!(outcomes.altman.is_ok());
    let err = outcomes.merton.as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientHistory);
    assert!(err.is_structural_risk_unavailable());
    assert!(outcomes.decision().is_err());
}

#[test]
fn test_distress_altman_dismisses_regardless_of_merton() {
    let mut f = company("DSTR");
    f.working_capital = Some(dec!(-3_000_000));
    f.retained_earnings = Some(dec!(-4_000_000));
    f.ebit = Some(dec!(-500_000));
    let out = evaluation::evaluate_financials(&f, FirmType::EmergingMarket, &EngineConfig::default())
        .unwrap();
    assert_eq!(out.result.altman.zone, Zone::Distress);
    assert_eq!(out.result.decision, CreditDecision::Dismissed);
    assert!(out.warnings.iter().any(|w| w.contains("EBIT")));
}

#[test]
fn test_config_changes_merton_only() {
    let f = company("CFG");
    let base = evaluation::evaluate_financials(&f, FirmType::PublicManufacturing, &EngineConfig::default())
        .unwrap();
    let mut cfg = EngineConfig::default();
    cfg.merton.horizon_years = dec!(5);
    let longer = evaluation::evaluate_financials(&f, FirmType::PublicManufacturing, &cfg).unwrap();
    assert_eq!(base.result.altman, longer.result.altman);
    assert_ne!(
        base.result.merton.distance_to_default,
        longer.result.merton.distance_to_default
    );
    assert_eq!(longer.result.merton_inputs.horizon_years, dec!(5));
}

// ===========================================================================
// Path isolation
// ===========================================================================

#[test]
fn test_missing_barrier_keeps_altman_result() {
    let full = company("NOCL");
    let mut f = full.clone();
    f.current_liabilities = None;
    for ft in FirmType::ALL {
        let complete =
            evaluation::assess_financials(&full, ft, &EngineConfig::default()).unwrap();
        let outcomes = evaluation::assess_financials(&f, ft, &EngineConfig::default()).unwrap();
        assert_eq!(outcomes.altman, complete.altman, "{ft:?}");
        assert_eq!(
            outcomes.merton.as_ref().unwrap_err(),
            &CreditRiskError::MissingField {
                field: "current_liabilities".into()
            }
        );
    }

    let provider = InMemoryProvider::new().with(f);
    let err = evaluation::evaluate(&provider, "NOCL", FirmType::EmergingMarket, &EngineConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingField);
}

#[test]
fn test_unused_lines_not_required() {
    let full = company("PART");

    let mut no_revenue = full.clone();
    no_revenue.total_revenue = None;
    let out = evaluation::evaluate_financials(&no_revenue, FirmType::EmergingMarket, &EngineConfig::default())
        .unwrap();
    let expected = evaluation::evaluate_financials(&full, FirmType::EmergingMarket, &EngineConfig::default())
        .unwrap();
    assert_eq!(out.result.altman, expected.result.altman);

    let mut no_book_equity = full.clone();
    no_book_equity.stockholders_equity = None;
    let out = evaluation::evaluate_financials(
        &no_book_equity,
        FirmType::PublicManufacturing,
        &EngineConfig::default(),
    )
    .unwrap();
    // X4 = 4,000,000 / 5,000,000 from market equity
    assert_eq!(out.result.altman.ratios.x4, dec!(0.8));
}

#[test]
fn test_non_positive_horizon_fails_merton_only() {
    let f = company("HRZN");
    for horizon in [Decimal::ZERO, dec!(-1)] {
        let mut cfg = EngineConfig::default();
        cfg.merton.horizon_years = horizon;
        let outcomes =
            evaluation::assess_financials(&f, FirmType::PublicManufacturing, &cfg).unwrap();
        assert!(outcomes.altman.is_ok());
        let err = outcomes.merton.as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidModelParameter);
        assert!(err.is_structural_risk_unavailable());

        let strict = evaluation::evaluate_financials(&f, FirmType::PublicManufacturing, &cfg)
            .unwrap_err();
        assert_eq!(strict.kind(), ErrorKind::InvalidModelParameter);
    }
}

#[test]
fn test_percentage_rate_fails_merton_only() {
    let mut cfg = EngineConfig::default();
    cfg.merton.risk_free_rate = dec!(4);
    let history = company("RATE").asset_history().unwrap();
    let outcomes =
        evaluation::assess(&snapshot(), &history, FirmType::PrivateOrNonManufacturing, &cfg).unwrap();
    assert!(outcomes.altman.is_ok());
    assert_eq!(
        outcomes.merton.unwrap_err().kind(),
        ErrorKind::InvalidModelParameter
    );
}
