use chrono::{TimeZone, Utc};
use perpdesk::prelude::*;

#[test]
fn sizing_scenario_from_desk_playbook() {
    let profile = RiskProfile::new(0.02, 10, 0.05).unwrap();
    let mut manager = RiskManager::new(profile);
    manager.set_leverage(5);

    let request = PositionSizingRequest::new(10_000.0, 100.0, 95.0).unwrap();
    let result = manager.size(&request).unwrap();

    assert_eq!(result.contracts, 200.0);
    assert_eq!(result.leverage_used, 5);
    assert!(result.leverage_used <= profile.max_leverage);
}

#[test]
fn leverage_persists_until_changed() {
    let mut manager = RiskManager::new(RiskProfile::new(0.01, 20, 0.05).unwrap());
    let before = manager.position_size(100.0, 90.0, 10_000.0).unwrap();

    manager.set_leverage(4);
    assert_eq!(manager.position_size(100.0, 90.0, 10_000.0).unwrap(), before * 4.0);
    assert_eq!(manager.position_size(100.0, 90.0, 10_000.0).unwrap(), before * 4.0);

    manager.set_leverage(100);
    assert_eq!(manager.leverage(), 20);
}

#[test]
fn degenerate_stop_sizes_to_zero_with_margin_zero() {
    let mut manager = RiskManager::new(RiskProfile::default());
    manager.set_leverage(3);
    let request = PositionSizingRequest::new(25_000.0, 100.0, 100.0).unwrap();
    let result = manager.size(&request).unwrap();

    assert_eq!(result.contracts, 0.0);
    assert_eq!(result.margin_required, 0.0);
}

#[test]
fn sizing_never_goes_negative_or_nan() {
    let mut manager = RiskManager::new(RiskProfile::default());
    manager.set_leverage(2);

    for (entry, stop, balance) in [
        (100.0, 95.0, -10_000.0),
        (f64::NAN, 95.0, 10_000.0),
        (100.0, -95.0, 10_000.0),
        (100.0, 95.0, f64::INFINITY),
    ] {
        assert!(manager.position_size(entry, stop, balance).is_err());
    }
}

#[test]
fn zero_leverage_margin_guard() {
    for (p, e) in [(0.0, 1.0), (10.0, 100.0), (1e6, 3.5)] {
        assert_eq!(RiskManager::required_margin(p, e, 0), 0.0);
    }
}

#[test]
fn pivot_scenario_and_advisory() {
    let ts = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
    let bar = Bar::new(ts, 95.0, 110.0, 90.0, 100.0, 1_000.0).unwrap();
    let levels = fibonacci_pivots(&bar);

    assert_eq!(levels.pivot, 100.0);
    assert_eq!(levels.r1, 110.0);
    assert_eq!(levels.s1, 90.0);
    assert_eq!(levels.r2, 120.0);
    assert_eq!(levels.s2, 80.0);
    assert_eq!(levels.r3, 130.0);
    assert_eq!(levels.s3, 70.0);
    assert_eq!(levels, fibonacci_pivots(&bar));

    assert_eq!(classify_price(125.0, &levels), PivotZone::AboveR1);
    assert_eq!(classify_price(70.0, &levels), PivotZone::BelowS1);
}

#[test]
fn rsi_extremes() {
    let up: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
    let down: Vec<f64> = up.iter().rev().copied().collect();

    assert_eq!(latest_rsi(&up, DEFAULT_RSI_PERIOD).unwrap(), 100.0);
    assert_eq!(latest_rsi(&down, DEFAULT_RSI_PERIOD).unwrap(), 0.0);
}
