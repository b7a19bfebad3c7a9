//! Config loading tests.

use outbreak_core::{
    catalogue::UpgradeCatalogue,
    config::EconConfig,
    error::EconError,
    upgrade::UpgradeKind,
};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

#[test]
fn shipped_data_matches_builtin_table() {
    let config = EconConfig::load(DATA_DIR).expect("load shipped catalogue");
    let builtin = UpgradeCatalogue::builtin();

    assert_eq!(config.starting_balance, 500);
    assert_eq!(config.daily_income, 120);
    for kind in UpgradeKind::ALL {
        assert_eq!(
            config.catalogue.get_definition(kind),
            builtin.get_definition(kind),
            "data file and built-in table disagree on {kind}"
        );
    }
}

#[test]
fn missing_data_dir_is_an_io_error() {
    let err = EconConfig::load("/nonexistent/data").expect_err("should fail");
    assert!(matches!(err, EconError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn invalid_bonus_schedule_fails_to_load() {
    let json = r#"{
        "starting_balance": 0,
        "daily_income": 0,
        "upgrades": [
            { "kind": "emergency_funds", "name": "EF", "description": "",
              "base_cost": 80, "cost_per_level": 80, "max_level": 3,
              "is_one_time_bonus": true, "bonus_amounts": [200] }
        ]
    }"#;
    let err = EconConfig::from_json(json).expect_err("should fail validation");
    assert!(matches!(err, EconError::BonusScheduleTooShort { .. }), "unexpected error: {err}");
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = EconConfig::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, EconError::Serialization(_)), "unexpected error: {err}");
}

#[test]
fn negative_base_cost_fails_to_load() {
    let json = r#"{
        "starting_balance": 0,
        "daily_income": 0,
        "upgrades": [
            { "kind": "tax_efficiency", "name": "Tax", "description": "",
              "base_cost": -100, "cost_per_level": 50, "max_level": 5 }
        ]
    }"#;
    let err = EconConfig::from_json(json).expect_err("should fail validation");
    assert!(
        matches!(err, EconError::NegativeCost { kind: UpgradeKind::TaxEfficiency, .. }),
        "unexpected error: {err}"
    );
}
