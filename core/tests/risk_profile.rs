use risklab_core::{
    error::LabError,
    risk_profile::{quadrant_counts, Quadrant, RiskProfile},
    validator::validate,
};

#[test]
fn quadrant_corners() {
    assert_eq!(Quadrant::classify(1, 1), Quadrant::Ignore);
    assert_eq!(Quadrant::classify(10, 1), Quadrant::Monitor);
    assert_eq!(Quadrant::classify(1, 10), Quadrant::Cost);
    assert_eq!(Quadrant::classify(10, 10), Quadrant::StrategicRisk);
}

#[test]
fn midpoint_counts_as_low() {
    assert_eq!(Quadrant::classify(5, 5), Quadrant::Ignore);
    assert_eq!(Quadrant::classify(6, 5), Quadrant::Monitor);
    assert_eq!(Quadrant::classify(5, 6), Quadrant::Cost);
    assert_eq!(Quadrant::classify(6, 6), Quadrant::StrategicRisk);
}

#[test]
fn default_profile_is_strategic() {
    let profile = RiskProfile::new("Data Breach", 8, 7).unwrap();
    assert_eq!(profile.quadrant(), Quadrant::StrategicRisk);
    assert_eq!(profile.quadrant().to_string(), "Strategic Risk");
}

#[test]
fn scores_outside_scale_are_rejected() {
    for (l, s) in [(0, 5), (11, 5), (5, 0), (5, -3)] {
        let err = RiskProfile::new("x", l, s).unwrap_err();
        assert!(matches!(err, LabError::OutOfRange { min: 1, max: 10, .. }), "got {err:?}");
    }
}

#[test]
fn sample_table_quadrant_counts() {
    // (likelihood, severity): (6,5) (8,7) (3,4) (7,6) (9,8)
    let table = validate(None).unwrap();
    let counts = quadrant_counts(&table);
    assert_eq!(counts.get(&Quadrant::Monitor), Some(&1));
    assert_eq!(counts.get(&Quadrant::StrategicRisk), Some(&3));
    assert_eq!(counts.get(&Quadrant::Ignore), Some(&1));
    assert_eq!(counts.get(&Quadrant::Cost), None);
}
