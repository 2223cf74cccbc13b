use super::*;

#[test]
fn test_parse_full_triple() {
    let v = MigrationVersion::parse("1.2.3").unwrap();
    assert_eq!(v.parts(), (1, 2, 3));
    assert_eq!(v.as_str(), "1.2.3");
}

#[test]
fn test_missing_components_are_zero() {
    let v = MigrationVersion::parse("1.0").unwrap();
    assert_eq!(v.parts(), (1, 0, 0));
    // Raw string is preserved, not coerced
    assert_eq!(v.as_str(), "1.0");
}

#[test]
fn test_two_component_equals_triple() {
    let a = MigrationVersion::parse("1.0").unwrap();
    let b = MigrationVersion::parse("1.0.0").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
}

#[test]
fn test_numeric_not_lexicographic_ordering() {
    let a = MigrationVersion::parse("1.9.0").unwrap();
    let b = MigrationVersion::parse("1.10.0").unwrap();
    assert!(a < b);
}

#[test]
fn test_major_dominates() {
    let a = MigrationVersion::parse("2.0.0").unwrap();
    let b = MigrationVersion::parse("1.99.99").unwrap();
    assert!(a > b);
}

#[test]
fn test_rejects_non_numeric_component() {
    assert!(MigrationVersion::parse("1.x.0").is_err());
    assert!(MigrationVersion::parse("abc").is_err());
}

#[test]
fn test_rejects_empty_and_extra_components() {
    assert!(MigrationVersion::parse("").is_err());
    assert!(MigrationVersion::parse("1..0").is_err());
    assert!(MigrationVersion::parse("1.2.3.4").is_err());
}

#[test]
fn test_zero_sentinel() {
    let z = MigrationVersion::zero();
    assert_eq!(z.as_str(), "0.0.0");
    assert!(z < MigrationVersion::parse("0.0.1").unwrap());
}

#[test]
fn test_serde_roundtrip() {
    let v = MigrationVersion::parse("1.4.0").unwrap();
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#""1.4.0""#);
    let back: MigrationVersion = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn test_hash_matches_equality() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(MigrationVersion::parse("1.0").unwrap());
    set.insert(MigrationVersion::parse("1.0.0").unwrap());
    assert_eq!(set.len(), 1);
}
