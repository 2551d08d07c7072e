use super::*;
use crate::error::ErrorKind;
use chrono::TimeZone;

#[test]
fn test_sanitize_sentence() {
    let name = sanitize_name("migration", "Create Users Table!").unwrap();
    assert_eq!(name, "create_users_table");
}

#[test]
fn test_sanitize_hyphens_and_symbols() {
    let name = sanitize_name("seed", "add-Index@orders.v2").unwrap();
    assert_eq!(name, "add_indexordersv2");
}

#[test]
fn test_sanitize_keeps_existing_snake_case() {
    let name = sanitize_name("migration", "create_users_table").unwrap();
    assert_eq!(name.as_str(), "create_users_table");
}

#[test]
fn test_sanitize_drops_non_ascii() {
    let name = sanitize_name("migration", "Café Menu").unwrap();
    assert_eq!(name, "caf_menu");
}

#[test]
fn test_sanitize_empty_is_invalid_argument() {
    let err = sanitize_name("migration", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_sanitize_whitespace_only_is_invalid_argument() {
    let err = sanitize_name("seed", "   \t ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("seed"));
}

#[test]
fn test_sanitize_nothing_left_is_invalid_argument() {
    let err = sanitize_name("migration", "!!!").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_unit_name_rejects_uppercase() {
    assert!(UnitName::try_new("Users").is_none());
    assert!(UnitName::try_new("users_2").is_some());
}

#[test]
fn test_version_from_timestamp() {
    let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
    let version = Version::from_timestamp(now);
    assert_eq!(version, "20240307090501");
    assert_eq!(version.len(), 14);
}

#[test]
fn test_version_rejects_separator() {
    assert!(Version::try_new("2024_01").is_none());
    assert!(Version::try_new("").is_none());
    assert!(Version::try_new("001").is_none());
    assert!(Version::try_new("2024010100000a").is_none());
    assert!(Version::try_new("202401010000000").is_none());
    assert!(Version::try_new("20240101000000").is_some());
}

#[test]
fn test_version_ordering_is_chronological() {
    let earlier = Version::from_timestamp(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap());
    let later = Version::from_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    assert!(earlier < later);
}
