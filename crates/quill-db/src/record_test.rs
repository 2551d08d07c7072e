use super::*;
use chrono::NaiveDate;

fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

#[test]
fn test_parse_bool_accepted_spellings() {
    for input in ["1", "t", "T", "TRUE", "true", "True"] {
        assert_eq!(parse_bool(input), Ok(true), "{input}");
    }
    for input in ["0", "f", "F", "FALSE", "false", "False"] {
        assert_eq!(parse_bool(input), Ok(false), "{input}");
    }
    assert!(parse_bool("yes").is_err());
    assert!(parse_bool("tRUE").is_err());
}

#[test]
fn test_int_into_signed_fields() {
    let mut small: i16 = 0;
    assign(&mut small, &Value::Int(42)).unwrap();
    assert_eq!(small, 42);

    let mut wide: i64 = 0;
    assign(&mut wide, &Value::Int(-7)).unwrap();
    assert_eq!(wide, -7);
}

#[test]
fn test_int_overflow_is_error() {
    let mut tiny: i8 = 3;
    let err = assign(&mut tiny, &Value::Int(300)).unwrap_err();
    assert!(matches!(err, CoerceError::OutOfRange { value: 300, target: "i8" }));
    assert_eq!(tiny, 3);
}

#[test]
fn test_int_into_unsigned_is_dropped() {
    let mut count: u32 = 9;
    assign(&mut count, &Value::Int(5)).unwrap();
    assert_eq!(count, 9);
}

#[test]
fn test_text_parsed_by_field_type() {
    let mut signed: i32 = 0;
    let mut unsigned: u64 = 0;
    let mut float: f64 = 0.0;
    let mut flag = false;
    assign(&mut signed, &Value::Text("-12".into())).unwrap();
    assign(&mut unsigned, &Value::Bytes(b"12".to_vec())).unwrap();
    assign(&mut float, &Value::Text("2.5".into())).unwrap();
    assign(&mut flag, &Value::Bytes(b"T".to_vec())).unwrap();
    assert_eq!(signed, -12);
    assert_eq!(unsigned, 12);
    assert_eq!(float, 2.5);
    assert!(flag);
}

#[test]
fn test_text_parse_failure_keeps_source() {
    let mut n: i64 = 0;
    let err = assign(&mut n, &Value::Text("twelve".into())).unwrap_err();
    assert!(std::error::Error::source(&err).is_some());
    match err {
        CoerceError::Parse { input, target, .. } => {
            assert_eq!(input, "twelve");
            assert_eq!(target, "i64");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(n, 0);
}

#[test]
fn test_bad_bool_text_is_error() {
    let mut flag = false;
    let err = assign(&mut flag, &Value::Text("yes".into())).unwrap_err();
    assert!(matches!(err, CoerceError::Parse { target: "bool", .. }));
}

#[test]
fn test_string_from_text_and_bytes() {
    let mut s = String::new();
    assign(&mut s, &Value::Text("alice".into())).unwrap();
    assert_eq!(s, "alice");
    assign(&mut s, &Value::Bytes(b"bob".to_vec())).unwrap();
    assert_eq!(s, "bob");
}

#[test]
fn test_mismatched_pairings_are_dropped() {
    let mut s = "keep".to_string();
    assign(&mut s, &Value::Int(1)).unwrap();
    assert_eq!(s, "keep");

    let mut flag = true;
    assign(&mut flag, &Value::Int(0)).unwrap();
    assert!(flag);

    let mut float = 1.5;
    assign(&mut float, &Value::Int(2)).unwrap();
    assert_eq!(float, 1.5);
}

#[test]
fn test_null_leaves_field_unchanged() {
    let mut n: i64 = 17;
    assign(&mut n, &Value::Null).unwrap();
    assert_eq!(n, 17);

    let mut maybe: Option<String> = Some("set".to_string());
    assign(&mut maybe, &Value::Null).unwrap();
    assert_eq!(maybe.as_deref(), Some("set"));
}

#[test]
fn test_option_follows_inner_type() {
    let mut at: Option<NaiveDateTime> = None;
    assign(&mut at, &Value::Timestamp(ts())).unwrap();
    assert_eq!(at, Some(ts()));

    let mut n: Option<i32> = None;
    assign(&mut n, &Value::Bool(true)).unwrap();
    assert_eq!(n, None);
}

#[test]
fn test_timestamp_into_utc() {
    let mut at: DateTime<Utc> = DateTime::<Utc>::default();
    assign(&mut at, &Value::Timestamp(ts())).unwrap();
    assert_eq!(at, ts().and_utc());
}

#[test]
fn test_binding_matches_case_insensitively() {
    #[derive(Default)]
    struct Row {
        id: i64,
    }
    let binding = Binding::<Row>::new("id", "id", |r, v| assign(&mut r.id, v));
    assert!(binding.matches("ID"));
    assert!(!binding.matches("uid"));

    let mut row = Row::default();
    binding.set(&mut row, &Value::Int(4)).unwrap();
    assert_eq!(row.id, 4);
    assert_eq!(binding.field(), "id");
}
