//! Behavioral tests for populating flat records from token lists.

#![expect(
    clippy::unwrap_used,
    reason = "tests panic to surface mapping mistakes"
)]
#![expect(
    clippy::float_arithmetic,
    reason = "negative float literals exercise the float coercions"
)]

use argmap::chrono::{DateTime, FixedOffset, Utc};
use argmap::{ArgvError, Record, parse_argv};
use rstest::rstest;

#[derive(Debug, Default, PartialEq, Record)]
struct SignedArgs {
    #[argmap(tag = "arg1")]
    arg1: i8,
    #[argmap(tag = "arg2")]
    arg2: i32,
    #[argmap(tag = "arg3")]
    arg3: isize,
    #[argmap(tag = "arg4")]
    arg4: i64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct UnsignedArgs {
    #[argmap(tag = "arg1")]
    arg1: u8,
    #[argmap(tag = "arg2")]
    arg2: u32,
    #[argmap(tag = "arg3")]
    arg3: usize,
    #[argmap(tag = "arg4")]
    arg4: u64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct FloatArgs {
    #[argmap(tag = "arg1")]
    arg1: f32,
    #[argmap(tag = "arg2")]
    arg2: f64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct BoolArgs {
    #[argmap(tag = "arg1")]
    arg1: bool,
    #[argmap(tag = "arg2")]
    arg2: bool,
}

#[derive(Debug, Default, PartialEq, Record)]
struct StringArgs {
    #[argmap(tag = "arg1")]
    arg1: String,
    #[argmap(tag = "arg2")]
    arg2: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Record)]
struct TimeArgs {
    #[argmap(tag = "arg1")]
    arg1: DateTime<FixedOffset>,
    #[argmap(tag = "arg2,optional")]
    arg2: DateTime<Utc>,
}

#[test]
fn empty_token_list_fails() {
    let err = parse_argv::<&str>(&mut SignedArgs::default(), &[]).unwrap_err();
    assert!(matches!(err, ArgvError::EmptyArgs));
}

#[test]
fn odd_token_count_fails() {
    let err = parse_argv(&mut SignedArgs::default(), &["param1", "value1", "param2"]).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidParameterCount));
}

#[rstest]
#[case(&["arg2", "2"], "arg1")]
#[case(&["arg1", "2"], "arg2")]
#[case(&["arg1", "2", "arg2", "3"], "arg3")]
fn missing_required_field_is_reported_by_name(#[case] argv: &[&str], #[case] field: &str) {
    let err = parse_argv(&mut SignedArgs::default(), argv).unwrap_err();
    assert!(matches!(err, ArgvError::MissingValue(name) if name == field));
}

#[rstest]
#[case::syntax(&["arg1", "xxx"], "arg1")]
#[case::overflow(&["arg1", "2000"], "arg1")]
#[case::late_field(&["arg1", "2", "arg2", "3", "arg3", "45", "arg4", "potato"], "arg4")]
fn bad_signed_values_fail(#[case] argv: &[&str], #[case] field: &str) {
    let err = parse_argv(&mut SignedArgs::default(), argv).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidValue { field: name, .. } if name == field));
}

#[test]
fn signed_fields_round_trip() {
    let mut dest = SignedArgs::default();
    parse_argv(
        &mut dest,
        &["arg1", "127", "arg2", "37000", "arg3", "4532", "arg4", "-476800"],
    )
    .unwrap();
    assert_eq!(
        dest,
        SignedArgs {
            arg1: 127,
            arg2: 37_000,
            arg3: 4532,
            arg4: -476_800,
        }
    );
}

#[rstest]
#[case::negative(&["arg1", "100", "arg2", "-5", "arg3", "2345", "arg4", "324654"], "arg2")]
#[case::overflow(&["arg1", "2000"], "arg1")]
#[case::syntax(&["arg1", "xxx"], "arg1")]
fn bad_unsigned_values_fail(#[case] argv: &[&str], #[case] field: &str) {
    let err = parse_argv(&mut UnsignedArgs::default(), argv).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidValue { field: name, .. } if name == field));
}

#[test]
fn unsigned_fields_round_trip() {
    let mut dest = UnsignedArgs::default();
    parse_argv(
        &mut dest,
        &["arg1", "127", "arg2", "37000", "arg3", "4532", "arg4", "476800"],
    )
    .unwrap();
    assert_eq!(
        dest,
        UnsignedArgs {
            arg1: 127,
            arg2: 37_000,
            arg3: 4532,
            arg4: 476_800,
        }
    );
}

#[test]
fn float_fields_accept_scientific_notation() {
    let mut dest = FloatArgs::default();
    parse_argv(&mut dest, &["arg1", "-2.345E8", "arg2", "8.3732E18"]).unwrap();
    assert_eq!(
        dest,
        FloatArgs {
            arg1: -2.345E8,
            arg2: 8.3732E18,
        }
    );
}

#[rstest]
#[case::syntax(&["arg1", "xxx"], "arg1")]
#[case::f32_overflow(&["arg1", "10E140"], "arg1")]
#[case::f32_beyond_f64(&["arg1", "1e999"], "arg1")]
#[case::f64_overflow(&["arg1", "2", "arg2", "1e999"], "arg2")]
#[case::late_field(&["arg1", "2", "arg2", "potato"], "arg2")]
fn bad_float_values_fail(#[case] argv: &[&str], #[case] field: &str) {
    let err = parse_argv(&mut FloatArgs::default(), argv).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidValue { field: name, .. } if name == field));
}

#[rstest]
#[case(&["arg1", "true", "arg2", "false"], true, false)]
#[case(&["arg1", "1", "arg2", "0"], true, false)]
fn bool_fields_accept_canonical_literals(
    #[case] argv: &[&str],
    #[case] arg1: bool,
    #[case] arg2: bool,
) {
    let mut dest = BoolArgs::default();
    parse_argv(&mut dest, argv).unwrap();
    assert_eq!(dest, BoolArgs { arg1, arg2 });
}

#[rstest]
#[case(&["arg1", "yes", "arg2", "false"])]
#[case(&["arg1", "2.0", "arg2", "false"])]
fn bool_fields_reject_other_literals(#[case] argv: &[&str]) {
    let err = parse_argv(&mut BoolArgs::default(), argv).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidValue { field, .. } if field == "arg1"));
}

#[test]
fn string_fields_are_assigned_verbatim() {
    let mut dest = StringArgs::default();
    parse_argv(&mut dest, &["arg1", "xxx", "arg2", "value1,value2,value3"]).unwrap();
    assert_eq!(
        dest,
        StringArgs {
            arg1: "xxx".to_owned(),
            arg2: vec!["value1".to_owned(), "value2".to_owned(), "value3".to_owned()],
        }
    );
}

#[test]
fn empty_string_list_is_empty_not_absent() {
    let mut dest = StringArgs::default();
    parse_argv(&mut dest, &["arg1", "xxx", "arg2", ""]).unwrap();
    assert_eq!(dest.arg2, Vec::<String>::new());
}

#[test]
fn string_list_elements_are_trimmed() {
    let mut dest = StringArgs::default();
    parse_argv(&mut dest, &["arg1", "xxx", "arg2", "a, b,c"]).unwrap();
    assert_eq!(dest.arg2, ["a", "b", "c"]);
}

#[test]
fn timestamps_parse_rfc3339_and_keep_offset() {
    let mut dest = TimeArgs::default();
    parse_argv(
        &mut dest,
        &["arg1", "2023-05-25T00:10:01-02:00", "arg2", "2023-05-25T00:10:01-02:00"],
    )
    .unwrap();
    let expected: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339("2023-05-25T00:10:01-02:00").unwrap();
    assert_eq!(dest.arg1, expected);
    assert_eq!(dest.arg1.offset().local_minus_utc(), -2 * 3600);
    assert_eq!(dest.arg2, expected.to_utc());
}

#[test]
fn invalid_timestamps_fail() {
    let err = parse_argv(&mut TimeArgs::default(), &["arg1", "potato"]).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidValue { field, .. } if field == "arg1"));
}

#[test]
fn flag_prefixes_are_cosmetic() {
    let mut dest = BoolArgs::default();
    parse_argv(&mut dest, &["--arg1", "true", "-arg2", "1"]).unwrap();
    assert_eq!(dest, BoolArgs { arg1: true, arg2: true });
}

#[test]
fn parsing_is_idempotent_on_fresh_records() {
    let argv = ["arg1", "5", "arg2", "6", "arg3", "7", "arg4", "8"];
    let mut first = SignedArgs::default();
    let mut second = SignedArgs::default();
    parse_argv(&mut first, &argv).unwrap();
    parse_argv(&mut second, &argv).unwrap();
    assert_eq!(first, second);
}

#[test]
fn optional_fields_keep_their_zero_value_when_absent() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct WithOptional {
        #[argmap(tag = "host")]
        host: String,
        #[argmap(tag = "retries,optional")]
        retries: u32,
    }

    let mut dest = WithOptional::default();
    parse_argv(&mut dest, &["host", "db"]).unwrap();
    assert_eq!(
        dest,
        WithOptional {
            host: "db".to_owned(),
            retries: 0,
        }
    );
}

#[test]
fn read_only_fields_fail_even_when_absent() {
    #[derive(Debug, Default, Record)]
    struct WithReadOnly {
        #[argmap(tag = "id", readonly)]
        id: u64,
        #[argmap(tag = "name")]
        name: String,
    }

    let mut dest = WithReadOnly::default();
    let err = parse_argv(&mut dest, &["name", "x"]).unwrap_err();
    assert!(matches!(err, ArgvError::ReadOnly(field) if field == "id"));
}

#[test]
fn fields_written_before_an_error_stay_written() {
    let mut dest = SignedArgs::default();
    let err = parse_argv(&mut dest, &["arg1", "5", "arg2", "potato"]).unwrap_err();
    assert!(matches!(err, ArgvError::InvalidValue { field, .. } if field == "arg2"));
    assert_eq!(dest.arg1, 5);
}

#[test]
fn invalid_value_errors_carry_the_cause() {
    let err = parse_argv(&mut SignedArgs::default(), &["arg1", "2000"]).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.starts_with("error parsing arg arg1: "), "{rendered}");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn empty_records_accept_any_arguments() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Empty {}

    parse_argv(&mut Empty::default(), &["anything", "1"]).unwrap();
}

#[test]
fn derived_kebab_case_tags_map_flags() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct AutoTagged {
        #[argmap]
        max_retries: u32,
        #[argmap(optional)]
        log_level: String,
    }

    let mut dest = AutoTagged::default();
    parse_argv(&mut dest, &["--max-retries", "3"]).unwrap();
    assert_eq!(
        dest,
        AutoTagged {
            max_retries: 3,
            log_level: String::new(),
        }
    );
}
