use std::str::FromStr;
use trees::config::types::LogLevel;

#[test]
fn parse_common_levels_case_insensitive() {
    assert_eq!(LogLevel::parse("quiet"), Some(LogLevel::Quiet));
    assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
    assert_eq!(LogLevel::parse("Normal"), Some(LogLevel::Normal));
    assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
    assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
    assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
}

#[test]
fn display_roundtrips_with_fromstr() {
    for lvl in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
        let s = lvl.to_string();
        assert_eq!(LogLevel::from_str(&s).unwrap(), lvl, "roundtrip failed for {s}");
    }
}

#[test]
fn fromstr_invalid_is_err() {
    assert!(LogLevel::from_str("loud").is_err());
    assert!(LogLevel::from_str("").is_err());
}

#[test]
fn parse_ignores_surrounding_whitespace() {
    assert_eq!(LogLevel::parse("  Debug\n"), Some(LogLevel::Debug));
    assert_eq!(LogLevel::parse(" none "), Some(LogLevel::Quiet));
}

#[test]
fn unknown_level_error_lists_the_choices() {
    let err = LogLevel::from_str("loud").unwrap_err();
    assert!(err.contains("'loud'"), "{err}");
    assert!(err.contains("verbose"), "{err}");
}
