use pulse_core::{Username, UsernameError, MAX_USERNAME_LEN};

#[test]
fn accepts_plain_usernames() {
    for raw in ["octocat", "torvalds", "a", "x0", "rails-bot", "A1-b2-C3"] {
        let user = Username::parse(raw).expect(raw);
        assert_eq!(user.as_str(), raw);
    }
}

#[test]
fn trims_surrounding_whitespace() {
    let user = Username::parse("  octocat\t\n").expect("trimmed input is valid");
    assert_eq!(user.as_str(), "octocat");
    assert_eq!(user.to_string(), "octocat");
}

#[test]
fn accepts_maximum_length() {
    let raw = "a".repeat(MAX_USERNAME_LEN);
    assert!(Username::parse(&raw).is_ok());
}

#[test]
fn rejects_empty_and_whitespace_only() {
    assert_eq!(Username::parse(""), Err(UsernameError::Empty));
    assert_eq!(Username::parse("   "), Err(UsernameError::Empty));
    assert_eq!(Username::parse("\t\n"), Err(UsernameError::Empty));
}

#[test]
fn rejects_over_length() {
    let raw = "a".repeat(MAX_USERNAME_LEN + 1);
    assert_eq!(Username::parse(&raw), Err(UsernameError::TooLong));
}

#[test]
fn rejects_forbidden_characters() {
    for raw in ["two words", "dot.name", "naïve", "semi;colon", "under_score", "slash/y"] {
        assert_eq!(
            Username::parse(raw),
            Err(UsernameError::ForbiddenChar),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn rejects_multibyte_input_as_forbidden_char() {
    // 14 characters but 42 bytes: the charset verdict wins over the length one.
    let raw = "統計".repeat(7);
    assert_eq!(Username::parse(&raw), Err(UsernameError::ForbiddenChar));
}

#[test]
fn rejects_edge_hyphens() {
    assert_eq!(Username::parse("-lead"), Err(UsernameError::EdgeHyphen));
    assert_eq!(Username::parse("trail-"), Err(UsernameError::EdgeHyphen));
    assert_eq!(Username::parse("-"), Err(UsernameError::EdgeHyphen));
}
