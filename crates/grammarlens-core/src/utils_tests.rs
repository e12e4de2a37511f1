use crate::utils::{is_lexer_name, rule_identity};

#[test]
fn lexer_names_start_uppercase() {
    assert!(is_lexer_name("ID"));
    assert!(is_lexer_name("WS"));
    assert!(is_lexer_name("Letter"));
}

#[test]
fn parser_names_start_lowercase() {
    assert!(!is_lexer_name("expr"));
    assert!(!is_lexer_name("compilationUnit"));
    assert!(!is_lexer_name("_hidden"));
    assert!(!is_lexer_name(""));
}

#[test]
fn identity_is_stable_per_name() {
    assert_eq!(rule_identity("expr"), rule_identity("expr"));
    assert_ne!(rule_identity("expr"), rule_identity("term"));
    // CRC-32 ("IEEE") check value
    assert_eq!(rule_identity("123456789"), 0xCBF4_3926);
}
