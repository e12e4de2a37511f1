/// Lexer rules are the ones whose name starts with an uppercase letter.
///
/// # Examples
/// ```
/// use grammarlens_core::utils::is_lexer_name;
/// assert!(is_lexer_name("ID"));
/// assert!(is_lexer_name("Digit"));
/// assert!(!is_lexer_name("expr"));
/// ```
pub fn is_lexer_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Stable numeric identity for a rule name.
///
/// CRC-32 of the UTF-8 bytes, so the value is the same across runs and
/// platforms. Distinct names can collide; callers that restore state should
/// key on the name itself and use this only as an external handle.
pub fn rule_identity(name: &str) -> u32 {
    crc32fast::hash(name.as_bytes())
}
