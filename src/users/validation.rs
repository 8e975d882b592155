use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    // every character from the allowed set, at least 8 of them
    static ref PASSWORD_CHARSET_RE: Regex = Regex::new(r"^[A-Za-z0-9$@!%*#?&]{8,}$").unwrap();
    static ref HAS_LETTER_RE: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref HAS_DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
    static ref HAS_SPECIAL_RE: Regex = Regex::new(r"[$@!%*#?&]").unwrap();
}

/// Minimal `local@domain.tld` shape check.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least 8 characters from `[A-Za-z0-9$@!%*#?&]`, with at least one
/// letter, one digit and one special character.
pub fn is_password_valid(password: &str) -> bool {
    PASSWORD_CHARSET_RE.is_match(password)
        && HAS_LETTER_RE.is_match(password)
        && HAS_DIGIT_RE.is_match(password)
        && HAS_SPECIAL_RE.is_match(password)
}
