//! Phone number utilities

use once_cell::sync::Lazy;
use phonenumber::PhoneNumber;
use regex::Regex;

// E.164: '+', a non-zero country code digit, at most 15 digits in total
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern is valid")
});

// Loosely shaped mobile input: optional '+', digits and common separators,
// and possibly a parenthesized area code up front
static LOOSE_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9(][0-9 ().\-]*[0-9]$").expect("loose phone pattern is valid")
});

/// Strict check used by the gateway: already-trimmed input must be a
/// separator-free E.164 string that libphonenumber considers a real number.
pub fn is_valid_e164_mobile(phone: &str) -> bool {
    if !E164_REGEX.is_match(phone) {
        return false;
    }
    match phone.parse::<PhoneNumber>() {
        Ok(parsed) => phonenumber::is_valid(&parsed),
        Err(_) => false,
    }
}

/// Loose check used before any network call: optional leading '+',
/// separators allowed, 7 to 15 digits.
pub fn is_loose_mobile(phone: &str) -> bool {
    if !LOOSE_PHONE_REGEX.is_match(phone) {
        return false;
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (7..=15).contains(&digits)
}

/// Mask a phone number for logs, keeping only the last four digits
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}
