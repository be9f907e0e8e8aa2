//! Phone number normalization
//!
//! Ordable and the local customer records spell the same number several
//! ways (`+96512345678`, `96512345678`, `12345678`). Outbound payloads
//! carry the national format: configured country code + the last N
//! digits. Customer matching additionally tries the prefix-stripped
//! spelling.

use crate::config::Config;

/// Normalize a raw phone into `{country_code}{last N digits}`
///
/// Non-digits are stripped first; an empty or missing input falls back to
/// the configured placeholder number.
pub fn national_format(raw: Option<&str>, config: &Config) -> String {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => config.fallback_phone.as_str(),
    };
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = if digits.is_empty() {
        config.fallback_phone.clone()
    } else {
        digits
    };
    let start = digits.len().saturating_sub(config.national_digits);
    format!("{}{}", config.country_code, &digits[start..])
}

/// Strip the configured country prefix, leaving other inputs untouched
pub fn strip_country_prefix<'a>(phone: &'a str, country_code: &str) -> &'a str {
    phone.strip_prefix(country_code).unwrap_or(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_and_bare_numbers_normalize_identically() {
        let config = Config::default();
        let a = national_format(Some("+96512345678"), &config);
        let b = national_format(Some("12345678"), &config);
        assert_eq!(a, b);
        assert_eq!(a, "+96512345678");
    }

    #[test]
    fn formatting_noise_is_stripped() {
        let config = Config::default();
        assert_eq!(
            national_format(Some("(965) 1234-5678"), &config),
            "+96512345678"
        );
    }

    #[test]
    fn missing_phone_uses_fallback() {
        let config = Config::default();
        assert_eq!(national_format(None, &config), "+96512345678");
        assert_eq!(national_format(Some("  "), &config), "+96512345678");
    }

    #[test]
    fn longer_numbers_keep_only_national_digits() {
        let config = Config::default();
        assert_eq!(
            national_format(Some("0096598765432"), &config),
            "+96598765432"
        );
    }

    #[test]
    fn prefix_stripping_leaves_unprefixed_numbers_alone() {
        assert_eq!(strip_country_prefix("+96512345678", "+965"), "12345678");
        assert_eq!(strip_country_prefix("12345678", "+965"), "12345678");
    }
}
