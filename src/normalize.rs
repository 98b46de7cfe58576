use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const MERCHANT_NAME_MAX: usize = 25;
pub const MERCHANT_CITY_MAX: usize = 15;

pub const MERCHANT_NAME_FALLBACK: &str = "MERCHANT";
pub const MERCHANT_CITY_FALLBACK: &str = "BRASIL";

/// Truncates to `max` raw characters, upper-cases, then drops diacritics.
///
/// Truncation happens before decomposition so that codes match the ones
/// produced by existing storefront installs byte for byte.
pub fn normalize_text(input: &str, max: usize, fallback: &str) -> String {
    let truncated: String = input.chars().take(max).collect();

    let stripped: String = truncated
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    if stripped.is_empty() {
        fallback.to_string()
    } else {
        stripped
    }
}

pub fn merchant_name(name: &str) -> String {
    normalize_text(name, MERCHANT_NAME_MAX, MERCHANT_NAME_FALLBACK)
}

pub fn merchant_city(city: &str) -> String {
    normalize_text(city, MERCHANT_CITY_MAX, MERCHANT_CITY_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_uppercases() {
        assert_eq!(merchant_city("São Luís"), "SAO LUIS");
        assert_eq!(merchant_name("Açougue Conceição"), "ACOUGUE CONCEICAO");
    }

    #[test]
    fn test_truncates_raw_input_first() {
        let name = "maría's mercadinho do bairro";
        let normalized = merchant_name(name);
        assert_eq!(normalized, "MARIA'S MERCADINHO DO BAI");
        assert_eq!(normalized.chars().count(), 25);
        assert!(normalized.is_ascii());
    }

    #[test]
    fn test_decomposed_input_counts_marks_before_stripping() {
        // "e" + combining acute is two raw characters, so only 14 base letters survive
        let city = format!("{}{}", "e\u{0301}", "x".repeat(20));
        let normalized = merchant_city(&city);
        assert_eq!(normalized, format!("E{}", "X".repeat(13)));
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(merchant_name(""), "MERCHANT");
        assert_eq!(merchant_city(""), "BRASIL");
        assert_eq!(merchant_city("\u{0301}"), "BRASIL");
    }

    #[test]
    fn test_short_input_untouched_except_case() {
        assert_eq!(merchant_city("SuaCidade"), "SUACIDADE");
        assert_eq!(merchant_name("MERCADO ONLINE"), "MERCADO ONLINE");
    }
}
