use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Comparison key for user-typed labels: trimmed, lowercased, with
/// combining accents stripped (NFD decomposition).
///
/// `"  Producción "`, `"PRODUCCION"` and `"produccion"` share one key.
pub fn fold_key(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive substring match (plain lowercase, accents kept).
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_key_strips_case_and_accents() {
        assert_eq!(fold_key("Producción"), "produccion");
        assert_eq!(fold_key("PRODUCCIÓN"), "produccion");
        assert_eq!(fold_key("  Área "), "area");
        assert_eq!(fold_key("Correo Electrónico"), "correo electronico");
    }

    #[test]
    fn test_fold_key_keeps_inner_spaces_and_punctuation() {
        assert_eq!(fold_key("Fan Fest"), "fan fest");
        assert_eq!(fold_key("R.U.T"), "r.u.t");
        assert_eq!(fold_key("Empresa/Medio"), "empresa/medio");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Juan@Example.com", "example"));
        assert!(!contains_ignore_case("Juan", "pedro"));
    }
}
