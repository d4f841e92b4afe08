//! OCR text cleanup
//!
//! Recognized text from scanned payment documents repeatedly trips over the
//! same character confusions. The normalizer applies a fixed table of
//! literal substring corrections for those known misreads, then collapses
//! whitespace runs to single spaces and trims.

/// Literal corrections for recurring misreads of banking-domain terms.
/// The pairs do not overlap, so application order does not matter.
const CORRECTIONS: &[(&str, &str)] = &[
    ("gate", "date"),
    ("Beneticiary", "Beneficiary"),
    ("Bene:iciary", "Beneficiary"),
    ("Bene ficiary", "Beneficiary"),
    ("Arnount", "Amount"),
    ("Am0unt", "Amount"),
    ("Va|ue", "Value"),
    ("V4lue", "Value"),
];

/// Deterministic cleanup of raw OCR output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a normalizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Apply the correction table, then collapse whitespace runs to single
    /// spaces and trim the result.
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut cleaned = text.to_string();
        for (wrong, correct) in CORRECTIONS {
            if cleaned.contains(wrong) {
                cleaned = cleaned.replace(wrong, correct);
            }
        }

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrections_applied() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.clean("Invoice gate: Arnount Va|ue"),
            "Invoice date: Amount Value"
        );
    }

    #[test]
    fn test_beneficiary_variants() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.clean("Beneticiary"), "Beneficiary");
        assert_eq!(normalizer.clean("Bene:iciary"), "Beneficiary");
        assert_eq!(normalizer.clean("Bene ficiary"), "Beneficiary");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.clean("  Value   date \n\t 2024-01-01  "),
            "Value date 2024-01-01"
        );
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.clean(""), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let once = normalizer.clean("Am0unt  Va|ue");
        let twice = normalizer.clean(&once);
        assert_eq!(once, twice);
    }
}
