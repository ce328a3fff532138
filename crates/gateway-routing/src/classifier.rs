//! Keyword-based prompt classifier.
//!
//! Pure, deterministic, and cheap enough to run on every request. The
//! keyword tables are data, loaded once into a [`Classifier`] rather than
//! scattered through the matching logic.

use gateway_core::Specialty;

const CODE_KEYWORDS: &[&str] = &["def", "class", "import", "exception"];
const WRITING_KEYWORDS: &[&str] = &["essay", "blog", "email", "summarize"];

/// Classifies prompts into one of [`Specialty`]'s variants by keyword
/// substring match.
///
/// Resolution order is fixed: code first, writing next, analysis
/// otherwise. This only ever affects provider scoring (the specialty
/// boost), never eligibility.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    code_keywords: Vec<String>,
    writing_keywords: Vec<String>,
}

impl Classifier {
    /// Build a classifier over the default keyword tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            code_keywords: CODE_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            writing_keywords: WRITING_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Classify a prompt into a [`Specialty`].
    #[must_use]
    pub fn classify(&self, prompt: &str) -> Specialty {
        let lower = prompt.to_lowercase();

        if self.code_keywords.iter().any(|kw| lower.contains(kw)) {
            return Specialty::Code;
        }
        if self.writing_keywords.iter().any(|kw| lower.contains(kw)) {
            return Specialty::Writing;
        }
        Specialty::Analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_keyword_wins_first() {
        let c = Classifier::new();
        assert_eq!(c.classify("please write a Python class Foo"), Specialty::Code);
    }

    #[test]
    fn writing_keyword_is_second_priority() {
        let c = Classifier::new();
        assert_eq!(c.classify("summarize this essay for me"), Specialty::Writing);
    }

    #[test]
    fn code_keyword_beats_writing_keyword_when_both_present() {
        let c = Classifier::new();
        assert_eq!(
            c.classify("write an essay that uses import statements"),
            Specialty::Code
        );
    }

    #[test]
    fn falls_back_to_analysis() {
        let c = Classifier::new();
        assert_eq!(c.classify("what is the capital of France"), Specialty::Analysis);
    }

    #[test]
    fn classification_is_case_insensitive() {
        let c = Classifier::new();
        assert_eq!(c.classify("EXCEPTION handling in rust"), Specialty::Code);
    }
}
