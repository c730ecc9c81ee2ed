//! Stopword suppression for strict mode.

/// Words treated as evidence against a real secret. Matching is a plain
/// case-sensitive substring test, so each family ships its common casings.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "setting",
    "Setting",
    "SETTING",
    "info",
    "Info",
    "INFO",
    "env",
    "Env",
    "ENV",
    "environment",
    "Environment",
    "ENVIRONMENT",
    "example",
    "Example",
    "EXAMPLE",
    "test",
    "Test",
    "TEST",
];

/// Suppresses candidate lines that contain any configured stopword.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: Vec<Box<str>>,
}

impl StopwordFilter {
    /// Creates a filter from an explicit word list.
    #[must_use]
    pub fn new(words: &[String]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_str().into()).collect(),
        }
    }

    /// Creates a filter with the default word list.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            words: DEFAULT_STOPWORDS.iter().map(|&w| w.into()).collect(),
        }
    }

    /// Returns `true` if `line` contains any stopword as a case-sensitive
    /// substring.
    #[must_use]
    pub fn suppresses(&self, line: &str) -> bool {
        self.words.iter().any(|word| line.contains(word.as_ref()))
    }

    /// Returns the number of configured words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the filter has no words configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
