/// Thresholds used by the record validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Authors that may be listed before an et-al marker is required (default: 3).
    pub max_authors: usize,
    /// Titles longer than this many characters draw a warning (default: 100).
    pub max_title_chars: usize,
    /// Journal names longer than this many characters draw a warning (default: 20).
    pub max_venue_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_authors: 3,
            max_title_chars: 100,
            max_venue_chars: 20,
        }
    }
}
