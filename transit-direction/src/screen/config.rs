//! Screening configuration.

/// Confidence tiers and fetch parallelism for candidate screening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Boardable verdicts at or above this confidence are recommended outright.
    pub high_confidence: u8,

    /// Boardable verdicts at or above this confidence are recommended only
    /// when the boarding stop precedes the alighting stop on the route.
    pub medium_confidence: u8,

    /// Maximum number of route lookups issued concurrently.
    pub batch_size: usize,
}

impl ScreenConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(high_confidence: u8, medium_confidence: u8, batch_size: usize) -> Self {
        Self {
            high_confidence,
            medium_confidence,
            batch_size,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            high_confidence: 70,
            medium_confidence: 50,
            batch_size: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScreenConfig::default();

        assert_eq!(config.high_confidence, 70);
        assert_eq!(config.medium_confidence, 50);
        assert_eq!(config.batch_size, 8);
    }

    #[test]
    fn custom_config() {
        let config = ScreenConfig::new(80, 40, 2);

        assert_eq!(config.high_confidence, 80);
        assert_eq!(config.medium_confidence, 40);
        assert_eq!(config.batch_size, 2);
    }
}
