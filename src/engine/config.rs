use serde::{Deserialize, Serialize};

/// Tuning knobs for the segmentation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Phrase-boundary threshold in seconds before enough phrase history
    /// exists to adapt it
    pub base_threshold_secs: f64,

    /// Cleaned diffs shorter than this many characters are treated as noise
    pub min_diff_length: usize,

    /// How many finalized phrases to keep, oldest evicted first
    pub history_capacity: usize,

    /// Reference speech rate in words per second; faster observed speech
    /// lowers the phrase-boundary threshold, slower speech raises it
    pub words_per_sec_reference: f64,

    /// Threshold clamp while no reliable speech rate exists yet
    pub bootstrap_threshold_range: (f64, f64),

    /// Threshold clamp once a speech rate has been observed
    pub steady_threshold_range: (f64, f64),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_threshold_secs: 2.0,
            min_diff_length: 3,
            history_capacity: 50,
            words_per_sec_reference: 3.0,
            bootstrap_threshold_range: (2.0, 3.0),
            steady_threshold_range: (2.0, 4.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();

        assert_eq!(config.base_threshold_secs, 2.0);
        assert_eq!(config.min_diff_length, 3);
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.words_per_sec_reference, 3.0);
        assert_eq!(config.bootstrap_threshold_range, (2.0, 3.0));
        assert_eq!(config.steady_threshold_range, (2.0, 4.0));
    }

    #[test]
    fn test_engine_config_partial_deserialize() {
        // Missing fields fall back to defaults
        let config: EngineConfig =
            serde_json::from_str(r#"{"base_threshold_secs": 1.5}"#).unwrap();

        assert_eq!(config.base_threshold_secs, 1.5);
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.steady_threshold_range, (2.0, 4.0));
    }
}
