//! Profiling options.
//!
//! All knobs of the pipeline live here with their defaults, so hosts can
//! deserialize partial option maps and the CLI can map flags one-to-one.

use serde::{Deserialize, Serialize};

/// Options recognized by the profiling entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Upper bound on surviving clusters.
    pub max_clusters: usize,
    /// Patterns below this coverage are dropped from the profile.
    pub min_coverage: f64,
    /// Max distinct values before generalizing at a position.
    pub enum_threshold: usize,
    /// Whether to populate the anomaly list.
    pub detect_anomalies: bool,
    /// Reserved; accepted for API compatibility, unused by synthesis.
    pub length_tolerance: f64,
    /// Skeleton-distance ceiling for merging clusters.
    pub merge_threshold: f64,
    /// Clusters smaller than this are dropped.
    pub min_cluster_size: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        ProfileOptions {
            max_clusters: 5,
            min_coverage: 0.01,
            enum_threshold: 10,
            detect_anomalies: true,
            length_tolerance: 0.2,
            merge_threshold: 0.3,
            min_cluster_size: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ProfileOptions::default();
        assert_eq!(opts.max_clusters, 5);
        assert_eq!(opts.enum_threshold, 10);
        assert!(opts.detect_anomalies);
        assert_eq!(opts.min_cluster_size, 1);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let opts: ProfileOptions =
            serde_json::from_str(r#"{"max_clusters": 3, "detect_anomalies": false}"#).unwrap();
        assert_eq!(opts.max_clusters, 3);
        assert!(!opts.detect_anomalies);
        assert_eq!(opts.enum_threshold, 10);
        assert_eq!(opts.merge_threshold, 0.3);
    }
}
