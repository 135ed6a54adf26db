/// Configuration for geospatial clustering with tunable thresholds.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Maximum centroid distance (km) below which the capture spread is
    /// treated as a single point (GPS jitter, burst shots). A radius is
    /// reported only when the spread exceeds this.
    pub radius_significance_km: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius_significance_km: 0.1,
        }
    }
}
