//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of minimal routes collected by an all-routes search.
    /// Dense networks can have very many equally short routes; collection
    /// stops once this many are held.
    pub max_routes: usize,

    /// Minutes charged for changing lines.
    /// Zero unless configured: the timing model only records same-line travel.
    pub transfer_time: u32,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_routes: usize, transfer_time: u32) -> Self {
        Self {
            max_routes,
            transfer_time,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_routes: 1000,
            transfer_time: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_routes, 1000);
        assert_eq!(config.transfer_time, 0);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(5, 3);

        assert_eq!(config.max_routes, 5);
        assert_eq!(config.transfer_time, 3);
    }
}
