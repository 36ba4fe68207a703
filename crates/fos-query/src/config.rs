//! Query configuration

use crate::vendor::{VendorMap, DEFAULT_VENDOR_MAP};

/// Collection configuration options
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Vendor-prefix tables used for style and event fan-out
    pub vendor: &'static VendorMap,

    /// Delay before a transition's style delta is written (ms)
    pub transition_delay_ms: u64,

    /// Display value `show()` uses when nothing was remembered
    pub fallback_display: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            vendor: &DEFAULT_VENDOR_MAP,
            transition_delay_ms: 10,
            fallback_display: "block".to_string(),
        }
    }
}
