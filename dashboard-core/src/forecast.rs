use serde::{Deserialize, Serialize};

use crate::model::ForecastSample;

/// How the 3-hourly series is thinned into one entry per day.
///
/// The defaults assume the upstream cadence of 8 samples per 24h and a
/// series that starts at the first sample of interest; nothing checks either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingPolicy {
    pub stride: usize,
    pub max_entries: usize,
}

impl SamplingPolicy {
    pub const DEFAULT_STRIDE: usize = 8;
    pub const DEFAULT_MAX_ENTRIES: usize = 5;
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            stride: Self::DEFAULT_STRIDE,
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Pick every `stride`-th sample starting at index 0, at most `max_entries` of them.
pub fn sample_daily(samples: &[ForecastSample], policy: SamplingPolicy) -> Vec<ForecastSample> {
    samples
        .iter()
        .step_by(policy.stride.max(1))
        .take(policy.max_entries)
        .cloned()
        .collect()
}
