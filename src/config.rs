//! Search configuration.
//!
//! Credit-hour limits, padding policy and the search budget. All fields
//! have defaults, so a partial JSON document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hard ceiling on credit hours in any real term.
    pub max_credits_per_term: u32,
    /// Padding target for non-empty terms. Never enforced during search.
    pub min_credits_per_term: u32,
    /// Maximum number of search expansions. `None` = unlimited.
    pub step_budget: Option<u64>,
    /// Wall-clock limit for one search (ms). `None` = unlimited.
    pub time_limit_ms: Option<u64>,
    /// Whether under-filled terms are padded with filler courses.
    pub pad_terms: bool,
    /// Whether branches whose remaining real goals cannot fit in the
    /// remaining term capacity are cut early.
    pub capacity_pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_credits_per_term: 18,
            min_credits_per_term: 12,
            step_budget: Some(1_000_000),
            time_limit_ms: None,
            pad_terms: true,
            capacity_pruning: true,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-term credit ceiling.
    pub fn with_max_credits(mut self, credits: u32) -> Self {
        self.max_credits_per_term = credits;
        self
    }

    /// Sets the padding target.
    pub fn with_min_credits(mut self, credits: u32) -> Self {
        self.min_credits_per_term = credits;
        self
    }

    /// Sets the expansion budget.
    pub fn with_step_budget(mut self, steps: u64) -> Self {
        self.step_budget = Some(steps);
        self
    }

    /// Removes the expansion budget.
    pub fn without_step_budget(mut self) -> Self {
        self.step_budget = None;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Enables or disables padding.
    pub fn with_padding(mut self, pad: bool) -> Self {
        self.pad_terms = pad;
        self
    }

    /// Enables or disables capacity pruning.
    pub fn with_capacity_pruning(mut self, enabled: bool) -> Self {
        self.capacity_pruning = enabled;
        self
    }

    /// Wall-clock limit as a `Duration`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
