//! Plan summary metrics.
//!
//! Computes load indicators from a finalized plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total credits | Sum of credit hours over real terms |
//! | Terms used | Real terms carrying at least one credit hour |
//! | Under-filled terms | Non-empty terms below the padding target |
//! | Filler count | Entries added by padding |
//! | Final term | Latest term holding a real course |

use std::collections::BTreeMap;

use crate::config::SearchConfig;
use crate::models::{Plan, Term};

/// Load indicators of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    /// Credit hours across all real terms.
    pub total_credits: u32,
    /// Number of real terms with credit hours.
    pub terms_used: usize,
    /// Credit hours per real term, zero-filled.
    pub hours_by_term: BTreeMap<Term, u32>,
    /// Non-empty terms below the padding target.
    pub under_filled: Vec<Term>,
    /// Entries added by padding.
    pub filler_count: usize,
    /// Latest term holding a course with credit hours.
    pub final_term: Option<Term>,
}

impl PlanSummary {
    /// Computes the summary of `plan` against the limits in `config`.
    pub fn calculate(plan: &Plan, config: &SearchConfig) -> Self {
        let hours_by_term = plan.hours_by_term();

        let terms_used = hours_by_term.values().filter(|&&h| h > 0).count();
        let under_filled = hours_by_term
            .iter()
            .filter(|&(_, &h)| h > 0 && h < config.min_credits_per_term)
            .map(|(&t, _)| t)
            .collect();
        let final_term = hours_by_term
            .iter()
            .rev()
            .find(|&(_, &h)| h > 0)
            .map(|(&t, _)| t);

        Self {
            total_credits: hours_by_term.values().sum(),
            terms_used,
            hours_by_term,
            under_filled,
            filler_count: plan.real_entries().filter(|e| e.filler).count(),
            final_term,
        }
    }

    /// Whether every non-empty term reaches the padding target.
    pub fn meets_target(&self) -> bool {
        self.under_filled.is_empty()
    }
}
