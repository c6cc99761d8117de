//! Term planning.
//!
//! Places goal courses into the eight terms of a four-year program so that
//! every prerequisite clause is satisfied strictly earlier, every course sits
//! in a semester it is offered in, and no term exceeds the credit ceiling.
//!
//! # Pipeline
//!
//! 1. **Validation**: unknown courses and prerequisite cycles are rejected
//!    before any search runs.
//! 2. **Search**: goal-directed backtracking over DNF clauses and candidate
//!    terms, ranked by the lower-bound estimator.
//! 3. **Finalization**: placeholders are moved to their earliest satisfied
//!    term and under-filled terms are padded.
//!
//! # Example
//!
//! ```
//! use degree_planner::models::{Catalog, Course, CourseRequirement};
//! use degree_planner::scheduler::schedule_courses;
//!
//! let math101: Course = "MATH101".parse().unwrap();
//! let math201: Course = "MATH201".parse().unwrap();
//! let catalog = Catalog::new()
//!     .with_course(math101.clone(), CourseRequirement::new(3).offered_every_term())
//!     .with_course(
//!         math201.clone(),
//!         CourseRequirement::new(3)
//!             .offered_every_term()
//!             .with_clause([math101.clone()]),
//!     );
//!
//! let plan = schedule_courses(&catalog, &[math201.clone()], &[]).unwrap();
//! assert!(plan.term_of(&math101) < plan.term_of(&math201));
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 11
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

mod feasibility;
mod finalize;
mod search;
mod summary;

pub use feasibility::{check_candidate, Rejection};
pub use finalize::{finalize, pad_terms, push_higher_levels};
pub use search::{SearchOutcome, SearchStats};
pub use summary::PlanSummary;

use log::info;

use crate::config::SearchConfig;
use crate::error::{Result, SchedulingError};
use crate::models::{Catalog, Course, Plan};
use crate::validation::check_request;
use search::Search;

/// Input container for planning.
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Courses the student still needs, in priority order.
    pub goals: Vec<Course>,
    /// Courses completed before the program starts.
    pub completed: Vec<Course>,
}

impl PlanRequest {
    /// Creates a request for the given goals.
    pub fn new(goals: impl IntoIterator<Item = Course>) -> Self {
        Self {
            goals: goals.into_iter().collect(),
            completed: Vec::new(),
        }
    }

    /// Sets the completed courses.
    pub fn with_completed(mut self, completed: impl IntoIterator<Item = Course>) -> Self {
        self.completed = completed.into_iter().collect();
        self
    }
}

/// Backtracking term planner.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SearchConfig,
}

impl Scheduler {
    /// Creates a planner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validates the request and runs the search without finalizing.
    ///
    /// The returned plan, if any, still holds completed courses in the
    /// pre-program term and placeholders in the final term.
    pub fn search(
        &self,
        catalog: &Catalog,
        goals: &[Course],
        completed: &[Course],
    ) -> Result<(SearchOutcome, SearchStats)> {
        check_request(catalog, goals, completed)?;
        Ok(Search::new(catalog, &self.config, completed).run(goals, completed))
    }

    /// Plans `goals` and finalizes the result.
    ///
    /// # Errors
    /// - `NotFound` / `CyclicRequirement` for a malformed request
    /// - `Infeasible` when no placement satisfies every constraint
    /// - `BudgetExceeded` when the step budget or time limit runs out
    pub fn schedule(&self, catalog: &Catalog, goals: &[Course], completed: &[Course]) -> Result<Plan> {
        let (outcome, stats) = self.search(catalog, goals, completed)?;
        info!(
            "planning {} goals: {} after {} steps ({} backtracks, {} pruned)",
            goals.len(),
            outcome,
            stats.steps,
            stats.backtracks,
            stats.pruned
        );

        match outcome {
            SearchOutcome::Planned(plan) => Ok(finalize(plan, catalog, &self.config, completed)),
            SearchOutcome::Infeasible => Err(SchedulingError::Infeasible),
            SearchOutcome::BudgetExceeded { steps } => Err(SchedulingError::BudgetExceeded { steps }),
        }
    }

    /// Plans a [`PlanRequest`].
    pub fn schedule_request(&self, catalog: &Catalog, request: &PlanRequest) -> Result<Plan> {
        self.schedule(catalog, &request.goals, &request.completed)
    }
}

/// Plans `goals` with the default configuration.
pub fn schedule_courses(catalog: &Catalog, goals: &[Course], completed: &[Course]) -> Result<Plan> {
    Scheduler::new().schedule(catalog, goals, completed)
}
