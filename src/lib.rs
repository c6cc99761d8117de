//! Degree planning over DNF course prerequisites.
//!
//! Given a course catalog, a list of goal courses, and the courses a student
//! has already completed, produces a term-by-term plan over the eight
//! Fall/Spring terms of a four-year program.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `CourseRequirement`, `Catalog`,
//!   `Term`, `Plan`, `ScheduledEntry`
//! - **`validation`**: Request integrity checks (unknown courses, prerequisite cycles)
//! - **`heuristic`**: Memoized lower bounds on terms and credit hours
//! - **`scheduler`**: Backtracking search, feasibility predicate, plan
//!   finalization and summary
//! - **`config`**: Credit limits, padding and search budget
//! - **`error`**: `SchedulingError`
//!
//! # Architecture
//!
//! The crate is pure computation: no I/O, no global state, no threads.
//! Catalog loading and plan rendering belong to the caller; `Catalog` and
//! `Plan` derive serde traits for that purpose.
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach"
//! - Cormen et al. (2009), "Introduction to Algorithms"

pub mod config;
pub mod error;
pub mod heuristic;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::SearchConfig;
pub use error::{ErrorKind, Result, SchedulingError};
pub use scheduler::{schedule_courses, PlanRequest, PlanSummary, Scheduler, SearchOutcome, SearchStats};
