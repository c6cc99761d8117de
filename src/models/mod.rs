//! Degree-planning domain models.
//!
//! Provides the value types consumed and produced by the planner: the
//! read-only course catalog, academic terms, and the resulting plan.
//!
//! # Domain Mappings
//!
//! | degree-planner | Meaning |
//! |----------------|---------|
//! | Course | (program, designation) identity, e.g. `CS 1101` |
//! | CourseRequirement | Catalog entry: credits, offerings, DNF prerequisites |
//! | Term | (semester, year) slot; Summer is the pre-program sentinel |
//! | ScheduledEntry | Course placed in a term, with its justifying clause |
//! | Plan | Set of scheduled entries |

mod catalog;
mod course;
mod plan;
mod term;

pub use catalog::{Catalog, CatalogRow};
pub use course::{Clause, Course, CourseRequirement, ParseCourseError};
pub use plan::{Plan, ScheduledEntry, Violation, ViolationType};
pub use term::{Semester, Term, Year};
