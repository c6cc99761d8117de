//! Error types for degree-planner.

use thiserror::Error;

use crate::models::Course;

/// Result type for planner operations.
pub type Result<T> = std::result::Result<T, SchedulingError>;

/// Errors and non-plan outcomes of a scheduling request.
///
/// `NotFound` and `CyclicRequirement` are structural: they are detected
/// before the search starts and retrying cannot help. `Infeasible` and
/// `BudgetExceeded` are search outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// A goal, completed course, or prerequisite reference has no catalog entry.
    #[error("course not found in catalog: {course}")]
    NotFound { course: Course },

    /// The prerequisite graph reachable from the goals contains a cycle.
    #[error("cyclic prerequisite requirement involving {course}")]
    CyclicRequirement { course: Course },

    /// Every clause/term alternative was exhausted without a valid plan.
    #[error("no feasible plan exists for the requested goals")]
    Infeasible,

    /// The step budget or time limit ran out before a determination.
    #[error("search budget exhausted after {steps} steps")]
    BudgetExceeded { steps: u64 },
}

/// Plain classification of [`SchedulingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    CyclicRequirement,
    Infeasible,
    BudgetExceeded,
}

impl SchedulingError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulingError::NotFound { .. } => ErrorKind::NotFound,
            SchedulingError::CyclicRequirement { .. } => ErrorKind::CyclicRequirement,
            SchedulingError::Infeasible => ErrorKind::Infeasible,
            SchedulingError::BudgetExceeded { .. } => ErrorKind::BudgetExceeded,
        }
    }

    /// Whether the error comes from a malformed request rather than the search.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SchedulingError::NotFound { .. } | SchedulingError::CyclicRequirement { .. }
        )
    }

    /// Offending course for structural errors.
    pub fn course(&self) -> Option<&Course> {
        match self {
            SchedulingError::NotFound { course } | SchedulingError::CyclicRequirement { course } => {
                Some(course)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        let missing = SchedulingError::NotFound {
            course: Course::new("CS", "9999"),
        };
        assert!(missing.is_structural());
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.course(), Some(&Course::new("CS", "9999")));

        assert!(!SchedulingError::Infeasible.is_structural());
        assert!(!SchedulingError::BudgetExceeded { steps: 10 }.is_structural());
        assert_eq!(SchedulingError::Infeasible.course(), None);
    }

    #[test]
    fn test_messages() {
        let err = SchedulingError::CyclicRequirement {
            course: Course::new("MATH", "201"),
        };
        assert_eq!(
            err.to_string(),
            "cyclic prerequisite requirement involving MATH 201"
        );
        assert_eq!(
            SchedulingError::BudgetExceeded { steps: 42 }.to_string(),
            "search budget exhausted after 42 steps"
        );
    }
}
