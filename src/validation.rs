//! Input validation for planning requests.
//!
//! Checks structural integrity of the catalog, goals, and completed courses
//! before any search runs. Detects:
//! - Goals or completed courses missing from the catalog
//! - Prerequisite references that do not resolve to a catalog entry
//! - Circular prerequisite dependencies reachable from a goal
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::error::SchedulingError;
use crate::models::{Catalog, Course};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending course.
    pub course: Course,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A goal or completed course has no catalog entry.
    UnknownCourse,
    /// A catalog prerequisite clause references a course with no entry.
    InvalidPrerequisite,
    /// The prerequisite graph contains a cycle.
    CyclicRequirement,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, course: Course, message: impl Into<String>) -> Self {
        Self {
            kind,
            course,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for SchedulingError {
    fn from(err: ValidationError) -> Self {
        match err.kind {
            ValidationErrorKind::UnknownCourse | ValidationErrorKind::InvalidPrerequisite => {
                SchedulingError::NotFound { course: err.course }
            }
            ValidationErrorKind::CyclicRequirement => {
                SchedulingError::CyclicRequirement { course: err.course }
            }
        }
    }
}

/// Validates a planning request.
///
/// Checks:
/// 1. Every goal has a catalog entry
/// 2. Every completed course has a catalog entry
/// 3. Every prerequisite reference in the catalog resolves
/// 4. No prerequisite cycle is reachable from a goal
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// the order above.
pub fn validate_request(catalog: &Catalog, goals: &[Course], completed: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();

    for goal in goals {
        if !catalog.contains(goal) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                goal.clone(),
                format!("Goal '{goal}' is not in the catalog"),
            ));
        }
    }

    for done in completed {
        if !catalog.contains(done) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                done.clone(),
                format!("Completed course '{done}' is not in the catalog"),
            ));
        }
    }

    let mut reported = HashSet::new();
    for (course, req) in catalog.iter() {
        for member in req.prerequisites.iter().flatten() {
            if !catalog.contains(member) && reported.insert(member) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPrerequisite,
                    member.clone(),
                    format!("Course '{course}' references unknown prerequisite '{member}'"),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(catalog, goals) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a request and converts the first problem into a [`SchedulingError`].
pub fn check_request(
    catalog: &Catalog,
    goals: &[Course],
    completed: &[Course],
) -> Result<(), SchedulingError> {
    validate_request(catalog, goals, completed).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .map(SchedulingError::from)
            .unwrap_or(SchedulingError::Infeasible)
    })
}

/// Detects cycles in the prerequisite graph reachable from `goals`.
///
/// # Algorithm
/// DFS over every clause member. If a back-edge is found (visiting a course
/// currently in the recursion stack), a cycle exists. Goals are visited in
/// order, so the reported course is deterministic.
fn detect_cycles(catalog: &Catalog, goals: &[Course]) -> Option<ValidationError> {
    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for goal in goals {
        if visited.contains(goal) {
            continue;
        }
        if let Some(course) = find_cycle_dfs(goal, catalog, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicRequirement,
                course.clone(),
                format!("Circular prerequisite detected involving course '{course}'"),
            ));
        }
    }

    None
}

fn find_cycle_dfs<'a>(
    course: &'a Course,
    catalog: &'a Catalog,
    visited: &mut HashSet<&'a Course>,
    in_stack: &mut HashSet<&'a Course>,
) -> Option<&'a Course> {
    visited.insert(course);
    in_stack.insert(course);

    if let Some(req) = catalog.get(course) {
        for next in req.prerequisites.iter().flatten() {
            if in_stack.contains(next) {
                return Some(next); // Back edge → cycle
            }
            if !visited.contains(next) {
                if let Some(found) = find_cycle_dfs(next, catalog, visited, in_stack) {
                    return Some(found);
                }
            }
        }
    }

    in_stack.remove(course);
    None
}
