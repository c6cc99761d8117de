//! Term-feasibility predicate.
//!
//! Decides whether a candidate entry can be added to a partial plan.
//!
//! # Rules
//! 1. The course is offered in the candidate term's semester
//!    (placeholders are exempt).
//! 2. The course is not already in the plan.
//! 3. The term's credit hours, candidate included, stay within the ceiling.
//! 4. Ordering, skipped when either side is a placeholder: the candidate
//!    may not sit at or after an entry that lists it in its clause, and no
//!    member of the candidate's clause may sit at or after the candidate.
//! 5. Ordering through placeholders: once placeholders are involved, every
//!    real entry must still come strictly after each course its clause
//!    reaches through placeholder clauses.

use std::fmt;

use crate::models::{Course, CourseRequirement, Plan, ScheduledEntry, Term};

/// Reason a candidate entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The course is not offered in the term's semester.
    NotOffered,
    /// The course is already in the plan.
    AlreadyScheduled,
    /// The term would exceed the credit ceiling.
    CreditLimit { hours: u32 },
    /// An entry that depends on the candidate is at or before the candidate's term.
    DependentNotLater { dependent: Course, term: Term },
    /// A prerequisite of the candidate is at or after the candidate's term.
    PrerequisiteNotEarlier { prerequisite: Course, term: Term },
    /// A placeholder links a real course to a prerequisite that is not
    /// strictly earlier.
    GroupOrder { dependent: Course, prerequisite: Course },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotOffered => write!(f, "not offered"),
            Rejection::AlreadyScheduled => write!(f, "already scheduled"),
            Rejection::CreditLimit { hours } => write!(f, "term would carry {hours} hours"),
            Rejection::DependentNotLater { dependent, term } => {
                write!(f, "{dependent} in {term} depends on it")
            }
            Rejection::PrerequisiteNotEarlier { prerequisite, term } => {
                write!(f, "prerequisite {prerequisite} is in {term}")
            }
            Rejection::GroupOrder { dependent, prerequisite } => {
                write!(f, "{dependent} would not follow {prerequisite}")
            }
        }
    }
}

/// Checks whether `candidate` can join `plan`.
pub fn check_candidate(
    plan: &Plan,
    candidate: &ScheduledEntry,
    requirement: &CourseRequirement,
    max_credits: u32,
) -> Result<(), Rejection> {
    if !candidate.is_placeholder() && !requirement.is_offered(candidate.term.semester) {
        return Err(Rejection::NotOffered);
    }

    if plan.contains(&candidate.course) {
        return Err(Rejection::AlreadyScheduled);
    }

    let hours = plan.hours_in(candidate.term) + candidate.credits;
    if candidate.term.is_real() && hours > max_credits {
        return Err(Rejection::CreditLimit { hours });
    }

    if !candidate.is_placeholder() {
        for e in plan.entries.iter().filter(|e| !e.is_placeholder()) {
            if e.term <= candidate.term && e.clause.contains(&candidate.course) {
                return Err(Rejection::DependentNotLater {
                    dependent: e.course.clone(),
                    term: e.term,
                });
            }
            if e.term >= candidate.term && candidate.clause.contains(&e.course) {
                return Err(Rejection::PrerequisiteNotEarlier {
                    prerequisite: e.course.clone(),
                    term: e.term,
                });
            }
        }
    }

    if candidate.is_placeholder() || plan.entries.iter().any(ScheduledEntry::is_placeholder) {
        let extended = plan.with_entry(candidate.clone());
        if let Some((dependent, prereq)) = extended.ordering_conflicts().first() {
            return Err(Rejection::GroupOrder {
                dependent: dependent.course.clone(),
                prerequisite: prereq.course.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Semester;

    fn c(code: &str) -> Course {
        code.parse().unwrap()
    }

    fn term(slot: u8) -> Term {
        Term::from_slot(slot).unwrap()
    }

    fn every_term(credits: u32) -> CourseRequirement {
        CourseRequirement::new(credits).offered_every_term()
    }

    #[test]
    fn test_empty_plan_accepts() {
        let plan = Plan::new();
        let cand = ScheduledEntry::new(c("MATH101"), term(1), vec![], 3);
        assert!(check_candidate(&plan, &cand, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_not_offered() {
        let plan = Plan::new();
        let req = CourseRequirement::new(3).offered_in(Semester::Fall);
        let cand = ScheduledEntry::new(c("MATH101"), term(2), vec![], 3);
        assert_eq!(check_candidate(&plan, &cand, &req, 18), Err(Rejection::NotOffered));
    }

    #[test]
    fn test_already_scheduled() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("MATH101"), Term::PRE_PROGRAM, vec![], 3));
        let cand = ScheduledEntry::new(c("MATH101"), term(3), vec![], 3);
        assert_eq!(
            check_candidate(&plan, &cand, &every_term(3), 18),
            Err(Rejection::AlreadyScheduled)
        );
    }

    #[test]
    fn test_credit_limit() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("CHEM101"), term(1), vec![], 16));
        let cand = ScheduledEntry::new(c("MATH101"), term(1), vec![], 3);
        assert_eq!(
            check_candidate(&plan, &cand, &every_term(3), 18),
            Err(Rejection::CreditLimit { hours: 19 })
        );
        let cand = ScheduledEntry::new(c("MATH101"), term(2), vec![], 3);
        assert!(check_candidate(&plan, &cand, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_single_course_over_limit() {
        let plan = Plan::new();
        let cand = ScheduledEntry::new(c("THESIS500"), term(8), vec![], 20);
        assert!(check_candidate(&plan, &cand, &every_term(20), 18).is_err());
    }

    #[test]
    fn test_prerequisite_must_be_strictly_earlier() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("MATH201"), term(3), vec![c("MATH101")], 3));

        // Same term as dependent → rejected
        let same = ScheduledEntry::new(c("MATH101"), term(3), vec![], 3);
        assert!(matches!(
            check_candidate(&plan, &same, &every_term(3), 18),
            Err(Rejection::DependentNotLater { .. })
        ));
        // After dependent → rejected
        let later = ScheduledEntry::new(c("MATH101"), term(4), vec![], 3);
        assert!(check_candidate(&plan, &later, &every_term(3), 18).is_err());
        // Before → accepted
        let earlier = ScheduledEntry::new(c("MATH101"), term(2), vec![], 3);
        assert!(check_candidate(&plan, &earlier, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_dependent_must_be_strictly_later() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("MATH101"), term(2), vec![], 3));

        let same = ScheduledEntry::new(c("MATH201"), term(2), vec![c("MATH101")], 3);
        assert!(matches!(
            check_candidate(&plan, &same, &every_term(3), 18),
            Err(Rejection::PrerequisiteNotEarlier { .. })
        ));
        let later = ScheduledEntry::new(c("MATH201"), term(3), vec![c("MATH101")], 3);
        assert!(check_candidate(&plan, &later, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_completed_prerequisite_is_earlier() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("MATH101"), Term::PRE_PROGRAM, vec![], 3));
        let cand = ScheduledEntry::new(c("MATH201"), term(1), vec![c("MATH101")], 3);
        assert!(check_candidate(&plan, &cand, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_placeholder_skips_ordering_and_offering() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("MATH201"), term(8), vec![c("MATH101")], 3));
        let group = ScheduledEntry::new(c("CS major"), term(8), vec![c("MATH201")], 0);
        assert!(check_candidate(&plan, &group, &CourseRequirement::placeholder(), 18).is_ok());

        // A real course listed in a placeholder's clause is not ordered against it.
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("CS major"), term(8), vec![c("CS1101")], 0));
        let cand = ScheduledEntry::new(c("CS1101"), term(8), vec![], 3);
        assert!(check_candidate(&plan, &cand, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_ordering_through_placeholder() {
        // R300 needs the group, the group was placed with X100.
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("R300"), term(2), vec![c("P core")], 3));
        plan.push(ScheduledEntry::new(c("P core"), term(8), vec![c("X100")], 0));

        let same = ScheduledEntry::new(c("X100"), term(2), vec![], 3);
        assert_eq!(
            check_candidate(&plan, &same, &every_term(3), 18),
            Err(Rejection::GroupOrder {
                dependent: c("R300"),
                prerequisite: c("X100"),
            })
        );
        let later = ScheduledEntry::new(c("X100"), term(4), vec![], 3);
        assert!(check_candidate(&plan, &later, &every_term(3), 18).is_err());
        let earlier = ScheduledEntry::new(c("X100"), term(1), vec![], 3);
        assert!(check_candidate(&plan, &earlier, &every_term(3), 18).is_ok());
    }

    #[test]
    fn test_placeholder_candidate_links_existing_courses() {
        let mut plan = Plan::new();
        plan.push(ScheduledEntry::new(c("X100"), term(2), vec![], 3));
        plan.push(ScheduledEntry::new(c("R300"), term(2), vec![c("P core")], 3));

        let group = ScheduledEntry::new(c("P core"), term(8), vec![c("X100")], 0);
        assert!(matches!(
            check_candidate(&plan, &group, &CourseRequirement::placeholder(), 18),
            Err(Rejection::GroupOrder { .. })
        ));
    }
}
