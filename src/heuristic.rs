//! Lower-bound distance estimates over DNF prerequisite formulas.
//!
//! For a course and a set of already-satisfied courses, the estimator
//! answers two questions:
//! - **Term height**: the minimum number of terms needed to take the course
//!   and everything it transitively requires.
//! - **Credit cost**: the minimum credit hours needed for the same.
//!
//! Both take the cheapest clause (min over clauses). Term height combines
//! clause members by max (they can run in parallel), credit cost by sum.
//! Placeholder courses add no term of their own.
//!
//! Estimates only rank search choices; they never decide feasibility.
//!
//! # Memoization
//! Results depend on the satisfied set, so the memo lives inside an
//! estimator bound to one satisfied set. Build a new estimator for a new
//! context; never share one across contexts.

use std::collections::{HashMap, HashSet};

use crate::models::{Catalog, Course};

/// Memoized term-height and credit-cost estimator.
#[derive(Debug)]
pub struct Estimator<'a> {
    catalog: &'a Catalog,
    satisfied: HashSet<Course>,
    term_memo: HashMap<Course, u32>,
    credit_memo: HashMap<Course, u32>,
}

impl<'a> Estimator<'a> {
    /// Creates an estimator for a given already-satisfied set.
    pub fn new(catalog: &'a Catalog, satisfied: impl IntoIterator<Item = Course>) -> Self {
        Self {
            catalog,
            satisfied: satisfied.into_iter().collect(),
            term_memo: HashMap::new(),
            credit_memo: HashMap::new(),
        }
    }

    /// Minimum number of terms to take `course` and its prerequisites.
    ///
    /// 0 when already satisfied, 1 when it has no prerequisites.
    pub fn min_terms(&mut self, course: &Course) -> u32 {
        if self.satisfied.contains(course) {
            return 0;
        }
        let Some(req) = self.catalog.get(course) else {
            return 0;
        };
        if !req.has_prerequisites() {
            return 1;
        }
        if let Some(&cached) = self.term_memo.get(course) {
            return cached;
        }

        let own = if req.is_placeholder() { 0 } else { 1 };
        let mut best = u32::MAX;
        for clause in &req.prerequisites {
            let height = own + self.clause_terms(clause);
            best = best.min(height);
        }

        self.term_memo.insert(course.clone(), best);
        best
    }

    /// Minimum credit hours to take `course` and its prerequisites.
    ///
    /// 0 when already satisfied, the course's own credits when it has no
    /// prerequisites.
    pub fn min_credits(&mut self, course: &Course) -> u32 {
        if self.satisfied.contains(course) {
            return 0;
        }
        let Some(req) = self.catalog.get(course) else {
            return 0;
        };
        if !req.has_prerequisites() {
            return req.credits;
        }
        if let Some(&cached) = self.credit_memo.get(course) {
            return cached;
        }

        let own = req.credits;
        let mut best = u32::MAX;
        for clause in &req.prerequisites {
            let total = own.saturating_add(self.clause_credits(clause));
            best = best.min(total);
        }

        self.credit_memo.insert(course.clone(), best);
        best
    }

    /// Term height of a clause: the hardest member decides.
    pub fn clause_terms(&mut self, clause: &[Course]) -> u32 {
        clause.iter().map(|m| self.min_terms(m)).max().unwrap_or(0)
    }

    /// Credit cost of a clause: every member is paid for.
    pub fn clause_credits(&mut self, clause: &[Course]) -> u32 {
        clause
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(self.min_credits(m)))
    }

    /// Indices of `clauses` ordered by ascending term height.
    ///
    /// The sort is stable, so equal heights keep catalog order.
    pub fn rank_clauses(&mut self, clauses: &[Vec<Course>]) -> Vec<usize> {
        let heights: Vec<u32> = clauses.iter().map(|c| self.clause_terms(c)).collect();
        let mut indices: Vec<usize> = (0..clauses.len()).collect();
        indices.sort_by_key(|&i| heights[i]);
        indices
    }

    /// Orders courses hardest first (descending term height, then
    /// descending credit cost). The sort is stable.
    pub fn hardest_first(&mut self, courses: &mut [Course]) {
        let keys: HashMap<Course, (u32, u32)> = courses
            .iter()
            .map(|c| (c.clone(), (self.min_terms(c), self.min_credits(c))))
            .collect();
        courses.sort_by(|a, b| keys[b].cmp(&keys[a]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRequirement;

    fn c(code: &str) -> Course {
        code.parse().unwrap()
    }

    /// MATH101 → MATH201 → MATH301; MATH301 alternatively needs CS1101 + CS2201.
    fn chain_catalog() -> Catalog {
        Catalog::new()
            .with_course(c("MATH101"), CourseRequirement::new(3))
            .with_course(c("MATH201"), CourseRequirement::new(4).with_clause([c("MATH101")]))
            .with_course(
                c("MATH301"),
                CourseRequirement::new(3)
                    .with_clause([c("MATH201")])
                    .with_clause([c("CS1101"), c("CS2201")]),
            )
            .with_course(c("CS1101"), CourseRequirement::new(3))
            .with_course(c("CS2201"), CourseRequirement::new(3).with_clause([c("CS1101")]))
            .with_course(
                c("CS major"),
                CourseRequirement::placeholder().with_clause([c("MATH301"), c("CS1101")]),
            )
    }

    #[test]
    fn test_min_terms_chain() {
        let catalog = chain_catalog();
        let mut est = Estimator::new(&catalog, []);
        assert_eq!(est.min_terms(&c("MATH101")), 1);
        assert_eq!(est.min_terms(&c("MATH201")), 2);
        // Either clause gives height 3.
        assert_eq!(est.min_terms(&c("MATH301")), 3);
    }

    #[test]
    fn test_min_terms_respects_satisfied_set() {
        let catalog = chain_catalog();
        let mut est = Estimator::new(&catalog, [c("MATH101")]);
        assert_eq!(est.min_terms(&c("MATH101")), 0);
        assert_eq!(est.min_terms(&c("MATH201")), 1);
        assert_eq!(est.min_terms(&c("MATH301")), 2);
    }

    #[test]
    fn test_placeholder_adds_no_term() {
        let catalog = chain_catalog();
        let mut est = Estimator::new(&catalog, []);
        assert_eq!(est.min_terms(&c("CS major")), 3);
    }

    #[test]
    fn test_min_credits() {
        let catalog = chain_catalog();
        let mut est = Estimator::new(&catalog, []);
        assert_eq!(est.min_credits(&c("MATH101")), 3);
        assert_eq!(est.min_credits(&c("MATH201")), 7);
        // MATH201 route: 3 + 7 = 10; CS route: 3 + 3 + (3 + 3) = 12.
        assert_eq!(est.min_credits(&c("MATH301")), 10);
        assert_eq!(est.min_credits(&c("CS major")), 13);
    }

    #[test]
    fn test_separate_contexts_do_not_leak() {
        let catalog = chain_catalog();
        let mut fresh = Estimator::new(&catalog, []);
        let mut done = Estimator::new(&catalog, [c("MATH201")]);
        assert_eq!(done.min_terms(&c("MATH301")), 1);
        assert_eq!(fresh.min_terms(&c("MATH301")), 3);
        assert_eq!(done.min_terms(&c("MATH301")), 1);
    }

    #[test]
    fn test_rank_clauses_stable() {
        let catalog = chain_catalog();
        let mut est = Estimator::new(&catalog, []);
        let clauses = vec![
            vec![c("MATH201")],
            vec![c("MATH101")],
            vec![c("CS1101"), c("MATH101")],
        ];
        assert_eq!(est.rank_clauses(&clauses), vec![1, 2, 0]);
    }

    #[test]
    fn test_hardest_first() {
        let catalog = chain_catalog();
        let mut est = Estimator::new(&catalog, []);
        let mut courses = vec![c("MATH101"), c("MATH301"), c("CS1101"), c("MATH201")];
        est.hardest_first(&mut courses);
        assert_eq!(courses, vec![c("MATH301"), c("MATH201"), c("MATH101"), c("CS1101")]);
    }
}
