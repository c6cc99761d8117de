//! Course identity and catalog requirement model.
//!
//! A course is identified by its program code and designation code, both
//! opaque strings (`CS` / `1101`). Its catalog entry records the credit
//! hours, the semesters it is offered in, and its prerequisites in
//! disjunctive normal form.
//!
//! # Placeholder courses
//! A catalog entry with zero credit hours is a requirement group ("CS major",
//! "Humanities core"). It never consumes term capacity and its term is
//! derived after the real courses are placed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::Semester;

/// One AND-group of a DNF prerequisite formula.
pub type Clause = Vec<Course>;

/// A course identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Course {
    /// Program (department) code, e.g. `CS`.
    pub program: String,
    /// Designation within the program, e.g. `1101` or `major`.
    pub designation: String,
}

impl Course {
    /// Creates a course identity.
    pub fn new(program: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            designation: designation.into(),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.designation)
    }
}

/// Error returned when a course code cannot be split into program and designation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid course code '{0}'")]
pub struct ParseCourseError(pub String);

impl FromStr for Course {
    type Err = ParseCourseError;

    /// Parses `"CS 1101"`, `"CS1101"` or `"ES-ENGR 2100"`.
    ///
    /// The program is the leading run of uppercase letters, optionally
    /// prefixed by one hyphenated uppercase segment. The rest is the designation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((program, designation)) = s.split_once(char::is_whitespace) {
            let designation = designation.trim();
            if !program.is_empty() && !designation.is_empty() {
                return Ok(Course::new(program, designation));
            }
            return Err(ParseCourseError(s.to_string()));
        }

        let upper_run = |text: &str| {
            text.char_indices()
                .find(|(_, c)| !c.is_ascii_uppercase())
                .map_or(text.len(), |(i, _)| i)
        };

        let mut split = upper_run(s);
        if s[split..].starts_with('-') {
            let rest = &s[split + 1..];
            let second = upper_run(rest);
            if second > 0 {
                split += 1 + second;
            }
        }

        if split == 0 || split == s.len() {
            return Err(ParseCourseError(s.to_string()));
        }
        Ok(Course::new(&s[..split], &s[split..]))
    }
}

/// Catalog entry for a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRequirement {
    /// Credit hours. Zero marks a placeholder requirement group.
    pub credits: u32,
    /// Semesters of the year in which the course is offered.
    #[serde(default)]
    pub offered: BTreeSet<Semester>,
    /// Prerequisites in DNF: any one clause suffices, every member of a
    /// clause is required. Clause order is catalog order.
    #[serde(default)]
    pub prerequisites: Vec<Clause>,
}

impl CourseRequirement {
    /// Creates a requirement with no prerequisites and no offerings.
    pub fn new(credits: u32) -> Self {
        Self {
            credits,
            offered: BTreeSet::new(),
            prerequisites: Vec::new(),
        }
    }

    /// Creates a zero-credit requirement group.
    pub fn placeholder() -> Self {
        Self::new(0)
    }

    /// Adds a semester in which the course is offered.
    pub fn offered_in(mut self, semester: Semester) -> Self {
        self.offered.insert(semester);
        self
    }

    /// Marks the course as offered in both Fall and Spring.
    pub fn offered_every_term(self) -> Self {
        self.offered_in(Semester::Fall).offered_in(Semester::Spring)
    }

    /// Appends a DNF clause.
    pub fn with_clause(mut self, clause: impl IntoIterator<Item = Course>) -> Self {
        self.prerequisites.push(clause.into_iter().collect());
        self
    }

    /// Whether this entry is a zero-credit requirement group.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.credits == 0
    }

    /// Whether the course has no prerequisites.
    #[inline]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Whether the course is offered in the given semester.
    #[inline]
    pub fn is_offered(&self, semester: Semester) -> bool {
        self.offered.contains(&semester)
    }

    /// Clauses to try when scheduling: the catalog clauses, or a single
    /// empty clause when the course has no prerequisites.
    pub fn clauses(&self) -> Vec<Clause> {
        if self.prerequisites.is_empty() {
            vec![Vec::new()]
        } else {
            self.prerequisites.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_code() {
        let c: Course = "CS1101".parse().unwrap();
        assert_eq!(c, Course::new("CS", "1101"));
    }

    #[test]
    fn test_parse_hyphenated_program() {
        let c: Course = "ES-ENGR2100".parse().unwrap();
        assert_eq!(c.program, "ES-ENGR");
        assert_eq!(c.designation, "2100");
    }

    #[test]
    fn test_parse_spaced_code() {
        let c: Course = "MATH 155A".parse().unwrap();
        assert_eq!(c, Course::new("MATH", "155A"));
        assert_eq!(c.to_string(), "MATH 155A");
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert!("1101".parse::<Course>().is_err());
        assert!("CS".parse::<Course>().is_err());
        assert!("".parse::<Course>().is_err());
    }

    #[test]
    fn test_requirement_builder() {
        let req = CourseRequirement::new(3)
            .offered_every_term()
            .with_clause([Course::new("MATH", "101")])
            .with_clause([Course::new("MATH", "102"), Course::new("MATH", "103")]);

        assert_eq!(req.credits, 3);
        assert!(req.is_offered(Semester::Fall));
        assert!(req.is_offered(Semester::Spring));
        assert!(!req.is_offered(Semester::Summer));
        assert_eq!(req.prerequisites.len(), 2);
        assert!(!req.is_placeholder());
    }

    #[test]
    fn test_clauses_default_to_single_empty_clause() {
        let req = CourseRequirement::new(3);
        assert_eq!(req.clauses(), vec![Vec::<Course>::new()]);
        assert!(CourseRequirement::placeholder().is_placeholder());
    }
}
