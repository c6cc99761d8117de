//! Course catalog.
//!
//! Read-only mapping from course identity to its requirement entry.
//! Iteration order is the course ordering (program, then designation), so
//! any pass over the catalog is deterministic for a fixed catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Course, CourseRequirement};

/// Course catalog.
///
/// Serializes as a list of rows, each row being the course identity
/// flattened together with its requirement:
/// `[{"course": {"program": "CS", "designation": "1101"}, "credits": 3, "offered": ["Fall"], "prerequisites": []}]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CatalogRow>", into = "Vec<CatalogRow>")]
pub struct Catalog {
    entries: BTreeMap<Course, CourseRequirement>,
}

/// Serialized form of one catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRow {
    pub course: Course,
    #[serde(flatten)]
    pub requirement: CourseRequirement,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an entry.
    pub fn with_course(mut self, course: Course, requirement: CourseRequirement) -> Self {
        self.insert(course, requirement);
        self
    }

    /// Adds (or replaces) an entry.
    pub fn insert(&mut self, course: Course, requirement: CourseRequirement) {
        self.entries.insert(course, requirement);
    }

    /// Looks up a course.
    pub fn get(&self, course: &Course) -> Option<&CourseRequirement> {
        self.entries.get(course)
    }

    /// Whether the catalog has an entry for `course`.
    pub fn contains(&self, course: &Course) -> bool {
        self.entries.contains_key(course)
    }

    /// Credit hours for a course, zero when unknown.
    pub fn credits(&self, course: &Course) -> u32 {
        self.get(course).map_or(0, |r| r.credits)
    }

    /// Whether a course is a zero-credit requirement group.
    pub fn is_placeholder(&self, course: &Course) -> bool {
        self.get(course).is_some_and(CourseRequirement::is_placeholder)
    }

    /// Iterates entries in course order.
    pub fn iter(&self) -> impl Iterator<Item = (&Course, &CourseRequirement)> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Course, CourseRequirement)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (Course, CourseRequirement)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<CatalogRow>> for Catalog {
    fn from(rows: Vec<CatalogRow>) -> Self {
        rows.into_iter()
            .map(|row| (row.course, row.requirement))
            .collect()
    }
}

impl From<Catalog> for Vec<CatalogRow> {
    fn from(catalog: Catalog) -> Self {
        catalog
            .entries
            .into_iter()
            .map(|(course, requirement)| CatalogRow {
                course,
                requirement,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Semester;

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_course(
                Course::new("MATH", "101"),
                CourseRequirement::new(3).offered_every_term(),
            )
            .with_course(
                Course::new("MATH", "201"),
                CourseRequirement::new(3)
                    .offered_every_term()
                    .with_clause([Course::new("MATH", "101")]),
            )
            .with_course(
                Course::new("CS", "major"),
                CourseRequirement::placeholder().with_clause([Course::new("MATH", "201")]),
            )
    }

    #[test]
    fn test_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.credits(&Course::new("MATH", "201")), 3);
        assert_eq!(catalog.credits(&Course::new("MATH", "999")), 0);
        assert!(catalog.is_placeholder(&Course::new("CS", "major")));
        assert!(!catalog.is_placeholder(&Course::new("MATH", "101")));
        assert!(!catalog.contains(&Course::new("MATH", "999")));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let catalog = sample_catalog();
        let courses: Vec<&Course> = catalog.iter().map(|(c, _)| c).collect();
        assert_eq!(courses[0], &Course::new("CS", "major"));
        assert_eq!(courses[2], &Course::new("MATH", "201"));
    }

    #[test]
    fn test_json_rows() {
        let json = r#"[
            {"course": {"program": "MATH", "designation": "101"}, "credits": 3, "offered": ["Fall", "Spring"]},
            {"course": {"program": "MATH", "designation": "201"}, "credits": 4, "offered": ["Spring"],
             "prerequisites": [[{"program": "MATH", "designation": "101"}]]}
        ]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);

        let math201 = catalog.get(&Course::new("MATH", "201")).unwrap();
        assert_eq!(math201.credits, 4);
        assert!(math201.is_offered(Semester::Spring));
        assert!(!math201.is_offered(Semester::Fall));
        assert_eq!(math201.prerequisites, vec![vec![Course::new("MATH", "101")]]);

        let back = serde_json::to_string(&catalog).unwrap();
        let reparsed: Catalog = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, catalog);
    }
}
