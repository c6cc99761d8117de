//! Plan (solution) model.
//!
//! A plan is a set of scheduled entries: each course placed in a term
//! together with the prerequisite clause that justified placing it there.
//! Each course appears at most once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::{Catalog, Clause, Course, Term};

/// A course placed in a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    /// Scheduled course.
    pub course: Course,
    /// Assigned term.
    pub term: Term,
    /// Prerequisite clause used to justify this placement. Empty for
    /// courses without prerequisites.
    pub clause: Clause,
    /// Credit hours (denormalized from the catalog).
    pub credits: u32,
    /// Whether the entry was added to pad an under-filled term.
    #[serde(default)]
    pub filler: bool,
}

impl ScheduledEntry {
    /// Creates an entry.
    pub fn new(course: Course, term: Term, clause: Clause, credits: u32) -> Self {
        Self {
            course,
            term,
            clause,
            credits,
            filler: false,
        }
    }

    /// Marks the entry as padding.
    pub fn as_filler(mut self) -> Self {
        self.filler = true;
        self
    }

    /// Whether the entry is a zero-credit requirement group.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.credits == 0
    }
}

/// A term-by-term course plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Entries in insertion order.
    pub entries: Vec<ScheduledEntry>,
}

/// A rule broken by a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Course or term the violation concerns.
    pub entity: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of plan violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A term carries more credit hours than allowed.
    CreditLimitExceeded,
    /// A prerequisite is scheduled in the same term as, or after, its dependent.
    PrerequisiteOrder,
    /// A justifying clause member is not in the plan at all.
    MissingPrerequisite,
    /// A course appears more than once.
    DuplicateCourse,
    /// A course is scheduled in a term where it is not offered.
    NotOffered,
}

impl Violation {
    fn new(violation_type: ViolationType, entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            entity: entity.into(),
            message: message.into(),
        }
    }
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ScheduledEntry) {
        self.entries.push(entry);
    }

    /// Returns a copy of this plan with `entry` appended.
    pub fn with_entry(&self, entry: ScheduledEntry) -> Self {
        let mut next = self.clone();
        next.push(entry);
        next
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `course` is scheduled (in any term, including pre-program).
    pub fn contains(&self, course: &Course) -> bool {
        self.entries.iter().any(|e| &e.course == course)
    }

    /// Entry for a given course.
    pub fn entry_for(&self, course: &Course) -> Option<&ScheduledEntry> {
        self.entries.iter().find(|e| &e.course == course)
    }

    /// Term a course is scheduled in.
    pub fn term_of(&self, course: &Course) -> Option<Term> {
        self.entry_for(course).map(|e| e.term)
    }

    /// Entries placed in a term.
    pub fn entries_in(&self, term: Term) -> impl Iterator<Item = &ScheduledEntry> {
        self.entries.iter().filter(move |e| e.term == term)
    }

    /// Entries in real (non-sentinel) terms.
    pub fn real_entries(&self) -> impl Iterator<Item = &ScheduledEntry> {
        self.entries.iter().filter(|e| e.term.is_real())
    }

    /// Credit hours scheduled in a term.
    pub fn hours_in(&self, term: Term) -> u32 {
        self.entries_in(term).map(|e| e.credits).sum()
    }

    /// Credit hours for every real term, zero-filled.
    pub fn hours_by_term(&self) -> BTreeMap<Term, u32> {
        let mut hours: BTreeMap<Term, u32> = Term::real_terms().map(|t| (t, 0)).collect();
        for e in self.real_entries() {
            *hours.entry(e.term).or_insert(0) += e.credits;
        }
        hours
    }

    /// Entries grouped by real term, in term order.
    pub fn by_term(&self) -> BTreeMap<Term, Vec<&ScheduledEntry>> {
        let mut grouped: BTreeMap<Term, Vec<&ScheduledEntry>> =
            Term::real_terms().map(|t| (t, Vec::new())).collect();
        for e in self.real_entries() {
            grouped.entry(e.term).or_default().push(e);
        }
        grouped
    }

    /// Total credit hours across real terms.
    pub fn total_credits(&self) -> u32 {
        self.real_entries().map(|e| e.credits).sum()
    }

    /// Whether every real term is within `max_credits`.
    pub fn within_credit_limit(&self, max_credits: u32) -> bool {
        self.hours_by_term().values().all(|&h| h <= max_credits)
    }

    /// Removes entries in the pre-program sentinel term.
    pub fn without_pre_program(mut self) -> Self {
        self.entries.retain(|e| e.term.is_real());
        self
    }

    /// Courses a clause ultimately depends on.
    ///
    /// Members scheduled as placeholders are replaced, transitively, by the
    /// members of the clause they were placed with. Every other member,
    /// scheduled or not, is kept as is.
    pub fn resolve_clause(&self, clause: &[Course]) -> Vec<Course> {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<&Course> = clause.iter().rev().collect();

        while let Some(member) = stack.pop() {
            if !seen.insert(member) {
                continue;
            }
            match self.entry_for(member) {
                Some(e) if e.is_placeholder() => stack.extend(e.clause.iter().rev()),
                _ => resolved.push(member.clone()),
            }
        }
        resolved
    }

    /// Pairs `(dependent, prerequisite)` of scheduled entries where the
    /// prerequisite, reached directly or through placeholders, is not in a
    /// strictly earlier term than the real dependent.
    pub fn ordering_conflicts(&self) -> Vec<(&ScheduledEntry, &ScheduledEntry)> {
        let mut conflicts = Vec::new();
        for e in self.real_entries().filter(|e| !e.is_placeholder()) {
            for member in self.resolve_clause(&e.clause) {
                if let Some(prereq) = self.entry_for(&member) {
                    if prereq.term >= e.term {
                        conflicts.push((e, prereq));
                    }
                }
            }
        }
        conflicts
    }

    /// Checks the plan against the catalog and a per-term credit ceiling.
    ///
    /// Checks:
    /// 1. Each course appears once
    /// 2. Each real term is within `max_credits`
    /// 3. Real courses are offered in their term
    /// 4. Every member of a real course's justifying clause is scheduled
    ///    strictly earlier (pre-program entries count as earliest), with
    ///    placeholder members resolved through their own clauses
    ///
    /// Placeholder entries are exempt from 3 and 4 as dependents. A clause
    /// member missing from the plan is reported unless it is listed in
    /// `completed`.
    pub fn validate(&self, catalog: &Catalog, max_credits: u32, completed: &[Course]) -> Vec<Violation> {
        let mut violations = Vec::new();

        let mut seen = HashSet::new();
        for e in &self.entries {
            if !seen.insert(&e.course) {
                violations.push(Violation::new(
                    ViolationType::DuplicateCourse,
                    e.course.to_string(),
                    format!("{} is scheduled more than once", e.course),
                ));
            }
        }

        for (term, hours) in self.hours_by_term() {
            if hours > max_credits {
                violations.push(Violation::new(
                    ViolationType::CreditLimitExceeded,
                    term.to_string(),
                    format!("{term} carries {hours} credit hours (limit {max_credits})"),
                ));
            }
        }

        for e in self.real_entries().filter(|e| !e.is_placeholder()) {
            if let Some(req) = catalog.get(&e.course) {
                if !req.is_offered(e.term.semester) {
                    violations.push(Violation::new(
                        ViolationType::NotOffered,
                        e.course.to_string(),
                        format!("{} is not offered in {}", e.course, e.term.semester),
                    ));
                }
            }

            for member in &e.clause {
                if !self.contains(member) && !completed.contains(member) {
                    violations.push(Violation::new(
                        ViolationType::MissingPrerequisite,
                        e.course.to_string(),
                        format!("{} requires {} which is not in the plan", e.course, member),
                    ));
                }
            }
        }

        for (dependent, prereq) in self.ordering_conflicts() {
            violations.push(Violation::new(
                ViolationType::PrerequisiteOrder,
                dependent.course.to_string(),
                format!(
                    "{} in {} requires {} which is scheduled in {}",
                    dependent.course, dependent.term, prereq.course, prereq.term
                ),
            ));
        }

        violations
    }
}

impl fmt::Display for Plan {
    /// Term-by-term listing with hours. Placeholder entries are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (term, entries) in self.by_term() {
            let hours: u32 = entries.iter().map(|e| e.credits).sum();
            writeln!(f, "{term} ({hours} hours)")?;
            for e in entries.iter().filter(|e| !e.is_placeholder()) {
                write!(f, "  {} [{}]", e.course, e.credits)?;
                if e.filler {
                    write!(f, " (elective)")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
