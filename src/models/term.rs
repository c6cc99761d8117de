//! Academic term model.
//!
//! A term is a (semester, academic year) pair. Scheduling uses the eight
//! Fall/Spring terms of a four-year program, numbered by slot 1..=8:
//!
//! | Slot | Term |
//! |------|------|
//! | 1 | Fall Frosh |
//! | 2 | Spring Frosh |
//! | 3 | Fall Sophomore |
//! | ... | ... |
//! | 8 | Spring Senior |
//!
//! Summer terms never receive scheduled courses. `Term::PRE_PROGRAM`
//! (Summer, Frosh) is the sentinel slot 0 that holds already-completed
//! courses and orders before every real term.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Semester within an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
    Summer,
}

/// Academic year of a four-year program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Year {
    Frosh,
    Sophomore,
    Junior,
    Senior,
}

impl Year {
    const ALL: [Year; 4] = [Year::Frosh, Year::Sophomore, Year::Junior, Year::Senior];

    fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A scheduling slot.
///
/// Ordered by slot number; every Summer term is slot 0 and therefore
/// earlier than any real term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub semester: Semester,
    pub year: Year,
}

impl Term {
    /// Number of real (Fall/Spring) terms.
    pub const COUNT: u8 = 8;
    /// Fall of the first year.
    pub const FIRST: Term = Term::new(Semester::Fall, Year::Frosh);
    /// Spring of the last year.
    pub const LAST: Term = Term::new(Semester::Spring, Year::Senior);
    /// Sentinel slot for courses completed before the program starts.
    pub const PRE_PROGRAM: Term = Term::new(Semester::Summer, Year::Frosh);

    /// Creates a term.
    pub const fn new(semester: Semester, year: Year) -> Self {
        Self { semester, year }
    }

    /// Real term for a slot in `1..=8`. Returns `None` outside that range.
    pub fn from_slot(slot: u8) -> Option<Self> {
        if !(1..=Self::COUNT).contains(&slot) {
            return None;
        }
        let year = Year::ALL[usize::from((slot - 1) / 2)];
        let semester = if slot % 2 == 1 {
            Semester::Fall
        } else {
            Semester::Spring
        };
        Some(Self::new(semester, year))
    }

    /// Linearized slot: 1..=8 for real terms, 0 for Summer.
    pub fn slot(&self) -> u8 {
        match self.semester {
            Semester::Fall => self.year.index() * 2 + 1,
            Semester::Spring => self.year.index() * 2 + 2,
            Semester::Summer => 0,
        }
    }

    /// Whether courses can be scheduled into this term.
    #[inline]
    pub fn is_real(&self) -> bool {
        self.semester != Semester::Summer
    }

    /// Next real term, or `None` after `Term::LAST`.
    pub fn next(&self) -> Option<Self> {
        Self::from_slot(self.slot() + 1)
    }

    /// Previous real term, or `None` before `Term::FIRST`.
    pub fn prev(&self) -> Option<Self> {
        self.slot().checked_sub(1).and_then(Self::from_slot)
    }

    /// All real terms in order.
    pub fn real_terms() -> impl Iterator<Item = Term> {
        (1..=Self::COUNT).filter_map(Self::from_slot)
    }

    /// Real terms at or after `slot`, in order.
    pub fn from_slot_onward(slot: u8) -> impl Iterator<Item = Term> {
        (slot.max(1)..=Self::COUNT).filter_map(Self::from_slot)
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.slot(), self.year, self.semester).cmp(&(other.slot(), other.year, other.semester))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester, self.year)
    }
}
