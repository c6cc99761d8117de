//! Plan post-processing.
//!
//! The search leaves completed courses in the pre-program term and parks
//! every placeholder in the final term. Finalizing:
//! 1. Drops pre-program entries.
//! 2. Moves each placeholder to the earliest term by whose end the clause
//!    it was placed with is satisfied.
//! 3. Pads non-empty terms below the credit target with filler courses.

use log::debug;
use std::collections::HashSet;

use crate::config::SearchConfig;
use crate::models::{Catalog, Course, Plan, ScheduledEntry, Term};

/// Runs the full post-processing pipeline on a raw search plan.
pub fn finalize(plan: Plan, catalog: &Catalog, config: &SearchConfig, completed: &[Course]) -> Plan {
    let completed: HashSet<Course> = completed.iter().cloned().collect();
    let mut plan = plan.without_pre_program();
    push_higher_levels(&mut plan, &completed);
    if config.pad_terms {
        pad_terms(&mut plan, catalog, config, &completed);
    }
    plan
}

/// Whether `clause` is satisfied by the end of `term`.
///
/// A member counts when it was completed before the program or is
/// scheduled at or before `term`. Completed members of a placeholder's
/// clause were consumed by that placeholder during the search.
fn satisfied_by(clause: &[Course], term: Term, plan: &Plan, completed: &HashSet<Course>) -> bool {
    clause
        .iter()
        .all(|member| completed.contains(member) || plan.term_of(member).is_some_and(|t| t <= term))
}

/// Relocates placeholder entries to their earliest satisfied term.
///
/// Only the clause each placeholder was placed with is considered. Each
/// placeholder first sweeps forward while that clause is unsatisfied, then
/// backward while it is still satisfied one term earlier. Placeholders may
/// depend on other placeholders, so sweeps repeat until no entry moves.
pub fn push_higher_levels(plan: &mut Plan, completed: &HashSet<Course>) {
    let placeholders: Vec<usize> = plan
        .entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_placeholder() && e.term.is_real())
        .map(|(i, _)| i)
        .collect();

    for _ in 0..=placeholders.len() {
        let mut moved = false;

        for &i in &placeholders {
            let clause = plan.entries[i].clause.clone();
            let mut term = plan.entries[i].term;

            while !satisfied_by(&clause, term, plan, completed) {
                match term.next() {
                    Some(next) => term = next,
                    None => break,
                }
            }
            while let Some(prev) = term.prev() {
                if !satisfied_by(&clause, prev, plan, completed) {
                    break;
                }
                term = prev;
            }

            if term != plan.entries[i].term {
                debug!("moving {} from {} to {}", plan.entries[i].course, plan.entries[i].term, term);
                plan.entries[i].term = term;
                moved = true;
            }
        }

        if !moved {
            break;
        }
    }
}

/// Adds filler courses to non-empty terms below the credit target.
///
/// Filler candidates are catalog courses (in catalog order) with no
/// prerequisites, offered in the term, not already planned or completed,
/// and small enough to keep the term within the ceiling.
pub fn pad_terms(plan: &mut Plan, catalog: &Catalog, config: &SearchConfig, completed: &HashSet<Course>) {
    for term in Term::real_terms() {
        let mut hours = plan.hours_in(term);
        if hours == 0 || hours >= config.min_credits_per_term {
            continue;
        }

        for (course, req) in catalog.iter() {
            if hours >= config.min_credits_per_term {
                break;
            }
            if req.has_prerequisites()
                || req.is_placeholder()
                || !req.is_offered(term.semester)
                || hours + req.credits > config.max_credits_per_term
                || completed.contains(course)
                || plan.contains(course)
            {
                continue;
            }

            debug!("padding {} with {} ({} hours)", term, course, req.credits);
            plan.push(ScheduledEntry::new(course.clone(), term, Vec::new(), req.credits).as_filler());
            hours += req.credits;
        }
    }
}
