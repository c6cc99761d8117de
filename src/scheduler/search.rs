//! Goal-directed backtracking search.
//!
//! # Algorithm
//!
//! 1. Deduplicate the goal list and drop goals already in the plan. If no
//!    goal remains, accept the plan when every real term is within the
//!    credit ceiling.
//! 2. Take the first goal and rank its DNF clauses by term height
//!    (cheapest first, catalog order on ties).
//! 3. For each clause, drop members already in the plan, sort the rest
//!    hardest first, and derive the earliest legal term from the clause's
//!    term height.
//! 4. Try each candidate term (placeholders only try the final term) that
//!    passes the feasibility predicate; recurse with the clause members
//!    prepended to the remaining goals.
//! 5. The first complete plan wins; a failed branch falls through to the
//!    next term, then the next clause.
//!
//! Search state (plan and consumed completed-course set) is passed by
//! value: each branch extends its own copy, so a failed branch leaves
//! nothing behind for its siblings.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 11 (backward state-space search)

use log::{debug, trace};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::time::Instant;

use super::feasibility::check_candidate;
use crate::config::SearchConfig;
use crate::heuristic::Estimator;
use crate::models::{Catalog, Course, Plan, ScheduledEntry, Term};

/// Result of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A complete plan (unfinalized, pre-program entries included).
    Planned(Plan),
    /// Every alternative was exhausted.
    Infeasible,
    /// The step budget or time limit ran out.
    BudgetExceeded { steps: u64 },
}

impl SearchOutcome {
    /// The plan, if one was found.
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Planned(plan) => Some(plan),
            _ => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Planned(plan) => write!(f, "planned ({} entries)", plan.len()),
            SearchOutcome::Infeasible => write!(f, "infeasible"),
            SearchOutcome::BudgetExceeded { steps } => write!(f, "budget exceeded at {steps} steps"),
        }
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Goal expansions performed.
    pub steps: u64,
    /// Tentative placements undone after a failed subtree.
    pub backtracks: u64,
    /// Branches cut by capacity pruning.
    pub pruned: u64,
}

/// Internal result of one expansion.
enum Step {
    Found(Plan),
    DeadEnd,
    OutOfBudget,
}

/// One top-level search invocation.
///
/// Owns the estimator memo and counters; nothing outlives the call.
pub(crate) struct Search<'a> {
    catalog: &'a Catalog,
    config: &'a SearchConfig,
    estimator: Estimator<'a>,
    completed: HashSet<Course>,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub(crate) fn new(catalog: &'a Catalog, config: &'a SearchConfig, completed: &[Course]) -> Self {
        Self {
            catalog,
            config,
            estimator: Estimator::new(catalog, completed.iter().cloned()),
            completed: completed.iter().cloned().collect(),
            deadline: config.time_limit().map(|limit| Instant::now() + limit),
            stats: SearchStats::default(),
        }
    }

    /// Runs the search from `goals`, with completed courses in the
    /// pre-program term.
    pub(crate) fn run(mut self, goals: &[Course], completed: &[Course]) -> (SearchOutcome, SearchStats) {
        let mut plan = Plan::new();
        for course in completed {
            if !plan.contains(course) {
                plan.push(ScheduledEntry::new(
                    course.clone(),
                    Term::PRE_PROGRAM,
                    Vec::new(),
                    self.catalog.credits(course),
                ));
            }
        }

        let outcome = match self.expand(goals.to_vec(), &plan, &BTreeSet::new()) {
            Step::Found(plan) => SearchOutcome::Planned(plan),
            Step::DeadEnd => SearchOutcome::Infeasible,
            Step::OutOfBudget => SearchOutcome::BudgetExceeded {
                steps: self.stats.steps,
            },
        };
        (outcome, self.stats)
    }

    /// Whether another expansion would exceed the step budget or deadline.
    fn out_of_budget(&self) -> bool {
        if self
            .config
            .step_budget
            .is_some_and(|budget| self.stats.steps >= budget)
        {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Goal list with duplicates and already-placed courses removed.
    fn pending_goals(goals: Vec<Course>, plan: &Plan) -> Vec<Course> {
        let mut seen = HashSet::new();
        goals
            .into_iter()
            .filter(|g| !plan.contains(g) && seen.insert(g.clone()))
            .collect()
    }

    /// Whether the real goals still to place cannot fit in the free capacity.
    fn exceeds_capacity(&self, goals: &[Course], plan: &Plan) -> bool {
        let needed: u32 = goals.iter().map(|g| self.catalog.credits(g)).sum();
        let free: u32 = Term::real_terms()
            .map(|t| {
                self.config
                    .max_credits_per_term
                    .saturating_sub(plan.hours_in(t))
            })
            .sum();
        needed > free
    }

    fn expand(&mut self, goals: Vec<Course>, plan: &Plan, consumed: &BTreeSet<Course>) -> Step {
        if self.out_of_budget() {
            debug!("search budget exhausted after {} steps", self.stats.steps);
            return Step::OutOfBudget;
        }
        self.stats.steps += 1;

        let goals = Self::pending_goals(goals, plan);
        let Some((goal, rest)) = goals.split_first() else {
            return if plan.within_credit_limit(self.config.max_credits_per_term) {
                Step::Found(plan.clone())
            } else {
                debug!("complete plan rejected: credit limit exceeded");
                Step::DeadEnd
            };
        };

        if self.config.capacity_pruning && self.exceeds_capacity(&goals, plan) {
            self.stats.pruned += 1;
            trace!("pruned at {goal}: remaining goals exceed free capacity");
            return Step::DeadEnd;
        }

        let catalog = self.catalog;
        let Some(requirement) = catalog.get(goal) else {
            return Step::DeadEnd;
        };
        let placeholder = requirement.is_placeholder();
        let clauses = requirement.clauses();

        for index in self.estimator.rank_clauses(&clauses) {
            let clause = &clauses[index];

            let Some((mut revised, next_consumed)) = self.revise_clause(clause, plan, consumed, placeholder)
            else {
                trace!("{goal}: clause {index} needs an already-consumed completed course");
                continue;
            };
            self.estimator.hardest_first(&mut revised);

            let min_slot = 1 + self.estimator.clause_terms(clause);
            let terms: Vec<Term> = if placeholder {
                vec![Term::LAST]
            } else {
                let first = u8::try_from(min_slot).unwrap_or(u8::MAX);
                Term::from_slot_onward(first)
                    .filter(|t| requirement.is_offered(t.semester))
                    .collect()
            };

            for term in terms {
                let candidate =
                    ScheduledEntry::new(goal.clone(), term, clause.clone(), requirement.credits);
                if let Err(reason) =
                    check_candidate(plan, &candidate, requirement, self.config.max_credits_per_term)
                {
                    trace!("{goal} in {term}: {reason}");
                    continue;
                }

                trace!("trying {goal} in {term} via clause {index}");
                let next_plan = plan.with_entry(candidate);
                let next_goals: Vec<Course> = revised.iter().chain(rest).cloned().collect();

                match self.expand(next_goals, &next_plan, &next_consumed) {
                    Step::Found(done) => return Step::Found(done),
                    Step::OutOfBudget => return Step::OutOfBudget,
                    Step::DeadEnd => {
                        self.stats.backtracks += 1;
                        debug!("backtracking from {goal} in {term}");
                    }
                }
            }
        }

        Step::DeadEnd
    }

    /// Removes satisfied members from a clause.
    ///
    /// Members already in the plan are dropped. For placeholder goals, a
    /// member satisfied by a completed course is discharged only if that
    /// course has not been consumed by another placeholder; otherwise the
    /// clause is unusable and `None` is returned.
    fn revise_clause(
        &self,
        clause: &[Course],
        plan: &Plan,
        consumed: &BTreeSet<Course>,
        placeholder: bool,
    ) -> Option<(Vec<Course>, BTreeSet<Course>)> {
        let mut revised = Vec::new();
        let mut next_consumed = consumed.clone();

        for member in clause {
            if placeholder && self.completed.contains(member) {
                if !next_consumed.insert(member.clone()) {
                    return None;
                }
                continue;
            }
            if plan.contains(member) || revised.contains(member) {
                continue;
            }
            revised.push(member.clone());
        }

        Some((revised, next_consumed))
    }
}
