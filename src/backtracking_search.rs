//! This module fills a crossword with a depth-first backtracking search. Domains are first made
//! node consistent and arc consistent; the search then picks variables by minimum remaining values
//! (ties broken by degree) and tries words in least-constraining-value order. Optionally, arc
//! consistency is maintained after every choice.

use instant::{Duration, Instant};
use log::{debug, trace};

use crate::arc_consistency::{ac3, Arc};
use crate::assignment::{is_complete, is_consistent, Assignment};
use crate::crossword::Crossword;
use crate::domain::Domains;
use crate::ordering::{order_domain_values, select_unassigned_variable};

/// Knobs for a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOptions {
    /// Run AC-3 over the whole puzzle before searching.
    pub initial_arc_consistency: bool,

    /// After each choice, restrict the chosen variable's domain and re-run AC-3 from the arcs
    /// pointing at it, rejecting the choice if any domain is wiped out.
    pub maintain_arc_consistency: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            initial_arc_consistency: true,
            maintain_arc_consistency: false,
        }
    }
}

/// A struct tracking statistics about the solving process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub pruned_by_initial_ac3: usize,
    pub duration: Duration,
}

/// A struct representing the results of a successful solve.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

struct Search<'a> {
    crossword: &'a Crossword,
    options: &'a SolveOptions,
    statistics: Statistics,
}

impl Search<'_> {
    /// Extend `assignment` until it's complete. On success the assignment is left filled in; on
    /// failure it's left exactly as it was passed in.
    fn backtrack(&mut self, assignment: &mut Assignment, domains: &Domains) -> bool {
        let crossword = self.crossword;

        if is_complete(assignment, crossword.variable_count()) {
            return true;
        }
        self.statistics.states += 1;

        let var_id = select_unassigned_variable(crossword, domains, assignment)
            .expect("an incomplete assignment has an unassigned variable");

        for word_id in order_domain_values(crossword, domains, assignment, var_id) {
            trace!(
                target: "search",
                "depth {}: trying {} for {:?}",
                assignment.len(),
                crossword.words().get(word_id).string,
                crossword.variable(var_id),
            );

            assignment.assign(var_id, word_id);

            if is_consistent(crossword, assignment) {
                let found = if self.options.maintain_arc_consistency {
                    let mut branch_domains = domains.clone();
                    branch_domains.restrict_to(var_id, word_id);

                    let arcs: Vec<Arc> = crossword
                        .neighbors(var_id)
                        .iter()
                        .filter(|&&neighbor| !assignment.contains(neighbor))
                        .map(|&neighbor| (neighbor, var_id))
                        .collect();

                    ac3(crossword, &mut branch_domains, Some(arcs.as_slice()))
                        && self.backtrack(assignment, &branch_domains)
                } else {
                    self.backtrack(assignment, domains)
                };

                if found {
                    return true;
                }
            }

            assignment.unassign(var_id);
        }

        self.statistics.backtracks += 1;
        false
    }
}

/// Search for a complete, consistent assignment. Returns `None` if the puzzle has no solution,
/// which includes malformed puzzles such as a slot length no word has.
pub fn find_fill(crossword: &Crossword, options: &SolveOptions) -> Option<FillSuccess> {
    let start = Instant::now();
    let mut statistics = Statistics::default();

    let mut domains = Domains::initialize(crossword);
    if domains.is_any_empty() {
        debug!(target: "search", "a slot has no words of its length");
        return None;
    }

    if options.initial_arc_consistency {
        let before = domains.total_len();
        if !ac3(crossword, &mut domains, None) {
            debug!(target: "search", "initial arc consistency wiped out a domain");
            return None;
        }
        statistics.pruned_by_initial_ac3 = before - domains.total_len();
    }

    let mut search = Search {
        crossword,
        options,
        statistics,
    };
    let mut assignment = Assignment::new(crossword.variable_count());
    let found = search.backtrack(&mut assignment, &domains);

    let mut statistics = search.statistics;
    statistics.duration = start.elapsed();
    debug!(
        target: "search",
        "{} after {:?}",
        if found { "filled" } else { "no fill" },
        statistics,
    );

    if found {
        Some(FillSuccess {
            statistics,
            assignment,
        })
    } else {
        None
    }
}

/// Solve with the default options.
pub fn solve(crossword: &Crossword) -> Option<Assignment> {
    find_fill(crossword, &SolveOptions::default()).map(|success| success.assignment)
}
