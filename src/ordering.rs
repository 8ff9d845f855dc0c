//! Search-order heuristics: which variable to fill next, and which of its words to try first.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::assignment::Assignment;
use crate::crossword::{Crossword, VarId};
use crate::domain::Domains;
use crate::word_list::WordId;

/// Return the words in `var_id`'s domain ordered by how many values they would rule out for its
/// unassigned neighbors, fewest first. A neighbor's value is ruled out if it is the same word or if
/// it disagrees at the shared cell. Words with equal counts keep word list order.
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
    var_id: VarId,
) -> Vec<WordId> {
    let words = crossword.words();

    // For each unassigned neighbor: the cell of `var_id` it crosses, its domain size, and how many
    // of its values have each glyph at the shared cell.
    let neighbor_stats: Vec<(VarId, usize, usize, HashMap<char, usize>)> = crossword
        .neighbors(var_id)
        .iter()
        .filter(|&&neighbor| !assignment.contains(neighbor))
        .filter_map(|&neighbor| {
            let (cell, neighbor_cell) = crossword.overlap(var_id, neighbor)?;
            let mut glyph_counts: HashMap<char, usize> = HashMap::new();
            for word_id in domains.values(neighbor) {
                *glyph_counts.entry(words.get(word_id).glyphs[neighbor_cell]).or_insert(0) += 1;
            }
            Some((neighbor, cell, domains.len(neighbor), glyph_counts))
        })
        .collect();

    let mut ranked: Vec<(usize, WordId)> = domains
        .values(var_id)
        .map(|word_id| {
            let word = words.get(word_id);
            let eliminated: usize = neighbor_stats
                .iter()
                .map(|(neighbor, cell, domain_len, glyph_counts)| {
                    let compatible = glyph_counts.get(&word.glyphs[*cell]).copied().unwrap_or(0);
                    let duplicate = usize::from(domains.contains(*neighbor, word_id));
                    (domain_len - compatible) + duplicate
                })
                .sum();
            (eliminated, word_id)
        })
        .collect();

    ranked.sort_by_key(|&(eliminated, _)| eliminated);
    ranked.into_iter().map(|(_, word_id)| word_id).collect()
}

/// Choose the unassigned variable with the fewest remaining values, preferring the one with the
/// most neighbors on a tie and the lowest id after that. Returns `None` only when every variable
/// is assigned.
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VarId> {
    (0..crossword.variable_count())
        .filter(|&var_id| !assignment.contains(var_id))
        .min_by_key(|&var_id| (domains.len(var_id), Reverse(crossword.degree(var_id))))
}
