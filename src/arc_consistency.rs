//! Arc consistency (AC-3) over the crossings of a crossword.

use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::crossword::{Crossword, VarId};
use crate::domain::Domains;
use crate::word_list::WordId;

/// A directed consistency obligation: every value of `.0` needs a compatible value in `.1`.
pub type Arc = (VarId, VarId);

/// Worklist used by `ac3`. Arcs are visited first-in first-out and an arc that is already waiting
/// isn't queued a second time.
#[derive(Debug, Default)]
struct ArcQueue {
    queue: VecDeque<Arc>,
    pending: HashSet<Arc>,
}

impl ArcQueue {
    fn with_initial_queue<Items>(items: Items) -> ArcQueue
    where
        Items: IntoIterator<Item = Arc>,
    {
        let mut queue = ArcQueue::default();
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        if self.pending.insert(arc) {
            self.queue.push_back(arc);
        }
    }
}

/// Every arc in the puzzle: each variable paired with each of its neighbors.
pub fn all_arcs(crossword: &Crossword) -> Vec<Arc> {
    (0..crossword.variable_count())
        .flat_map(|x| crossword.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}

/// Make `x` arc consistent with `y` by removing every word from `x`'s domain that has no partner in
/// `y`'s domain at their shared cell. Returns whether anything was removed. Variables that don't
/// cross are trivially consistent.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: VarId, y: VarId) -> bool {
    let Some((x_cell, y_cell)) = crossword.overlap(x, y) else {
        return false;
    };
    let words = crossword.words();

    let supported_glyphs: HashSet<char> = domains
        .values(y)
        .map(|word_id| words.get(word_id).glyphs[y_cell])
        .collect();

    let unsupported: Vec<WordId> = domains
        .values(x)
        .filter(|&word_id| !supported_glyphs.contains(&words.get(word_id).glyphs[x_cell]))
        .collect();

    for &word_id in &unsupported {
        domains.remove(x, word_id);
    }

    !unsupported.is_empty()
}

/// Run AC-3 until no domain can be pruned further. With `arcs` set to `None` the worklist starts
/// with every arc in the puzzle; otherwise only with the given ones.
///
/// Returns `false` as soon as some domain is wiped out, which means no solution exists under the
/// current domains. Returning `true` only means every remaining value has support on each crossing;
/// it doesn't guarantee that a solution exists.
pub fn ac3(crossword: &Crossword, domains: &mut Domains, arcs: Option<&[Arc]>) -> bool {
    let mut queue = match arcs {
        Some(arcs) => ArcQueue::with_initial_queue(arcs.iter().copied()),
        None => ArcQueue::with_initial_queue(all_arcs(crossword)),
    };
    let mut revisions = 0;

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, x, y) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(x) {
            trace!(
                target: "ac3",
                "domain of {:?} wiped out by {:?}",
                crossword.variable(x),
                crossword.variable(y),
            );
            return false;
        }

        // Words that were only supported by the removed values of `x` need to be revisited.
        for &z in crossword.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    debug!(target: "ac3", "arc consistent after {} revisions", revisions);
    true
}

#[cfg(test)]
mod tests {
    use super::{ac3, all_arcs, revise};
    use crate::crossword::Crossword;
    use crate::domain::Domains;
    use crate::word_list::WordList;

    fn structure0() -> Crossword {
        let words = WordList::parse("one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten");
        Crossword::new("#___#\n#_##_\n#_##_\n#_##_\n#____", words).expect("valid structure")
    }

    /// ___
    /// #_#
    /// #_#
    fn corner(words: &str) -> Crossword {
        Crossword::new("___\n#_#\n#_#", WordList::parse(words)).expect("valid structure")
    }

    fn strings(crossword: &Crossword, domains: &Domains, var_id: usize) -> Vec<String> {
        domains
            .values(var_id)
            .map(|word_id| crossword.words().get(word_id).string.clone())
            .collect()
    }

    fn assert_arc_consistent(crossword: &Crossword, domains: &Domains) {
        for (x, y) in all_arcs(crossword) {
            let (x_cell, y_cell) = crossword.overlap(x, y).expect("neighbors overlap");
            for x_word in domains.values(x) {
                let glyph = crossword.words().get(x_word).glyphs[x_cell];
                assert!(
                    domains
                        .values(y)
                        .any(|y_word| crossword.words().get(y_word).glyphs[y_cell] == glyph),
                    "value {} of {} has no support in {}",
                    x_word,
                    x,
                    y,
                );
            }
        }
    }

    #[test]
    fn test_revise_removes_unsupported_values() {
        let crossword = structure0();
        let mut domains = Domains::initialize(&crossword);

        assert!(revise(&crossword, &mut domains, 0, 1));
        assert_eq!(strings(&crossword, &domains, 0), vec!["SEVEN", "THREE"]);
        assert!(!revise(&crossword, &mut domains, 0, 1), "second revision is a no-op");
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let crossword = structure0();
        let mut domains = Domains::initialize(&crossword);
        let before = domains.clone();

        assert!(!revise(&crossword, &mut domains, 1, 2));
        assert_eq!(domains, before);
    }

    #[test]
    fn test_ac3_prunes_structure0() {
        let crossword = structure0();
        let mut domains = Domains::initialize(&crossword);
        let before = domains.clone();

        assert!(ac3(&crossword, &mut domains, None));

        assert_eq!(strings(&crossword, &domains, 0), vec!["SEVEN"]);
        assert_eq!(strings(&crossword, &domains, 1), vec!["SIX"]);
        assert_eq!(strings(&crossword, &domains, 2), vec!["FIVE", "NINE"]);
        assert_eq!(strings(&crossword, &domains, 3), vec!["NINE"]);
        for var_id in 0..crossword.variable_count() {
            assert!(domains.len(var_id) <= before.len(var_id));
            assert!(domains.values(var_id).all(|word_id| before.contains(var_id, word_id)));
        }
        assert_arc_consistent(&crossword, &domains);
    }

    #[test]
    fn test_ac3_reports_wipeout() {
        let crossword = corner("cat\ndog");
        let mut domains = Domains::initialize(&crossword);

        assert!(!ac3(&crossword, &mut domains, None));
        assert!(domains.is_any_empty());
    }

    #[test]
    fn test_ac3_with_explicit_arcs() {
        let crossword = corner("cat\nant\ntan");
        let mut domains = Domains::initialize(&crossword);

        // Only the down slot is revised against the across slot.
        assert!(ac3(&crossword, &mut domains, Some(&[(1, 0)][..])));

        assert_eq!(strings(&crossword, &domains, 0), vec!["ANT", "CAT", "TAN"]);
        assert_eq!(strings(&crossword, &domains, 1), vec!["ANT"]);
    }

    #[test]
    fn test_ac3_revisits_arcs_into_pruned_variable() {
        // OKO in the first down slot is only supported by KAY in the across slot, and KAY only
        // loses its support once the second down slot has been revised.
        //
        // _#_
        // ___
        // _#_
        let words = WordList::parse("aba\nbab\nkay\noko");
        let crossword = Crossword::new("_#_\n___\n_#_", words).expect("valid structure");
        let mut domains = Domains::initialize(&crossword);

        assert!(ac3(&crossword, &mut domains, None));

        assert_eq!(strings(&crossword, &domains, 0), vec!["ABA", "BAB", "KAY"]);
        assert_eq!(strings(&crossword, &domains, 1), vec!["ABA", "BAB", "KAY"]);
        assert_eq!(strings(&crossword, &domains, 2), vec!["ABA", "BAB"]);
        assert_arc_consistent(&crossword, &domains);
    }
}
