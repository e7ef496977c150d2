//! Approximate substring matching over case-folded text.
//!
//! A Levenshtein automaton for the query is run from every character of the
//! field; the cheapest fragment starting there is a candidate. Candidates are
//! then picked cheapest-first so that the reported fragments never overlap.
//!
//! Automata are only prepared up to a small edit budget. Longer queries with a
//! larger budget walk the same starts with an edit-distance table instead.

use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder, DFA, SINK_STATE};
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

use crate::config::SearchConfig;

/// Text folded for matching, with a map back to the original characters
#[derive(Debug, Clone, Default)]
pub(crate) struct FoldedText {
    folded: String,
    /// For every folded char: (byte offset in `folded`, char index in the original)
    chars: Vec<(usize, usize)>,
}

impl FoldedText {
    pub(crate) fn new(text: &str, ignore_diacritics: bool) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut chars = Vec::with_capacity(text.len());

        for (original_idx, c) in text.chars().enumerate() {
            // One original char may fold into several (e.g. 'İ' lowercases to two)
            let mut push = |base: char| {
                for lower in base.to_lowercase() {
                    chars.push((folded.len(), original_idx));
                    folded.push(lower);
                }
            };

            // Drop combining marks after canonical decomposition
            if ignore_diacritics {
                decompose_canonical(c, |d| {
                    if !is_combining_mark(d) {
                        push(d);
                    }
                });
            } else {
                push(c);
            }
        }

        Self { folded, chars }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.folded
    }

    pub(crate) fn char_len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn char_bytes(&self, idx: usize) -> &[u8] {
        let start = self.chars[idx].0;
        let end = self
            .chars
            .get(idx + 1)
            .map_or(self.folded.len(), |&(offset, _)| offset);
        &self.folded.as_bytes()[start..end]
    }

    fn char_at(&self, idx: usize) -> Option<char> {
        self.folded[self.chars[idx].0..].chars().next()
    }
}

/// Best fragments found in one field
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldMatch {
    /// Dissimilarity of the best fragment: edits / query length
    pub(crate) dissimilarity: f64,
    /// Inclusive char ranges into the original field, in text order
    pub(crate) indices: Vec<(usize, usize)>,
    /// Range of the best fragment
    pub(crate) best: (usize, usize),
}

#[derive(Debug, Clone, Copy)]
struct Fragment {
    edits: usize,
    /// Folded char range, end exclusive
    start: usize,
    end: usize,
}

/// Automaton builders, one per edit distance up to the configured limit.
/// Built once and shared read-only.
pub(crate) struct FuzzyMatcher {
    builders: Vec<LevenshteinAutomatonBuilder>,
    min_match_char_length: usize,
}

impl std::fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyMatcher")
            .field("automaton_limit", &(self.builders.len() - 1))
            .field("min_match_char_length", &self.min_match_char_length)
            .finish()
    }
}

/// One query prepared for matching; lives only for the duration of a search
pub(crate) struct CompiledQuery {
    walker: Walker,
    query_chars: usize,
}

enum Walker {
    /// Budget within the prepared builders
    Automaton(DFA),
    /// Budget above the automaton limit
    Table { query: Vec<char>, budget: usize },
}

impl FuzzyMatcher {
    pub(crate) fn new(config: &SearchConfig) -> Self {
        let builders = (0..=config.max_edit_distance)
            .map(|distance| LevenshteinAutomatonBuilder::new(distance, true))
            .collect();

        Self {
            builders,
            min_match_char_length: config.min_match_char_length,
        }
    }

    pub(crate) fn compile(&self, query: &FoldedText, allowed_edits: usize) -> CompiledQuery {
        // Small budgets get a DFA, anything larger the table walk
        let walker = match self.builders.get(allowed_edits) {
            Some(builder) => Walker::Automaton(builder.build_dfa(query.as_str())),
            None => Walker::Table {
                query: query.as_str().chars().collect(),
                budget: allowed_edits,
            },
        };

        CompiledQuery {
            walker,
            query_chars: query.char_len(),
        }
    }

    /// Every non-overlapping fragment of `text` within the query's edit budget
    pub(crate) fn find(&self, query: &CompiledQuery, text: &FoldedText) -> Option<FieldMatch> {
        if query.query_chars == 0 || text.is_empty() {
            return None;
        }

        // Fragments never start on whitespace
        let mut fragments: Vec<Fragment> = (0..text.char_len())
            .filter(|&start| !text.char_at(start).is_some_and(char::is_whitespace))
            .filter_map(|start| self.best_fragment_at(query, text, start))
            .collect();

        if fragments.is_empty() {
            return None;
        }

        // Cheapest first, then leftmost; keep those not overlapping a better one
        fragments.sort_by_key(|fragment| (fragment.edits, fragment.start));
        let mut taken = vec![false; text.char_len()];
        let mut selected = Vec::new();

        for fragment in fragments {
            if taken[fragment.start..fragment.end].iter().any(|&t| t) {
                continue;
            }
            taken[fragment.start..fragment.end].fill(true);
            selected.push(fragment);
        }

        // The first selected fragment is the cheapest overall
        let best = selected[0];
        let to_original = |fragment: &Fragment| {
            (
                text.chars[fragment.start].1,
                text.chars[fragment.end - 1].1,
            )
        };

        // Report in text order
        let mut indices: Vec<(usize, usize)> = selected.iter().map(to_original).collect();
        indices.sort_unstable();

        Some(FieldMatch {
            dissimilarity: best.edits as f64 / query.query_chars as f64,
            best: to_original(&best),
            indices,
        })
    }

    /// Cheapest fragment starting at `start`; the shortest wins among equals
    fn best_fragment_at(
        &self,
        query: &CompiledQuery,
        text: &FoldedText,
        start: usize,
    ) -> Option<Fragment> {
        match &query.walker {
            Walker::Automaton(dfa) => self.automaton_fragment_at(dfa, text, start),
            Walker::Table { query, budget } => self.table_fragment_at(query, *budget, text, start),
        }
    }

    fn automaton_fragment_at(&self, dfa: &DFA, text: &FoldedText, start: usize) -> Option<Fragment> {
        let mut state = dfa.initial_state();
        let mut best: Option<Fragment> = None;

        for idx in start..text.char_len() {
            for &byte in text.char_bytes(idx) {
                state = dfa.transition(state, byte);
            }
            // No extension of this fragment can get back within budget
            if state == SINK_STATE {
                break;
            }

            if let Distance::Exact(edits) = dfa.distance(state) {
                self.consider(&mut best, text, edits as usize, start, idx);
            }
        }

        best
    }

    /// Same walk as the automaton, computed column by column: `current[i]` is
    /// the edit distance between the first `i` query chars and the fragment so
    /// far. Adjacent transpositions count as one edit, as they do for the
    /// automata.
    fn table_fragment_at(
        &self,
        query: &[char],
        budget: usize,
        text: &FoldedText,
        start: usize,
    ) -> Option<Fragment> {
        let mut before: Vec<usize> = Vec::new();
        let mut previous: Vec<usize> = (0..=query.len()).collect();
        let mut best: Option<Fragment> = None;
        let mut prior_char: Option<char> = None;

        for idx in start..text.char_len() {
            let Some(c) = text.char_at(idx) else {
                break;
            };
            let width = idx - start + 1;

            let mut current = vec![width; query.len() + 1];
            for i in 1..=query.len() {
                let substitution = previous[i - 1] + usize::from(query[i - 1] != c);
                let mut cost = substitution.min(previous[i] + 1).min(current[i - 1] + 1);

                // Swapped neighbours
                if let Some(prior) = prior_char {
                    if i > 1 && query[i - 1] == prior && query[i - 2] == c {
                        cost = cost.min(before[i - 2] + 1);
                    }
                }
                current[i] = cost;
            }

            // Every alignment already exceeds the budget
            if current.iter().min().is_some_and(|&lowest| lowest > budget) {
                break;
            }

            let edits = current[query.len()];
            if edits <= budget {
                self.consider(&mut best, text, edits, start, idx);
            }

            before = std::mem::replace(&mut previous, current);
            prior_char = Some(c);
        }

        best
    }

    /// Keep the fragment `start..=idx` if it is long enough and cheaper than
    /// the best seen from this start
    fn consider(
        &self,
        best: &mut Option<Fragment>,
        text: &FoldedText,
        edits: usize,
        start: usize,
        idx: usize,
    ) {
        let long_enough =
            text.chars[idx].1 - text.chars[start].1 + 1 >= self.min_match_char_length;

        if long_enough && best.map_or(true, |b| edits < b.edits) {
            *best = Some(Fragment {
                edits,
                start,
                end: idx + 1,
            });
        }
    }
}
