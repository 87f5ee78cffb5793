use std::collections::HashMap;

use crate::grammar::*;
use super::first::{first_sets, FirstSets};
use super::{merge, Lookahead, LookaheadSet};

#[derive(Debug)]
pub struct FollowSets<'g> {
    sets: HashMap<&'g str, LookaheadSet<'g>>,
}

impl<'g> FollowSets<'g> {
    pub fn get(&self, nonterminal: &str) -> Option<&LookaheadSet<'g>> {
        self.sets.get(nonterminal)
    }
}

fn not_epsilon(l: &Lookahead) -> bool {
    *l != Lookahead::Epsilon
}

// FOLLOW(A) flows into every nonterminal of the nullable suffix of the rule,
// scanning from the right
fn propagate_trailing<'g>(
    grammar: &Grammar,
    first: &FirstSets<'g>,
    sets: &mut HashMap<&'g str, LookaheadSet<'g>>,
    rule: &'g Rule,
) -> bool {
    let mut changed = false;
    let left_follow = sets.get(rule.left.as_str()).cloned().unwrap_or_default();

    for symbol in rule.right.iter().rev() {
        if grammar.is_nonterminal(symbol) {
            if let Some(follow) = sets.get_mut(symbol.as_str()) {
                changed |= merge(follow, &left_follow, |_| true);
            }
        }
        if !first.is_nullable(symbol) {
            break;
        }
    }

    changed
}

// FIRST(Xl) minus epsilon flows into FOLLOW(Xk) for every nonterminal Xk
// and every later Xl separated from it by nullable symbols only
fn propagate_adjacent<'g>(
    grammar: &Grammar,
    first: &FirstSets<'g>,
    sets: &mut HashMap<&'g str, LookaheadSet<'g>>,
    rule: &'g Rule,
) -> bool {
    let mut changed = false;

    for (k, symbol) in rule.right.iter().enumerate() {
        if !grammar.is_nonterminal(symbol) {
            continue;
        }
        let Some(follow) = sets.get_mut(symbol.as_str()) else {
            continue;
        };

        for next in &rule.right[k + 1..] {
            if let Some(next_first) = first.get(next) {
                changed |= merge(follow, next_first, not_epsilon);
            }
            if !first.is_nullable(next) {
                break;
            }
        }
    }

    changed
}

pub fn follow_sets(grammar: &Grammar) -> FollowSets<'_> {
    let first = first_sets(grammar);

    let mut sets: HashMap<&str, LookaheadSet> = grammar.nonterminals()
        .map(|name| (name, LookaheadSet::new()))
        .collect();
    if let Some(start) = sets.get_mut(grammar.start_symbol()) {
        start.insert(Lookahead::End);
    }

    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.rules() {
            changed |= propagate_trailing(grammar, &first, &mut sets, rule);
            changed |= propagate_adjacent(grammar, &first, &mut sets, rule);
        }
    }

    FollowSets { sets }
}
