use std::collections::HashMap;

use crate::grammar::*;
use super::{merge, Lookahead, LookaheadSet};

#[derive(Debug)]
pub struct FirstSets<'g> {
    sets: HashMap<&'g str, LookaheadSet<'g>>,
}

impl<'g> FirstSets<'g> {
    pub fn get(&self, symbol: &str) -> Option<&LookaheadSet<'g>> {
        self.sets.get(symbol)
    }

    // Whether the symbol derives the empty string
    pub fn is_nullable(&self, symbol: &str) -> bool {
        self.get(symbol).is_some_and(|set| set.contains(&Lookahead::Epsilon))
    }
}

// Scans `rule` left to right, collecting what it contributes to the FIRST
// set of its left side given the sets computed so far
fn first_of_rule<'g>(
    grammar: &Grammar,
    sets: &HashMap<&'g str, LookaheadSet<'g>>,
    rule: &'g Rule,
    result: &mut LookaheadSet<'g>,
) {
    for symbol in &rule.right {
        if grammar.is_terminal(symbol) {
            result.insert(Lookahead::Terminal(symbol));
            return;
        }

        let first = &sets[symbol.as_str()];
        result.extend(first.iter().copied().filter(|l| *l != Lookahead::Epsilon));
        if !first.contains(&Lookahead::Epsilon) {
            return;
        }
    }

    // Every symbol was nullable, or there were none
    result.insert(Lookahead::Epsilon);
}

pub fn first_sets(grammar: &Grammar) -> FirstSets<'_> {
    let mut sets: HashMap<&str, LookaheadSet> = grammar.symbols()
        .map(|(name, class)| {
            let set = match class {
                SymbolClass::Terminal => LookaheadSet::from([Lookahead::Terminal(name)]),
                SymbolClass::Nonterminal => LookaheadSet::new(),
            };
            (name, set)
        })
        .collect();

    let mut buf = LookaheadSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.rules() {
            buf.clear();
            first_of_rule(grammar, &sets, rule, &mut buf);
            if let Some(first) = sets.get_mut(rule.left.as_str()) {
                changed |= merge(first, &buf, |_| true);
            }
        }
    }

    FirstSets { sets }
}
