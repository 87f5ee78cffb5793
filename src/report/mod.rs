/*
    This module renders grammars and analysis results as text
*/

use itertools::Itertools;

use crate::analysis::first::FirstSets;
use crate::analysis::follow::FollowSets;
use crate::analysis::{Lookahead, LookaheadSet};
use crate::grammar::*;

// Terminals then nonterminals, each in first-occurrence order and each
// followed by a space
pub fn list_symbols(grammar: &Grammar) -> String {
    grammar.terminals()
        .chain(grammar.nonterminals())
        .map(|name| format!("{} ", name))
        .collect()
}

pub fn list_rules(rules: &[&Rule]) -> String {
    rules.iter().map(|rule| format!("{}\n", rule)).collect()
}

// `{ marker, t1, t2 }` with terminals in first-occurrence order. The marker
// leads when present.
fn format_set<'g>(grammar: &'g Grammar, set: Option<&LookaheadSet<'g>>, marker: Lookahead<'g>) -> String {
    let Some(set) = set else {
        return "{  }".to_string();
    };

    let marker = set.contains(&marker).then_some(marker);
    let terminals = grammar.terminals()
        .map(Lookahead::Terminal)
        .filter(|l| set.contains(l));

    format!("{{ {} }}", marker.into_iter().chain(terminals).join(", "))
}

pub fn list_first_sets<'g>(grammar: &'g Grammar, first: &FirstSets<'g>) -> String {
    grammar.nonterminals()
        .map(|name| format!("FIRST({}) = {}\n", name, format_set(grammar, first.get(name), Lookahead::Epsilon)))
        .collect()
}

pub fn list_follow_sets<'g>(grammar: &'g Grammar, follow: &FollowSets<'g>) -> String {
    grammar.nonterminals()
        .map(|name| format!("FOLLOW({}) = {}\n", name, format_set(grammar, follow.get(name), Lookahead::End)))
        .collect()
}
