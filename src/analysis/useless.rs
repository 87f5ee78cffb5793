use std::collections::HashSet;

use crate::grammar::*;

// Symbols that derive some string of terminals. Terminals trivially do;
// an epsilon rule makes its left side generating.
pub fn generating_symbols(grammar: &Grammar) -> HashSet<&str> {
    let mut generating: HashSet<&str> = grammar.terminals().collect();

    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.rules() {
            if generating.contains(rule.left.as_str()) {
                continue;
            }
            if rule.right.iter().all(|s| generating.contains(s.as_str())) {
                generating.insert(&rule.left);
                changed = true;
            }
        }
    }

    generating
}

// Symbols reachable from the start symbol through the given rules
pub fn reachable_symbols<'g>(grammar: &'g Grammar, rules: &[&'g Rule]) -> HashSet<&'g str> {
    let mut reachable = HashSet::from([grammar.start_symbol()]);

    let mut changed = true;
    while changed {
        changed = false;
        for &rule in rules {
            if !reachable.contains(rule.left.as_str()) {
                continue;
            }
            for symbol in &rule.right {
                changed |= reachable.insert(symbol.as_str());
            }
        }
    }

    reachable
}

fn uses_only(rule: &Rule, symbols: &HashSet<&str>) -> bool {
    symbols.contains(rule.left.as_str()) && rule.right.iter().all(|s| symbols.contains(s.as_str()))
}

// Rules left after dropping every rule that mentions a non-generating
// symbol, then every rule that mentions a symbol unreachable from the start
// symbol. Input order is kept.
pub fn useful_rules(grammar: &Grammar) -> Vec<&Rule> {
    let generating = generating_symbols(grammar);
    let retained: Vec<&Rule> = grammar.rules()
        .iter()
        .filter(|rule| uses_only(rule, &generating))
        .collect();

    let reachable = reachable_symbols(grammar, &retained);
    retained
        .into_iter()
        .filter(|rule| uses_only(rule, &reachable))
        .collect()
}
