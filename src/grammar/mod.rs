/*
    This module is for storing grammars and classifying their symbols
*/

use std::fmt::Display;

use indexmap::IndexMap;

// Printed in place of an empty right-hand side
pub const EPSILON: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Terminal,
    Nonterminal,
}

// A single production. An empty `right` is an epsilon production
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub left: String,
    pub right: Vec<String>,
}

impl Rule {
    #[cfg(test)]
    pub(crate) fn new(left: &str, right: &[&str]) -> Self {
        Rule {
            left: left.to_string(),
            right: right.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty()
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "{} -> {}", self.left, EPSILON)
        } else {
            write!(f, "{} -> {}", self.left, self.right.join(" "))
        }
    }
}

// Symbol classification as rules are read. A symbol missing from the table
// is unseen; one seen only on right-hand sides is tentatively a terminal and
// becomes a nonterminal the first time it appears on a left-hand side.
// Nothing ever moves back.
#[derive(Debug, Default)]
pub struct SymbolTable {
    classes: IndexMap<String, SymbolClass>,
}

// Two tables are equal only if their symbols were first seen in the same order
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.classes.iter().eq(other.classes.iter())
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_left(&mut self, name: &str) {
        // An existing key keeps its position, only the class changes
        self.classes.insert(name.to_string(), SymbolClass::Nonterminal);
    }

    pub fn record_right(&mut self, name: &str) {
        if !self.classes.contains_key(name) {
            self.classes.insert(name.to_string(), SymbolClass::Terminal);
        }
    }
}

#[derive(Debug)]
pub struct Grammar {
    rules: Vec<Rule>,
    symbols: IndexMap<String, SymbolClass>,
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules && self.symbols.iter().eq(other.symbols.iter())
    }
}

impl Grammar {
    // `rules` must be non-empty and `symbols` must hold the classification
    // of every symbol used by them
    pub(crate) fn new(rules: Vec<Rule>, symbols: SymbolTable) -> Self {
        debug_assert!(!rules.is_empty());
        Grammar {
            rules,
            symbols: symbols.classes,
        }
    }

    // Builds a grammar by replaying the rules in order through a fresh
    // symbol table. Returns None for an empty rule list.
    pub fn from_rules(rules: Vec<Rule>) -> Option<Self> {
        if rules.is_empty() {
            return None;
        }

        let mut symbols = SymbolTable::new();
        for rule in &rules {
            symbols.record_left(&rule.left);
            for symbol in &rule.right {
                symbols.record_right(symbol);
            }
        }

        Some(Grammar::new(rules, symbols))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn start_symbol(&self) -> &str {
        &self.rules[0].left
    }

    // Every symbol in first-occurrence order
    pub fn symbols(&self) -> impl Iterator<Item = (&str, SymbolClass)> + '_ {
        self.symbols.iter().map(|(name, class)| (name.as_str(), *class))
    }

    pub fn terminals(&self) -> impl Iterator<Item = &str> + '_ {
        self.of_class(SymbolClass::Terminal)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> + '_ {
        self.of_class(SymbolClass::Nonterminal)
    }

    pub fn class_of(&self, name: &str) -> Option<SymbolClass> {
        self.symbols.get(name).copied()
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.class_of(name) == Some(SymbolClass::Terminal)
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.class_of(name) == Some(SymbolClass::Nonterminal)
    }

    fn of_class(&self, class: SymbolClass) -> impl Iterator<Item = &str> + '_ {
        self.symbols()
            .filter(move |(_, c)| *c == class)
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_display() {
        assert_eq!(Rule::new("S", &["A", "B"]).to_string(), "S -> A B");
        assert_eq!(Rule::new("A", &[]).to_string(), "A -> #");
    }

    #[test]
    fn terminal_promoted_on_left() {
        let grammar = Grammar::from_rules(vec![
            Rule::new("A", &["B"]),
            Rule::new("B", &["a"]),
        ]).unwrap();

        assert_eq!(grammar.class_of("B"), Some(SymbolClass::Nonterminal));
        assert_eq!(grammar.terminals().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn promotion_keeps_first_occurrence_order() {
        let grammar = Grammar::from_rules(vec![
            Rule::new("S", &["x", "T", "y"]),
            Rule::new("T", &["x"]),
            Rule::new("y", &[]),
        ]).unwrap();

        let order = grammar.symbols().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(order, vec!["S", "x", "T", "y"]);
        assert!(grammar.is_nonterminal("y"));
        assert!(grammar.is_terminal("x"));
    }

    #[test]
    fn nonterminal_stays_nonterminal_on_right() {
        let mut table = SymbolTable::new();
        table.record_left("S");
        table.record_right("S");

        let grammar = Grammar::new(vec![Rule::new("S", &["S"])], table);
        assert!(grammar.is_nonterminal("S"));
        assert_eq!(grammar.symbols().count(), 1);
    }

    #[test]
    fn classes_are_disjoint() {
        let grammar = Grammar::from_rules(vec![
            Rule::new("S", &["a", "S", "b"]),
            Rule::new("S", &[]),
            Rule::new("a", &["c"]),
        ]).unwrap();

        for terminal in grammar.terminals() {
            assert!(!grammar.nonterminals().any(|n| n == terminal));
        }
        assert_eq!(grammar.terminals().count() + grammar.nonterminals().count(),
            grammar.symbols().count());
    }

    #[test]
    fn equality_respects_symbol_order() {
        let mut xy = SymbolTable::new();
        xy.record_right("x");
        xy.record_right("y");
        let mut yx = SymbolTable::new();
        yx.record_right("y");
        yx.record_right("x");
        assert_ne!(xy, yx);

        let forward = Grammar::from_rules(vec![Rule::new("S", &["x", "y"]), Rule::new("S", &["y", "x"])]).unwrap();
        let mut table = SymbolTable::new();
        table.record_left("S");
        table.record_right("y");
        table.record_right("x");
        let reordered = Grammar::new(forward.rules().to_vec(), table);
        assert_ne!(forward, reordered);
        assert_eq!(forward, Grammar::from_rules(forward.rules().to_vec()).unwrap());
    }

    #[test]
    fn empty_rule_list_is_rejected() {
        assert_eq!(Grammar::from_rules(Vec::new()), None);
    }

    #[test]
    fn start_symbol_is_first_left() {
        let grammar = Grammar::from_rules(vec![
            Rule::new("E", &["T"]),
            Rule::new("T", &["id"]),
        ]).unwrap();
        assert_eq!(grammar.start_symbol(), "E");
    }
}
