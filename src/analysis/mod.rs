/*
    This module holds the fixed-point analyses run over a built grammar
*/

pub mod useless;
pub mod first;
pub mod follow;

use std::collections::HashSet;
use std::fmt::Display;

use crate::grammar::EPSILON;

// Printed for the end of input in FOLLOW sets
pub const END_MARKER: &str = "$";

// An element of a FIRST or FOLLOW set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookahead<'g> {
    Epsilon,
    End,
    Terminal(&'g str),
}

impl Display for Lookahead<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookahead::Epsilon => write!(f, "{}", EPSILON),
            Lookahead::End => write!(f, "{}", END_MARKER),
            Lookahead::Terminal(name) => write!(f, "{}", name),
        }
    }
}

pub type LookaheadSet<'g> = HashSet<Lookahead<'g>>;

// Adds every element of `from` accepted by `keep` to `into`. Returns whether
// `into` grew.
fn merge<'g>(into: &mut LookaheadSet<'g>, from: &LookaheadSet<'g>, keep: impl Fn(&Lookahead<'g>) -> bool) -> bool {
    let before = into.len();
    into.extend(from.iter().copied().filter(|l| keep(l)));
    into.len() != before
}
