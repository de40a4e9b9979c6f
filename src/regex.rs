//! The regular expression AST.
//! The set of node kinds is closed. Compilation to an ENFA is implemented in the `ast` module,
//! parsing in the `parser` module and the recovery of a regex from a DFA in the `reducer` module.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::automaton::Label;
use crate::{parse_regex, AutomataError, Dfa, RegexStateId};

/// A regular expression over symbols of type `C`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Regex<C: Label> {
    /// The language that only contains the empty word.
    Epsilon,
    /// The empty language.
    Phi,
    /// A single symbol.
    Literal(C),
    /// The left language followed by the right language.
    Concat(Box<Regex<C>>, Box<Regex<C>>),
    /// The union of both languages.
    Union(Box<Regex<C>>, Box<Regex<C>>),
    /// Zero or more repetitions (Kleene star).
    Closure(Box<Regex<C>>),
}

impl<C: Label> Regex<C> {
    /// Create a literal.
    pub fn literal(symbol: C) -> Self {
        Regex::Literal(symbol)
    }

    /// Concatenate two expressions and simplify.
    /// A concatenation with Phi is Phi, a concatenation with Epsilon is the other operand.
    pub fn concat(left: Regex<C>, right: Regex<C>) -> Self {
        match (left, right) {
            (Regex::Phi, _) | (_, Regex::Phi) => Regex::Phi,
            (Regex::Epsilon, other) | (other, Regex::Epsilon) => other,
            (left, right) => Regex::Concat(Box::new(left), Box::new(right)),
        }
    }

    /// Unite two expressions and simplify.
    /// A union with Phi is the other operand, a union of two equal expressions is the
    /// expression itself.
    pub fn union(left: Regex<C>, right: Regex<C>) -> Self {
        match (left, right) {
            (Regex::Phi, other) | (other, Regex::Phi) => other,
            (left, right) if left == right => left,
            (left, right) => Regex::Union(Box::new(left), Box::new(right)),
        }
    }

    /// Apply the Kleene star and simplify.
    /// The closures of Epsilon and Phi are both Epsilon and a closure is not closed twice.
    pub fn closure(inner: Regex<C>) -> Self {
        match inner {
            Regex::Epsilon | Regex::Phi => Regex::Epsilon,
            closure @ Regex::Closure(_) => closure,
            inner => Regex::Closure(Box::new(inner)),
        }
    }

    /// The symbols used by the literals of this expression.
    pub fn symbols(&self) -> BTreeSet<C> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<C>) {
        match self {
            Regex::Epsilon | Regex::Phi => {}
            Regex::Literal(symbol) => {
                symbols.insert(symbol.clone());
            }
            Regex::Concat(left, right) | Regex::Union(left, right) => {
                left.collect_symbols(symbols);
                right.collect_symbols(symbols);
            }
            Regex::Closure(inner) => inner.collect_symbols(symbols),
        }
    }

    /// Compile the expression and determinize the resulting ENFA over the symbols of the
    /// expression.
    pub fn to_dfa(&self) -> Dfa<BTreeSet<RegexStateId>, C> {
        self.to_enfa().to_dfa_with_alphabet(&self.symbols())
    }

    /// Compile, determinize and minimize the expression. The states of the result are numbered.
    pub fn to_minimal_dfa(&self) -> Dfa<usize, C> {
        self.to_dfa().minimize().renumbered()
    }

    fn is_atom(&self) -> bool {
        matches!(self, Regex::Epsilon | Regex::Phi | Regex::Literal(_))
    }
}

impl<C: Label + Display> Display for Regex<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "\\e"),
            Regex::Phi => write!(f, "\\p"),
            Regex::Literal(symbol) => write!(f, "{}", symbol),
            Regex::Concat(left, right) => {
                for operand in [left, right] {
                    if let Regex::Union(_, _) = operand.as_ref() {
                        write!(f, "({})", operand)?;
                    } else {
                        write!(f, "{}", operand)?;
                    }
                }
                Ok(())
            }
            Regex::Union(left, right) => write!(f, "{}+{}", left, right),
            Regex::Closure(inner) => {
                if inner.is_atom() {
                    write!(f, "{}*", inner)
                } else {
                    write!(f, "({})*", inner)
                }
            }
        }
    }
}

impl FromStr for Regex<char> {
    type Err = AutomataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_regex(s)
    }
}
