#![forbid(missing_docs)]
//! The `automata` crate provides deterministic and non-deterministic finite automata and a
//! small regular expression language that converts to and from them.
//!
//! A regex is parsed, compiled to an ENFA, determinized with the subset construction and
//! minimized. A DFA can be turned back into a regex by state elimination.
//!
//! ```
//! use automata::{Automaton, Regex};
//!
//! let regex: Regex<char> = "(0+1)*1".parse().unwrap();
//! let dfa = regex.to_minimal_dfa();
//! assert!(dfa.accepts(&['0', '0', '1']).unwrap());
//! assert!(!dfa.accepts(&['1', '0']).unwrap());
//! assert!(dfa.to_regex().to_dfa().equivalent_to(&dfa));
//! ```

/// Module with error definitions
mod errors;
pub use errors::{AutomataError, AutomataErrorKind, ParseError, ParseErrorKind, Result};

/// Module that provides the identity tokens for states created by the regex compilation.
mod ids;
pub use ids::RegexStateId;

/// The partial mapping that all automata are built on.
mod transition_table;
pub use transition_table::TransitionTable;

/// The traits shared by all automaton kinds.
mod automaton;
pub use automaton::{set_label, Automaton, Label};

/// The dfa module contains the DFA implementation.
mod dfa;
pub use dfa::Dfa;

/// Minimization and equivalence of DFAs.
mod minimizer;

/// The nfa module contains the NFA implementation.
mod nfa;
pub use nfa::Nfa;

/// The enfa module contains the NFA with empty moves.
mod enfa;
pub use enfa::Enfa;

/// The subset construction for the conversion of NFAs and ENFAs to DFAs.
mod subset_construction;

/// The regex AST.
mod regex;
pub use regex::Regex;

/// The module containing the conversion from the regex AST to an ENFA
mod ast;

/// The parser module contains the regex syntax parser.
mod parser;
pub use parser::parse_regex;

/// Conversion of a DFA to a regex.
mod reducer;

/// Module with conversion to graphviz dot format
#[cfg(feature = "dot_writer")]
mod dot;
#[cfg(feature = "dot_writer")]
pub use dot::{dfa_render, enfa_render, nfa_render};

/// Reading and writing automata in a line-oriented text format.
pub mod format;
