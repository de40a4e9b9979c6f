//! A line-oriented text format for automata with string labels.
//!
//! ```text
//! dfa
//! start q1
//! accepts q1
//! transitions
//! q1 0 q2
//! q2 0 q1
//! ```
//!
//! The first line names the kind (`dfa`, `nfa` or `enfa`). After the `transitions` line every
//! non-empty line is a transition `<from> <symbol> <to>`. In an ENFA the symbol `\e` is an empty
//! move. The states of the automaton are the start state, the accepting states and all states
//! used by transitions. The alphabet consists of the symbols used by transitions.
//! Labels must not contain whitespace.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::automaton::Label;
use crate::{AutomataError, AutomataErrorKind, Dfa, Enfa, Nfa, Result, TransitionTable};

/// The symbol that stands for an empty move in the text format.
pub const EMPTY_MOVE: &str = "\\e";

/// An automaton read from the text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAutomaton {
    /// A deterministic automaton.
    Dfa(Dfa<String, String>),
    /// A non-deterministic automaton.
    Nfa(Nfa<String, String>),
    /// A non-deterministic automaton with empty moves.
    Enfa(Enfa<String, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Dfa,
    Nfa,
    Enfa,
}

fn format_error(line: usize, message: impl Into<String>) -> AutomataError {
    AutomataError::new(AutomataErrorKind::FormatError {
        line,
        message: message.into(),
    })
}

// The parts of an automaton as they appear in the text.
#[derive(Debug, Default)]
struct Sections {
    start: Option<String>,
    accepting: BTreeSet<String>,
    // (line, from, symbol, to)
    transitions: Vec<(usize, String, String, String)>,
}

impl Sections {
    fn states(&self, start: &str) -> BTreeSet<String> {
        let mut states: BTreeSet<String> = self.accepting.clone();
        states.insert(start.to_string());
        for (_, from, _, to) in &self.transitions {
            states.insert(from.clone());
            states.insert(to.clone());
        }
        states
    }
}

/// Read an automaton in the text format.
pub fn read_automaton<R: BufRead>(input: R) -> Result<ParsedAutomaton> {
    let mut kind = None;
    let mut sections = Sections::default();
    let mut in_transitions = false;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if kind.is_none() {
            kind = Some(match tokens.as_slice() {
                ["dfa"] => Kind::Dfa,
                ["nfa"] => Kind::Nfa,
                ["enfa"] => Kind::Enfa,
                _ => {
                    return Err(format_error(
                        number,
                        format!("expected 'dfa', 'nfa' or 'enfa', found '{}'", line.trim()),
                    ))
                }
            });
            continue;
        }
        if in_transitions {
            match tokens.as_slice() {
                [from, symbol, to] => sections.transitions.push((
                    number,
                    from.to_string(),
                    symbol.to_string(),
                    to.to_string(),
                )),
                _ => {
                    return Err(format_error(
                        number,
                        "a transition consists of a state, a symbol and a state",
                    ))
                }
            }
            continue;
        }
        match tokens.as_slice() {
            ["start", state] => {
                if sections.start.is_some() {
                    return Err(format_error(number, "duplicate start state"));
                }
                sections.start = Some(state.to_string());
            }
            ["start", ..] => return Err(format_error(number, "expected exactly one start state")),
            ["accepts", states @ ..] => {
                sections
                    .accepting
                    .extend(states.iter().map(|state| state.to_string()));
            }
            ["transitions"] => in_transitions = true,
            _ => {
                return Err(format_error(
                    number,
                    format!("unrecognized word '{}'", tokens[0]),
                ))
            }
        }
    }

    let kind = kind.ok_or_else(|| format_error(0, "empty input"))?;
    let start = sections
        .start
        .clone()
        .ok_or_else(|| format_error(0, "missing start state"))?;
    debug!(
        "Read {:?} with {} transition lines",
        kind,
        sections.transitions.len()
    );
    match kind {
        Kind::Dfa => build_dfa(sections, start).map(ParsedAutomaton::Dfa),
        Kind::Nfa => build_nfa(sections, start).map(ParsedAutomaton::Nfa),
        Kind::Enfa => build_enfa(sections, start).map(ParsedAutomaton::Enfa),
    }
}

fn build_dfa(sections: Sections, start: String) -> Result<Dfa<String, String>> {
    let states = sections.states(&start);
    let mut alphabet = BTreeSet::new();
    let mut transitions = TransitionTable::new();
    for (line, from, symbol, to) in sections.transitions {
        alphabet.insert(symbol.clone());
        if let Some(previous) = transitions.insert((from, symbol), to.clone()) {
            if previous != to {
                return Err(format_error(
                    line,
                    format!("conflicting targets {} and {}", previous, to),
                ));
            }
        }
    }
    Dfa::new(states, alphabet, transitions, start, sections.accepting)
}

fn build_nfa(sections: Sections, start: String) -> Result<Nfa<String, String>> {
    let states = sections.states(&start);
    let mut alphabet = BTreeSet::new();
    let mut transitions = TransitionTable::new();
    for (_, from, symbol, to) in sections.transitions {
        alphabet.insert(symbol.clone());
        transitions.add_targets((from, symbol), [to]);
    }
    Nfa::new(states, alphabet, transitions, start, sections.accepting)
}

fn build_enfa(sections: Sections, start: String) -> Result<Enfa<String, String>> {
    let states = sections.states(&start);
    let mut alphabet = BTreeSet::new();
    let mut transitions = TransitionTable::new();
    for (_, from, symbol, to) in sections.transitions {
        let symbol = if symbol == EMPTY_MOVE {
            None
        } else {
            alphabet.insert(symbol.clone());
            Some(symbol)
        };
        transitions.add_targets((from, symbol), [to]);
    }
    Enfa::new(states, alphabet, transitions, start, sections.accepting)
}

impl FromStr for ParsedAutomaton {
    type Err = AutomataError;

    fn from_str(s: &str) -> Result<Self> {
        read_automaton(s.as_bytes())
    }
}

fn write_header<S: Display, W: Write>(
    output: &mut W,
    kind: &str,
    start: &S,
    accepting: &BTreeSet<S>,
) -> Result<()> {
    writeln!(output, "{}", kind)?;
    writeln!(output, "start {}", start)?;
    write!(output, "accepts")?;
    for state in accepting {
        write!(output, " {}", state)?;
    }
    writeln!(output)?;
    writeln!(output, "transitions")?;
    Ok(())
}

/// Write the DFA in the text format.
/// Only states that are start, accepting or part of a transition survive a round trip.
pub fn write_dfa<S, C, W>(dfa: &Dfa<S, C>, output: &mut W) -> Result<()>
where
    S: Label + Display,
    C: Label + Display,
    W: Write,
{
    write_header(output, "dfa", dfa.start(), dfa.accepting())?;
    for ((from, symbol), to) in dfa.transitions() {
        writeln!(output, "{} {} {}", from, symbol, to)?;
    }
    Ok(())
}

/// Write the NFA in the text format, one line per target state.
pub fn write_nfa<S, C, W>(nfa: &Nfa<S, C>, output: &mut W) -> Result<()>
where
    S: Label + Display,
    C: Label + Display,
    W: Write,
{
    write_header(output, "nfa", nfa.start(), nfa.accepting())?;
    for ((from, symbol), targets) in nfa.transitions() {
        for to in targets {
            writeln!(output, "{} {} {}", from, symbol, to)?;
        }
    }
    Ok(())
}

/// Write the ENFA in the text format, one line per target state.
pub fn write_enfa<S, C, W>(enfa: &Enfa<S, C>, output: &mut W) -> Result<()>
where
    S: Label + Display,
    C: Label + Display,
    W: Write,
{
    write_header(output, "enfa", enfa.start(), enfa.accepting())?;
    for ((from, symbol), targets) in enfa.transitions() {
        let symbol = match symbol {
            Some(symbol) => symbol.to_string(),
            None => EMPTY_MOVE.to_string(),
        };
        for to in targets {
            writeln!(output, "{} {} {}", from, symbol, to)?;
        }
    }
    Ok(())
}
