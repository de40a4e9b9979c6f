//! This module contains the DFA implementation.
//! The DFA is either built directly from a transition table or produced by the subset
//! construction from an NFA or ENFA. Minimization lives in the `minimizer` module and the
//! conversion back to a regular expression in the `reducer` module.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use crate::automaton::{
    check_accepting, check_start, check_state, check_symbol, rename_injective, Automaton, Label,
};
use crate::{AutomataError, AutomataErrorKind, Result, TransitionTable};

/// A deterministic finite automaton.
/// The transition table may be partial. Applying an undefined transition is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<S: Label, C: Label> {
    // The declared state universe.
    states: BTreeSet<S>,
    // The declared alphabet.
    alphabet: BTreeSet<C>,
    start: S,
    accepting: BTreeSet<S>,
    transitions: TransitionTable<(S, C), S>,
}

impl<S: Label, C: Label> Dfa<S, C> {
    /// Create a DFA and validate it eagerly.
    /// The start state, all accepting states and all states used in transitions must be in
    /// `states`, and every transition symbol must be in `alphabet`.
    pub fn new(
        states: BTreeSet<S>,
        alphabet: BTreeSet<C>,
        transitions: TransitionTable<(S, C), S>,
        start: S,
        accepting: BTreeSet<S>,
    ) -> Result<Self> {
        check_start(&states, &start)?;
        check_accepting(&states, &accepting)?;
        for ((from, symbol), to) in &transitions {
            check_state(&states, from)?;
            check_symbol(&alphabet, symbol)?;
            check_state(&states, to)?;
        }
        Ok(Self {
            states,
            alphabet,
            start,
            accepting,
            transitions,
        })
    }

    /// Create a DFA from parts that are known to be consistent.
    pub(crate) fn from_parts(
        states: BTreeSet<S>,
        alphabet: BTreeSet<C>,
        transitions: TransitionTable<(S, C), S>,
        start: S,
        accepting: BTreeSet<S>,
    ) -> Self {
        debug_assert!(states.contains(&start));
        debug_assert!(accepting.is_subset(&states));
        debug_assert!(transitions.iter().all(|((from, symbol), to)| states
            .contains(from)
            && states.contains(to)
            && alphabet.contains(symbol)));
        Self {
            states,
            alphabet,
            start,
            accepting,
            transitions,
        }
    }

    /// Get the states of the DFA.
    pub fn states(&self) -> &BTreeSet<S> {
        &self.states
    }

    /// Get the start state of the DFA.
    pub fn start(&self) -> &S {
        &self.start
    }

    /// Get the accepting states of the DFA.
    pub fn accepting(&self) -> &BTreeSet<S> {
        &self.accepting
    }

    /// Get the transitions of the DFA.
    pub fn transitions(&self) -> &TransitionTable<(S, C), S> {
        &self.transitions
    }

    /// Get the symbols that are actually used in the transition table.
    pub fn observed_alphabet(&self) -> BTreeSet<C> {
        self.transitions
            .keys()
            .map(|(_, symbol)| symbol.clone())
            .collect()
    }

    /// Finds out if the given state is an accepting state.
    pub fn is_accepting(&self, state: &S) -> bool {
        self.accepting.contains(state)
    }

    /// Returns true if a transition is defined for every state and every symbol.
    pub fn is_complete(&self) -> bool {
        self.transitions.len() == self.states.len() * self.alphabet.len()
    }

    /// Look up a transition without any checks.
    #[inline]
    pub(crate) fn target(&self, state: &S, symbol: &C) -> Option<&S> {
        self.transitions.apply(&(state.clone(), symbol.clone()))
    }

    /// Apply the transition function to the given state and symbol.
    pub fn perform_transition(&self, state: &S, symbol: &C) -> Result<&S> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomataError::new(AutomataErrorKind::SymbolNotInAlphabet(
                format!("{:?}", symbol),
            )));
        }
        self.target(state, symbol).ok_or_else(|| {
            AutomataError::new(AutomataErrorKind::UndefinedTransition {
                state: format!("{:?}", state),
                symbol: format!("{:?}", symbol),
            })
        })
    }

    /// Apply the extended transition function, i.e. fold the transition function over the word.
    pub fn perform_extended_transition(&self, state: &S, word: &[C]) -> Result<S> {
        self.verify_word(word)?;
        word.iter()
            .try_fold(state.clone(), |current, symbol| {
                self.perform_transition(&current, symbol).cloned()
            })
    }

    /// Get the set of all states reachable from the start state.
    pub fn reachable_states(&self) -> BTreeSet<S> {
        let mut reachable = BTreeSet::new();
        let mut work_list = vec![self.start.clone()];
        while let Some(state) = work_list.pop() {
            if !reachable.insert(state.clone()) {
                continue;
            }
            for symbol in &self.alphabet {
                if let Some(target) = self.target(&state, symbol) {
                    if !reachable.contains(target) {
                        work_list.push(target.clone());
                    }
                }
            }
        }
        trace!(
            "{} of {} states are reachable",
            reachable.len(),
            self.states.len()
        );
        reachable
    }

    /// Rename the states and symbols of the DFA.
    /// Both functions must be injective on the states and the alphabet respectively, otherwise
    /// transitions would be merged and an error is returned.
    pub fn rename<T, D, F, G>(&self, state_renamer: F, symbol_renamer: G) -> Result<Dfa<T, D>>
    where
        T: Label,
        D: Label,
        F: Fn(&S) -> T,
        G: Fn(&C) -> D,
    {
        let states = rename_injective(&self.states, &state_renamer, "states")?;
        let alphabet = rename_injective(&self.alphabet, &symbol_renamer, "symbols")?;
        let transitions = self
            .transitions
            .iter()
            .map(|((from, symbol), to)| {
                (
                    (state_renamer(from), symbol_renamer(symbol)),
                    state_renamer(to),
                )
            })
            .collect::<TransitionTable<_, _>>();
        debug_assert_eq!(transitions.len(), self.transitions.len());
        Ok(Dfa::from_parts(
            states,
            alphabet,
            transitions,
            state_renamer(&self.start),
            self.accepting.iter().map(&state_renamer).collect(),
        ))
    }

    /// Replace every state by its index in the ordered state set.
    /// This is the usual way to get flat labels after a conversion produced composite states.
    pub fn renumbered(&self) -> Dfa<usize, C> {
        let numbers: BTreeMap<&S, usize> = self
            .states
            .iter()
            .enumerate()
            .map(|(index, state)| (state, index))
            .collect();
        let number = |state: &S| numbers[state];
        Dfa::from_parts(
            (0..self.states.len()).collect(),
            self.alphabet.clone(),
            self.transitions
                .iter()
                .map(|((from, symbol), to)| ((number(from), symbol.clone()), number(to)))
                .collect(),
            number(&self.start),
            self.accepting.iter().map(number).collect(),
        )
    }
}

impl<S: Label, C: Label> Automaton<C> for Dfa<S, C> {
    fn alphabet(&self) -> &BTreeSet<C> {
        &self.alphabet
    }

    fn accepts(&self, word: &[C]) -> Result<bool> {
        let state = self.perform_extended_transition(&self.start, word)?;
        Ok(self.is_accepting(&state))
    }
}

impl<S, C> std::fmt::Display for Dfa<S, C>
where
    S: Label + std::fmt::Display,
    C: Label + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DFA")?;
        writeln!(f, "Start state: {}", self.start)?;
        writeln!(f, "Accepting states:")?;
        for state in &self.accepting {
            writeln!(f, "{}", state)?;
        }
        writeln!(f, "Transitions:")?;
        for ((from, symbol), to) in &self.transitions {
            writeln!(f, "{} -{}-> {}", from, symbol, to)?;
        }
        Ok(())
    }
}
