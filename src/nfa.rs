//! This module contains the NFA (Non-deterministic Finite Automaton) implementation.
//! The NFA can be converted to an equivalent DFA with the subset construction.

use std::collections::BTreeSet;

use crate::automaton::{
    check_accepting, check_start, check_state, check_symbol, rename_injective, Automaton, Label,
};
use crate::subset_construction::subset_construction;
use crate::{AutomataError, AutomataErrorKind, Dfa, Result, TransitionTable};

/// A non-deterministic finite automaton.
/// A missing transition is the same as a transition to the empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa<S: Label, C: Label> {
    states: BTreeSet<S>,
    alphabet: BTreeSet<C>,
    start: S,
    accepting: BTreeSet<S>,
    transitions: TransitionTable<(S, C), BTreeSet<S>>,
}

impl<S: Label, C: Label> Nfa<S, C> {
    /// Create an NFA and validate it eagerly.
    pub fn new(
        states: BTreeSet<S>,
        alphabet: BTreeSet<C>,
        transitions: TransitionTable<(S, C), BTreeSet<S>>,
        start: S,
        accepting: BTreeSet<S>,
    ) -> Result<Self> {
        check_start(&states, &start)?;
        check_accepting(&states, &accepting)?;
        for ((from, symbol), targets) in &transitions {
            check_state(&states, from)?;
            check_symbol(&alphabet, symbol)?;
            for to in targets {
                check_state(&states, to)?;
            }
        }
        Ok(Self {
            states,
            alphabet,
            start,
            accepting,
            transitions,
        })
    }

    /// Get the states of the NFA.
    pub fn states(&self) -> &BTreeSet<S> {
        &self.states
    }

    /// Get the start state of the NFA.
    pub fn start(&self) -> &S {
        &self.start
    }

    /// Get the accepting states of the NFA.
    pub fn accepting(&self) -> &BTreeSet<S> {
        &self.accepting
    }

    /// Get the transitions of the NFA.
    pub fn transitions(&self) -> &TransitionTable<(S, C), BTreeSet<S>> {
        &self.transitions
    }

    /// Get the symbols that are actually used in the transition table.
    pub fn observed_alphabet(&self) -> BTreeSet<C> {
        self.transitions
            .keys()
            .map(|(_, symbol)| symbol.clone())
            .collect()
    }

    /// Finds out whether the given set of states contains an accepting state.
    pub fn contains_accepting_state(&self, states: &BTreeSet<S>) -> bool {
        !states.is_disjoint(&self.accepting)
    }

    /// Apply the transition function to the given state and symbol.
    pub fn perform_transition(&self, state: &S, symbol: &C) -> Result<BTreeSet<S>> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomataError::new(AutomataErrorKind::SymbolNotInAlphabet(
                format!("{:?}", symbol),
            )));
        }
        Ok(self.targets(state, symbol))
    }

    fn targets(&self, state: &S, symbol: &C) -> BTreeSet<S> {
        self.transitions
            .apply(&(state.clone(), symbol.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// The union of the targets of every state in `states` on `symbol`.
    fn perform_all_transitions(&self, states: &BTreeSet<S>, symbol: &C) -> BTreeSet<S> {
        states
            .iter()
            .flat_map(|state| self.targets(state, symbol))
            .collect()
    }

    /// Apply the extended transition function starting at the given state.
    pub fn perform_extended_transition(&self, state: &S, word: &[C]) -> Result<BTreeSet<S>> {
        self.verify_word(word)?;
        Ok(word
            .iter()
            .fold(BTreeSet::from([state.clone()]), |current, symbol| {
                self.perform_all_transitions(&current, symbol)
            }))
    }

    /// Convert the NFA to a DFA with the subset construction over the observed alphabet.
    pub fn to_dfa(&self) -> Dfa<BTreeSet<S>, C> {
        self.to_dfa_with_alphabet(&self.observed_alphabet())
    }

    /// Convert the NFA to a DFA with the subset construction over the given alphabet.
    pub fn to_dfa_with_alphabet(&self, alphabet: &BTreeSet<C>) -> Dfa<BTreeSet<S>, C> {
        subset_construction(
            BTreeSet::from([self.start.clone()]),
            alphabet,
            &self.accepting,
            |subset, symbol| self.perform_all_transitions(subset, symbol),
        )
    }

    /// Rename the states and symbols of the NFA. Both renamings must be injective.
    pub fn rename<T, D, F, G>(&self, state_renamer: F, symbol_renamer: G) -> Result<Nfa<T, D>>
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
            .map(|((from, symbol), targets)| {
                (
                    (state_renamer(from), symbol_renamer(symbol)),
                    targets.iter().map(&state_renamer).collect(),
                )
            })
            .collect();
        Ok(Nfa {
            states,
            alphabet,
            start: state_renamer(&self.start),
            accepting: self.accepting.iter().map(&state_renamer).collect(),
            transitions,
        })
    }
}

impl<S: Label, C: Label> Automaton<C> for Nfa<S, C> {
    fn alphabet(&self) -> &BTreeSet<C> {
        &self.alphabet
    }

    fn accepts(&self, word: &[C]) -> Result<bool> {
        let states = self.perform_extended_transition(&self.start, word)?;
        Ok(self.contains_accepting_state(&states))
    }
}
