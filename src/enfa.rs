//! This module contains the ENFA, an NFA that may also take empty moves.
//! In the transition table an empty move is keyed with `None`, every ordinary symbol `c` with
//! `Some(c)`. This way the empty-move marker can never collide with a symbol of the alphabet.

use std::collections::BTreeSet;

use log::trace;

use crate::automaton::{
    check_accepting, check_start, check_state, check_symbol, rename_injective, Automaton, Label,
};
use crate::subset_construction::subset_construction;
use crate::{AutomataError, AutomataErrorKind, Dfa, Result, TransitionTable};

/// A non-deterministic finite automaton with empty moves (epsilon transitions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enfa<S: Label, C: Label> {
    states: BTreeSet<S>,
    alphabet: BTreeSet<C>,
    start: S,
    accepting: BTreeSet<S>,
    transitions: TransitionTable<(S, Option<C>), BTreeSet<S>>,
}

impl<S: Label, C: Label> Enfa<S, C> {
    /// Create an ENFA and validate it eagerly.
    /// Transition keys with `None` as symbol are empty moves and need no alphabet entry.
    pub fn new(
        states: BTreeSet<S>,
        alphabet: BTreeSet<C>,
        transitions: TransitionTable<(S, Option<C>), BTreeSet<S>>,
        start: S,
        accepting: BTreeSet<S>,
    ) -> Result<Self> {
        check_start(&states, &start)?;
        check_accepting(&states, &accepting)?;
        for ((from, symbol), targets) in &transitions {
            check_state(&states, from)?;
            if let Some(symbol) = symbol {
                check_symbol(&alphabet, symbol)?;
            }
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

    pub(crate) fn from_parts(
        states: BTreeSet<S>,
        alphabet: BTreeSet<C>,
        transitions: TransitionTable<(S, Option<C>), BTreeSet<S>>,
        start: S,
        accepting: BTreeSet<S>,
    ) -> Self {
        debug_assert!(states.contains(&start));
        debug_assert!(accepting.is_subset(&states));
        Self {
            states,
            alphabet,
            start,
            accepting,
            transitions,
        }
    }

    /// Get the states of the ENFA.
    pub fn states(&self) -> &BTreeSet<S> {
        &self.states
    }

    /// Get the start state of the ENFA.
    pub fn start(&self) -> &S {
        &self.start
    }

    /// Get the accepting states of the ENFA.
    pub fn accepting(&self) -> &BTreeSet<S> {
        &self.accepting
    }

    /// Get the transitions of the ENFA.
    pub fn transitions(&self) -> &TransitionTable<(S, Option<C>), BTreeSet<S>> {
        &self.transitions
    }

    /// Get the symbols that are actually used in the transition table, without the empty move.
    pub fn observed_alphabet(&self) -> BTreeSet<C> {
        self.transitions
            .keys()
            .filter_map(|(_, symbol)| symbol.clone())
            .collect()
    }

    /// Finds out whether the given set of states contains an accepting state.
    pub fn contains_accepting_state(&self, states: &BTreeSet<S>) -> bool {
        !states.is_disjoint(&self.accepting)
    }

    fn targets(&self, state: &S, symbol: &Option<C>) -> Option<&BTreeSet<S>> {
        self.transitions.apply(&(state.clone(), symbol.clone()))
    }

    /// Compute the epsilon-closure of the given state, i.e. the state itself and every state
    /// reachable from it by empty moves only.
    pub fn eclose(&self, state: &S) -> BTreeSet<S> {
        let mut closure = BTreeSet::new();
        let mut work_list = vec![state.clone()];
        while let Some(current) = work_list.pop() {
            if !closure.insert(current.clone()) {
                continue;
            }
            if let Some(targets) = self.targets(&current, &None) {
                work_list.extend(
                    targets
                        .iter()
                        .filter(|target| !closure.contains(target))
                        .cloned(),
                );
            }
        }
        closure
    }

    /// Compute the epsilon-closure of a set of states, i.e. the union of the closures of its
    /// members.
    pub fn eclose_set(&self, states: &BTreeSet<S>) -> BTreeSet<S> {
        states.iter().flat_map(|state| self.eclose(state)).collect()
    }

    /// Apply the transition function to the given state and symbol. Passing `None` follows the
    /// empty moves of the state (without closing over them).
    pub fn perform_transition(&self, state: &S, symbol: &Option<C>) -> Result<BTreeSet<S>> {
        if let Some(symbol) = symbol {
            if !self.alphabet.contains(symbol) {
                return Err(AutomataError::new(AutomataErrorKind::SymbolNotInAlphabet(
                    format!("{:?}", symbol),
                )));
            }
        }
        Ok(self.targets(state, symbol).cloned().unwrap_or_default())
    }

    /// The closed image of a set of states on a symbol.
    fn step(&self, states: &BTreeSet<S>, symbol: &C) -> BTreeSet<S> {
        let symbol = Some(symbol.clone());
        let moved: BTreeSet<S> = states
            .iter()
            .filter_map(|state| self.targets(state, &symbol))
            .flatten()
            .cloned()
            .collect();
        self.eclose_set(&moved)
    }

    /// Apply the extended transition function starting at the given state. The result is
    /// closed under empty moves.
    pub fn perform_extended_transition(&self, state: &S, word: &[C]) -> Result<BTreeSet<S>> {
        self.verify_word(word)?;
        Ok(word
            .iter()
            .fold(self.eclose(state), |current, symbol| {
                self.step(&current, symbol)
            }))
    }

    /// Convert the ENFA to a DFA with the modified subset construction over the observed
    /// alphabet.
    pub fn to_dfa(&self) -> Dfa<BTreeSet<S>, C> {
        self.to_dfa_with_alphabet(&self.observed_alphabet())
    }

    /// Convert the ENFA to a DFA with the modified subset construction over the given alphabet.
    /// The start subset is the epsilon-closure of the start state and every image is closed.
    pub fn to_dfa_with_alphabet(&self, alphabet: &BTreeSet<C>) -> Dfa<BTreeSet<S>, C> {
        let start = self.eclose(&self.start);
        trace!("Start subset {:?}", start);
        subset_construction(start, alphabet, &self.accepting, |subset, symbol| {
            self.step(subset, symbol)
        })
    }

    /// Rename the states and symbols of the ENFA. Both renamings must be injective.
    pub fn rename<T, D, F, G>(&self, state_renamer: F, symbol_renamer: G) -> Result<Enfa<T, D>>
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
                    (state_renamer(from), symbol.as_ref().map(&symbol_renamer)),
                    targets.iter().map(&state_renamer).collect(),
                )
            })
            .collect();
        Ok(Enfa {
            states,
            alphabet,
            start: state_renamer(&self.start),
            accepting: self.accepting.iter().map(&state_renamer).collect(),
            transitions,
        })
    }
}

impl<S: Label, C: Label> Automaton<C> for Enfa<S, C> {
    fn alphabet(&self) -> &BTreeSet<C> {
        &self.alphabet
    }

    fn accepts(&self, word: &[C]) -> Result<bool> {
        let states = self.perform_extended_transition(&self.start, word)?;
        Ok(self.contains_accepting_state(&states))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Accepts a*b? : 0 -e-> 1, 1 -a-> 1, 1 -e-> 2, 2 -b-> 3, accepting {2, 3}
    fn a_star_b_opt() -> Enfa<u8, char> {
        let mut transitions = TransitionTable::new();
        transitions.add_targets((0, None), [1]);
        transitions.add_targets((1, Some('a')), [1]);
        transitions.add_targets((1, None), [2]);
        transitions.add_targets((2, Some('b')), [3]);
        Enfa::new(
            [0, 1, 2, 3].into_iter().collect(),
            ['a', 'b'].into_iter().collect(),
            transitions,
            0,
            [2, 3].into_iter().collect(),
        )
        .unwrap()
    }

    fn word(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_eclose() {
        let enfa = a_star_b_opt();
        assert_eq!(enfa.eclose(&0), BTreeSet::from([0, 1, 2]));
        assert_eq!(enfa.eclose(&3), BTreeSet::from([3]));
        assert_eq!(
            enfa.eclose_set(&BTreeSet::from([1, 3])),
            BTreeSet::from([1, 2, 3])
        );
    }

    #[test]
    fn test_eclose_with_cycle() {
        let mut transitions = TransitionTable::new();
        transitions.add_targets((0, None), [1]);
        transitions.add_targets((1, None), [0, 2]);
        let enfa: Enfa<u8, char> = Enfa::new(
            [0, 1, 2].into_iter().collect(),
            BTreeSet::new(),
            transitions,
            0,
            BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(enfa.eclose(&1), BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_enfa_accepts() {
        let enfa = a_star_b_opt();
        for accepted in ["", "a", "aaa", "b", "aab"] {
            assert!(enfa.accepts(&word(accepted)).unwrap(), "{}", accepted);
        }
        for rejected in ["ba", "bb", "aba"] {
            assert!(!enfa.accepts(&word(rejected)).unwrap(), "{}", rejected);
        }
        assert!(enfa.accepts(&word("ac")).is_err());
    }

    #[test]
    fn test_enfa_to_dfa() {
        let enfa = a_star_b_opt();
        let dfa = enfa.to_dfa();
        assert_eq!(dfa.start(), &BTreeSet::from([0, 1, 2]));
        assert!(dfa.is_complete());
        for w in ["", "a", "b", "ab", "ba", "aab", "abb", "bab"] {
            assert_eq!(
                enfa.accepts(&word(w)).unwrap(),
                dfa.accepts(&word(w)).unwrap(),
                "{}",
                w
            );
        }
    }

    #[test]
    fn test_enfa_observed_alphabet() {
        let enfa = a_star_b_opt();
        assert_eq!(enfa.observed_alphabet(), BTreeSet::from(['a', 'b']));
    }

    #[test]
    fn test_enfa_rename() {
        let enfa = a_star_b_opt();
        let renamed = enfa
            .rename(|s| format!("s{}", s), |c| c.to_ascii_uppercase())
            .unwrap();
        assert_eq!(renamed.start(), "s0");
        assert!(renamed
            .transitions()
            .apply(&("s0".to_string(), None))
            .is_some());
        assert!(renamed.accepts(&word("AAB")).unwrap());
    }

    #[test]
    fn test_enfa_construction_errors() {
        let states: BTreeSet<u8> = [0, 1].into_iter().collect();
        let alphabet: BTreeSet<char> = ['a'].into_iter().collect();

        let result = Enfa::new(
            states.clone(),
            alphabet.clone(),
            TransitionTable::new(),
            2,
            BTreeSet::new(),
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            AutomataErrorKind::UnknownStartState(_)
        ));

        let result = Enfa::new(
            states.clone(),
            alphabet.clone(),
            TransitionTable::new(),
            0,
            [5].into_iter().collect(),
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            AutomataErrorKind::UnknownAcceptingState(_)
        ));

        let result = Enfa::new(
            states.clone(),
            alphabet.clone(),
            [((0, Some('z')), BTreeSet::from([1]))].into_iter().collect(),
            0,
            BTreeSet::new(),
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            AutomataErrorKind::UnknownSymbol(_)
        ));

        let result = Enfa::new(
            states.clone(),
            alphabet,
            [((0, None), BTreeSet::from([7]))].into_iter().collect(),
            0,
            BTreeSet::new(),
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            AutomataErrorKind::UnknownTransitionState(_)
        ));

        // Empty moves need no entry in the alphabet.
        let enfa: Enfa<u8, char> = Enfa::new(
            states,
            BTreeSet::new(),
            [((0, None), BTreeSet::from([1]))].into_iter().collect(),
            0,
            [1].into_iter().collect(),
        )
        .unwrap();
        assert!(enfa.accepts(&[]).unwrap());
    }
}
