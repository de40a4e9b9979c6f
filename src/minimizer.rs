//! DFA minimization with the table-filling algorithm and the language equivalence test that is
//! built on top of it.
//!
//! The algorithm works on an index-based copy of the DFA. A partial DFA is completed with an
//! implicit dead state first, so a missing transition behaves like a transition into a
//! non-accepting trap.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use itertools::Itertools;
use log::{debug, trace};

use crate::automaton::{Automaton, Label};
use crate::{Dfa, TransitionTable};

// A state of the disjoint union of two DFAs used by the equivalence test.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Side<S, T> {
    Left(S),
    Right(T),
}

// The DFA restricted to a set of states that is closed under transitions, completed with an
// implicit dead state if any transition is missing.
struct CompletedDfa<'a, S> {
    // The real states. The dead state, if present, has the index `states.len()`.
    states: Vec<&'a S>,
    index: BTreeMap<&'a S, usize>,
    // delta[state][symbol] is the index of the target state.
    delta: Vec<Vec<usize>>,
    accepting: Vec<bool>,
}

impl<'a, S: Label> CompletedDfa<'a, S> {
    fn new<C: Label>(dfa: &'a Dfa<S, C>, domain: &'a BTreeSet<S>) -> Self {
        let states: Vec<&S> = domain.iter().collect();
        let index: BTreeMap<&S, usize> = states
            .iter()
            .enumerate()
            .map(|(i, state)| (*state, i))
            .collect();
        let dead = states.len();
        let mut needs_dead_state = false;
        let mut delta: Vec<Vec<usize>> = states
            .iter()
            .map(|state| {
                dfa.alphabet()
                    .iter()
                    .map(|symbol| match dfa.target(state, symbol) {
                        Some(target) => index[target],
                        None => {
                            needs_dead_state = true;
                            dead
                        }
                    })
                    .collect()
            })
            .collect();
        let mut accepting: Vec<bool> = states.iter().map(|s| dfa.is_accepting(s)).collect();
        if needs_dead_state {
            delta.push(vec![dead; dfa.alphabet().len()]);
            accepting.push(false);
        }
        Self {
            states,
            index,
            delta,
            accepting,
        }
    }

    fn len(&self) -> usize {
        self.delta.len()
    }

    // Run the table-filling algorithm and return for every state (including the dead state) the
    // smallest index of a state it is equivalent to. That index identifies its class.
    fn representatives(&self) -> Vec<usize> {
        let n = self.len();
        let symbols = self.delta.first().map_or(0, |row| row.len());

        // predecessors[symbol][target] lists all states that move to target on symbol.
        let mut predecessors = vec![vec![Vec::new(); n]; symbols];
        for (source, row) in self.delta.iter().enumerate() {
            for (symbol, target) in row.iter().enumerate() {
                predecessors[symbol][*target].push(source);
            }
        }

        let mut marked = vec![vec![false; n]; n];
        let mut work_list = Vec::new();
        for (p, q) in (0..n).tuple_combinations() {
            if self.accepting[p] != self.accepting[q] {
                marked[p][q] = true;
                marked[q][p] = true;
                work_list.push((p, q));
            }
        }

        while let Some((a, b)) = work_list.pop() {
            for by_target in &predecessors {
                for &p in &by_target[a] {
                    for &q in &by_target[b] {
                        if p != q && !marked[p][q] {
                            trace!("Pair ({}, {}) is distinguishable", p, q);
                            marked[p][q] = true;
                            marked[q][p] = true;
                            work_list.push((p, q));
                        }
                    }
                }
            }
        }

        // Indistinguishability is an equivalence relation, so the first unmarked partner of a
        // state is the same for all members of its class.
        (0..n)
            .map(|p| (0..=p).find(|&q| !marked[p][q]).unwrap_or(p))
            .collect()
    }

    // Group the real states by their class. Classes consisting of the dead state alone are not
    // included.
    fn classes(&self, representatives: &[usize]) -> BTreeMap<usize, BTreeSet<S>> {
        let mut classes: BTreeMap<usize, BTreeSet<S>> = BTreeMap::new();
        for (i, state) in self.states.iter().enumerate() {
            classes
                .entry(representatives[i])
                .or_default()
                .insert((*state).clone());
        }
        classes
    }
}

impl<S: Label, C: Label> Dfa<S, C> {
    /// Performs the table-filling algorithm on all states of this automaton and returns the
    /// resulting partition as a map from every state to its class of equivalent states.
    pub fn partition(&self) -> BTreeMap<S, BTreeSet<S>> {
        let completed = CompletedDfa::new(self, self.states());
        let representatives = completed.representatives();
        let classes = completed.classes(&representatives);
        completed
            .states
            .iter()
            .enumerate()
            .map(|(i, state)| ((*state).clone(), classes[&representatives[i]].clone()))
            .collect()
    }

    /// Minimize the DFA.
    /// Unreachable states are removed first. Then the table-filling algorithm is applied to the
    /// reachable states and all equivalent states are merged into one state, which is the set of
    /// the merged states.
    pub fn minimize(&self) -> Dfa<BTreeSet<S>, C> {
        let now = Instant::now();
        let reachable = self.reachable_states();
        let completed = CompletedDfa::new(self, &reachable);
        let representatives = completed.representatives();
        let classes = completed.classes(&representatives);

        let symbols: Vec<&C> = self.alphabet().iter().collect();
        let mut transitions = TransitionTable::new();
        for (i, row) in completed.delta.iter().enumerate().take(completed.states.len()) {
            let source = &classes[&representatives[i]];
            for (symbol, target) in row.iter().enumerate() {
                // Transitions into the class of the dead state alone are left undefined.
                if let Some(target_class) = classes.get(&representatives[*target]) {
                    let previous = transitions.insert(
                        (source.clone(), symbols[symbol].clone()),
                        target_class.clone(),
                    );
                    debug_assert!(previous.map_or(true, |p| &p == target_class));
                }
            }
        }

        let start = classes[&representatives[completed.index[self.start()]]].clone();
        let accepting = classes
            .values()
            .filter(|class| class.iter().any(|state| self.is_accepting(state)))
            .cloned()
            .collect();
        let states: BTreeSet<BTreeSet<S>> = classes.into_values().collect();

        debug!(
            "Minimized DFA from {} to {} states in {} microseconds.",
            self.states().len(),
            states.len(),
            now.elapsed().as_micros()
        );

        Dfa::from_parts(states, self.alphabet().clone(), transitions, start, accepting)
    }

    /// Checks if this automaton recognizes the same language as the other automaton.
    /// Both automata are merged into one automaton with disjoint states and the table-filling
    /// partition of the merged automaton decides whether both start states are equivalent.
    pub fn equivalent_to<T: Label>(&self, other: &Dfa<T, C>) -> bool {
        let mut states: BTreeSet<Side<S, T>> =
            self.states().iter().cloned().map(Side::Left).collect();
        states.extend(other.states().iter().cloned().map(Side::Right));

        let alphabet: BTreeSet<C> = self.alphabet().union(other.alphabet()).cloned().collect();

        let mut transitions: TransitionTable<(Side<S, T>, C), Side<S, T>> = self
            .transitions()
            .iter()
            .map(|((from, symbol), to)| {
                (
                    (Side::Left(from.clone()), symbol.clone()),
                    Side::Left(to.clone()),
                )
            })
            .collect();
        for ((from, symbol), to) in other.transitions() {
            transitions.insert(
                (Side::Right(from.clone()), symbol.clone()),
                Side::Right(to.clone()),
            );
        }

        let mut accepting: BTreeSet<Side<S, T>> =
            self.accepting().iter().cloned().map(Side::Left).collect();
        accepting.extend(other.accepting().iter().cloned().map(Side::Right));

        let left_start = Side::Left(self.start().clone());
        let right_start = Side::Right(other.start().clone());
        let merged = Dfa::from_parts(states, alphabet, transitions, left_start.clone(), accepting);

        let completed = CompletedDfa::new(&merged, merged.states());
        let representatives = completed.representatives();
        representatives[completed.index[&left_start]]
            == representatives[completed.index[&right_start]]
    }
}
