//! The conversion of a DFA into a regular expression by state elimination.
//!
//! The reachable states are numbered and the transitions become edges labelled with regexes.
//! For every accepting state a copy of the edges is reduced until only the start state and that
//! accepting state are left. The regexes of all accepting states are united.

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, trace};

use crate::automaton::Label;
use crate::{Dfa, Regex};

// The labelled edges between numbered states. There is at most one edge per pair of states.
type Edges<C> = BTreeMap<(usize, usize), Regex<C>>;

// Add a label to the edge between two states. Parallel edges are united.
fn add_edge<C: Label>(edges: &mut Edges<C>, from: usize, to: usize, label: Regex<C>) {
    let existing = edges.remove(&(from, to)).unwrap_or(Regex::Phi);
    edges.insert((from, to), Regex::union(existing, label));
}

fn edge<C: Label>(edges: &Edges<C>, from: usize, to: usize) -> Regex<C> {
    edges.get(&(from, to)).cloned().unwrap_or(Regex::Phi)
}

// Eliminate all states except `start` and `accept` and read off the regex of the remaining
// two-state automaton.
fn eliminate<C: Label>(
    mut edges: Edges<C>,
    count: usize,
    start: usize,
    accept: usize,
) -> Regex<C> {
    for victim in (0..count).filter(|state| *state != start && *state != accept) {
        let self_loop = Regex::closure(edges.remove(&(victim, victim)).unwrap_or(Regex::Phi));
        let incoming: Vec<(usize, Regex<C>)> = edges
            .iter()
            .filter(|((_, to), _)| *to == victim)
            .map(|((from, _), label)| (*from, label.clone()))
            .collect();
        let outgoing: Vec<(usize, Regex<C>)> = edges
            .iter()
            .filter(|((from, _), _)| *from == victim)
            .map(|((_, to), label)| (*to, label.clone()))
            .collect();
        edges.retain(|(from, to), _| *from != victim && *to != victim);

        for (q, into_victim) in &incoming {
            for (p, out_of_victim) in &outgoing {
                let path = Regex::concat(
                    into_victim.clone(),
                    Regex::concat(self_loop.clone(), out_of_victim.clone()),
                );
                add_edge(&mut edges, *q, *p, path);
            }
        }
        trace!(
            "Eliminated state {} ({} incoming, {} outgoing), {} edges left",
            victim,
            incoming.len(),
            outgoing.len(),
            edges.len()
        );
    }

    let start_loop = edge(&edges, start, start);
    if start == accept {
        return Regex::closure(start_loop);
    }
    let forward = edge(&edges, start, accept);
    let accept_loop = Regex::closure(edge(&edges, accept, accept));
    let backward = edge(&edges, accept, start);

    // (R + S U* T)* S U*
    let forward_loop = Regex::concat(forward, accept_loop);
    Regex::concat(
        Regex::closure(Regex::union(
            start_loop,
            Regex::concat(forward_loop.clone(), backward),
        )),
        forward_loop,
    )
}

impl<S: Label, C: Label> Dfa<S, C> {
    /// Convert the DFA into a regular expression that describes the same language.
    /// Unreachable states are ignored. A DFA without reachable accepting states yields
    /// [`Regex::Phi`].
    pub fn to_regex(&self) -> Regex<C> {
        let now = Instant::now();
        let reachable = self.reachable_states();
        let index: BTreeMap<&S, usize> = reachable
            .iter()
            .enumerate()
            .map(|(i, state)| (state, i))
            .collect();

        let mut edges = Edges::new();
        for ((from, symbol), to) in self.transitions() {
            if let (Some(from), Some(to)) = (index.get(from), index.get(to)) {
                add_edge(&mut edges, *from, *to, Regex::literal(symbol.clone()));
            }
        }

        let start = index[self.start()];
        let regex = index
            .iter()
            .filter(|(state, _)| self.is_accepting(state))
            .map(|(_, accept)| eliminate(edges.clone(), reachable.len(), start, *accept))
            .fold(Regex::Phi, Regex::union);

        debug!(
            "Reduced DFA with {} reachable states to a regex in {} microseconds.",
            reachable.len(),
            now.elapsed().as_micros()
        );
        regex
    }
}
