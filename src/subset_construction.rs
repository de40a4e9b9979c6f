//! The subset construction shared by the NFA and the ENFA conversions.
//! Each DFA state is a set of source states. Only subsets reachable from the start subset are
//! ever explored.

use std::collections::BTreeSet;
use std::time::Instant;

use log::{debug, trace};

use crate::automaton::Label;
use crate::{Dfa, TransitionTable};

/// Build a DFA whose states are the reachable subsets of the source automaton's states.
///
/// * `start` - the start subset, `{start}` for an NFA or its epsilon-closure for an ENFA.
/// * `alphabet` - the symbols to build transitions for.
/// * `accepting` - the accepting states of the source automaton.
/// * `image` - computes the subset reached from a subset on a symbol.
///
/// The result is complete over `alphabet`. The empty subset appears as an ordinary,
/// non-accepting state whenever it is reachable.
pub(crate) fn subset_construction<S, C, F>(
    start: BTreeSet<S>,
    alphabet: &BTreeSet<C>,
    accepting: &BTreeSet<S>,
    image: F,
) -> Dfa<BTreeSet<S>, C>
where
    S: Label,
    C: Label,
    F: Fn(&BTreeSet<S>, &C) -> BTreeSet<S>,
{
    let now = Instant::now();
    let mut states = BTreeSet::new();
    let mut accepting_states = BTreeSet::new();
    let mut transitions = TransitionTable::new();

    // Every subset is pushed exactly once, right after its discovery.
    states.insert(start.clone());
    let mut work_list = vec![start.clone()];

    while let Some(subset) = work_list.pop() {
        if !subset.is_disjoint(accepting) {
            accepting_states.insert(subset.clone());
        }
        for symbol in alphabet {
            let target = image(&subset, symbol);
            if states.insert(target.clone()) {
                trace!("Discovered subset {:?}", target);
                work_list.push(target.clone());
            }
            transitions.insert((subset.clone(), symbol.clone()), target);
        }
    }

    debug!(
        "Subset construction produced {} states in {} microseconds.",
        states.len(),
        now.elapsed().as_micros()
    );

    Dfa::from_parts(
        states,
        alphabet.clone(),
        transitions,
        start,
        accepting_states,
    )
}
