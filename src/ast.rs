//! This module contains the compilation of a regex AST into an ENFA (Thompson construction).
//! Every node of the AST compiles to a fragment with exactly one start state and a set of
//! accepting states. All states of one compilation are minted by the same id generator, so the
//! fragments of sibling subexpressions never share a state.

use std::collections::BTreeSet;
use std::time::Instant;

use log::{debug, trace};

use crate::automaton::Label;
use crate::ids::RegexStateIdGenerator;
use crate::{Enfa, Regex, RegexStateId, TransitionTable};

// The part of the ENFA that represents one node of the AST.
#[derive(Debug)]
struct Fragment {
    start: RegexStateId,
    accepting: BTreeSet<RegexStateId>,
}

struct ThompsonCompiler<C: Label> {
    ids: RegexStateIdGenerator,
    transitions: TransitionTable<(RegexStateId, Option<C>), BTreeSet<RegexStateId>>,
}

impl<C: Label> ThompsonCompiler<C> {
    fn new() -> Self {
        Self {
            ids: RegexStateIdGenerator::new(),
            transitions: TransitionTable::new(),
        }
    }

    fn add_empty_moves(
        &mut self,
        from: RegexStateId,
        targets: impl IntoIterator<Item = RegexStateId>,
    ) {
        self.transitions.add_targets((from, None), targets);
    }

    fn compile(&mut self, regex: &Regex<C>) -> Fragment {
        match regex {
            Regex::Epsilon => {
                let start = self.ids.fresh();
                let accept = self.ids.fresh();
                self.add_empty_moves(start, [accept]);
                Fragment {
                    start,
                    accepting: BTreeSet::from([accept]),
                }
            }
            Regex::Phi => Fragment {
                start: self.ids.fresh(),
                accepting: BTreeSet::new(),
            },
            Regex::Literal(symbol) => {
                let start = self.ids.fresh();
                let accept = self.ids.fresh();
                self.transitions
                    .add_targets((start, Some(symbol.clone())), [accept]);
                Fragment {
                    start,
                    accepting: BTreeSet::from([accept]),
                }
            }
            Regex::Concat(left, right) => {
                let left = self.compile(left);
                let right = self.compile(right);
                for state in &left.accepting {
                    self.add_empty_moves(*state, [right.start]);
                }
                Fragment {
                    start: left.start,
                    accepting: right.accepting,
                }
            }
            Regex::Union(left, right) => {
                let start = self.ids.fresh();
                let left = self.compile(left);
                let right = self.compile(right);
                self.add_empty_moves(start, [left.start, right.start]);
                let mut accepting = left.accepting;
                accepting.extend(right.accepting);
                Fragment { start, accepting }
            }
            Regex::Closure(inner) => {
                let start = self.ids.fresh();
                let accept = self.ids.fresh();
                let inner = self.compile(inner);
                self.add_empty_moves(start, [inner.start, accept]);
                for state in &inner.accepting {
                    self.add_empty_moves(*state, [inner.start, accept]);
                }
                Fragment {
                    start,
                    accepting: BTreeSet::from([accept]),
                }
            }
        }
    }
}

impl<C: Label> Regex<C> {
    /// Compile the regex into an ENFA whose alphabet is the set of symbols of the regex.
    pub fn to_enfa(&self) -> Enfa<RegexStateId, C> {
        let now = Instant::now();
        let mut compiler = ThompsonCompiler::new();
        let fragment = compiler.compile(self);
        trace!("Compiled fragment {:?}", fragment);

        let ThompsonCompiler { ids, transitions } = compiler;
        let states: BTreeSet<RegexStateId> = (0..ids.count()).map(RegexStateId::from).collect();
        debug!(
            "Compiled regex to an ENFA with {} states in {} microseconds.",
            states.len(),
            now.elapsed().as_micros()
        );
        Enfa::from_parts(
            states,
            self.symbols(),
            transitions,
            fragment.start,
            fragment.accepting,
        )
    }
}
