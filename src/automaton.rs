//! Things that all automaton kinds have in common.

use std::collections::BTreeSet;
use std::fmt::{Debug, Display};

use itertools::Itertools;

use crate::{AutomataError, AutomataErrorKind, Result};

/// The bound for states and symbols.
/// Ordering gives composite states like `BTreeSet<S>` a structural equality and makes every
/// traversal deterministic. `Debug` is used for error messages.
pub trait Label: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> Label for T {}

/// The behavior shared by DFAs, NFAs and ENFAs.
pub trait Automaton<C: Label> {
    /// The declared alphabet.
    fn alphabet(&self) -> &BTreeSet<C>;

    /// Checks if the automaton accepts the given word.
    /// Fails if the word contains a symbol outside of the alphabet. This check is performed
    /// before any transition is taken.
    fn accepts(&self, word: &[C]) -> Result<bool>;

    /// Check that every symbol of the word belongs to the alphabet.
    fn verify_word(&self, word: &[C]) -> Result<()> {
        match word.iter().find(|symbol| !self.alphabet().contains(symbol)) {
            Some(symbol) => Err(AutomataError::new(
                AutomataErrorKind::SymbolNotInAlphabet(format!("{:?}", symbol)),
            )),
            None => Ok(()),
        }
    }
}

/// Render a composite state canonically, i.e. its members sorted and enclosed in braces.
/// The empty set is rendered as `{}`.
///
/// ```
/// use std::collections::BTreeSet;
/// use automata::set_label;
///
/// let state: BTreeSet<&str> = ["q", "p"].into_iter().collect();
/// assert_eq!(set_label(&state), "{p,q}");
/// ```
pub fn set_label<S: Display>(set: &BTreeSet<S>) -> String {
    format!("{{{}}}", set.iter().join(","))
}

pub(crate) fn check_start<S: Label>(states: &BTreeSet<S>, start: &S) -> Result<()> {
    if states.contains(start) {
        Ok(())
    } else {
        Err(AutomataError::new(AutomataErrorKind::UnknownStartState(
            format!("{:?}", start),
        )))
    }
}

pub(crate) fn check_accepting<S: Label>(
    states: &BTreeSet<S>,
    accepting: &BTreeSet<S>,
) -> Result<()> {
    match accepting.iter().find(|state| !states.contains(state)) {
        Some(state) => Err(AutomataError::new(
            AutomataErrorKind::UnknownAcceptingState(format!("{:?}", state)),
        )),
        None => Ok(()),
    }
}

pub(crate) fn check_state<S: Label>(states: &BTreeSet<S>, state: &S) -> Result<()> {
    if states.contains(state) {
        Ok(())
    } else {
        Err(AutomataError::new(
            AutomataErrorKind::UnknownTransitionState(format!("{:?}", state)),
        ))
    }
}

pub(crate) fn check_symbol<C: Label>(alphabet: &BTreeSet<C>, symbol: &C) -> Result<()> {
    if alphabet.contains(symbol) {
        Ok(())
    } else {
        Err(AutomataError::new(AutomataErrorKind::UnknownSymbol(
            format!("{:?}", symbol),
        )))
    }
}

/// Apply a renaming function to every element of the set and fail if two elements end up with
/// the same new label.
pub(crate) fn rename_injective<T, U, F>(
    items: &BTreeSet<T>,
    f: F,
    what: &str,
) -> Result<BTreeSet<U>>
where
    T: Label,
    U: Label,
    F: Fn(&T) -> U,
{
    let renamed: BTreeSet<U> = items.iter().map(f).collect();
    if renamed.len() == items.len() {
        Ok(renamed)
    } else {
        Err(AutomataError::new(AutomataErrorKind::NonInjectiveRename(
            format!(
                "{} distinct {} mapped to {} labels",
                items.len(),
                what,
                renamed.len()
            ),
        )))
    }
}
