//! The `dot` module contains the conversion of the automata to the graphviz dot format.
//! The start state is drawn blue, accepting states are drawn red. States with composite labels
//! are usually renamed first, e.g. with [`crate::set_label`] or [`Dfa::renumbered`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::io::Write;

use dot_writer::{Attributes, DotWriter, NodeId, RankDirection, Scope};

use crate::automaton::Label;
use crate::{Dfa, Enfa, Nfa};

// The node of a state and the name under which edges refer to it.
struct StateNode {
    id: NodeId,
    name: String,
}

// Render the states in their order. The automatically assigned node ids are `node_<index>`.
fn render_states<'a, S: Label + Display>(
    digraph: &mut Scope<'_, '_>,
    states: &'a BTreeSet<S>,
    start: &S,
    accepting: &BTreeSet<S>,
) -> BTreeMap<&'a S, StateNode> {
    states
        .iter()
        .enumerate()
        .map(|(index, state)| {
            let mut node = digraph.node_auto();
            node.set_label(&state.to_string());
            if state == start {
                node.set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Blue)
                    .set_pen_width(3.0);
            }
            if accepting.contains(state) {
                node.set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Red)
                    .set_pen_width(3.0);
            }
            let id = node.id();
            (
                state,
                StateNode {
                    id,
                    name: format!("node_{}", index),
                },
            )
        })
        .collect()
}

/// Render the DFA to the graphviz dot format.
pub fn dfa_render<S, C, W>(dfa: &Dfa<S, C>, label: &str, output: &mut W)
where
    S: Label + Display,
    C: Label + Display,
    W: Write,
{
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    let nodes = render_states(&mut digraph, dfa.states(), dfa.start(), dfa.accepting());
    for ((from, symbol), to) in dfa.transitions() {
        digraph
            .edge(nodes[from].id.clone(), &nodes[to].name)
            .attributes()
            .set_label(&symbol.to_string());
    }
}

/// Render the NFA to the graphviz dot format. Each target of a transition gets its own edge.
pub fn nfa_render<S, C, W>(nfa: &Nfa<S, C>, label: &str, output: &mut W)
where
    S: Label + Display,
    C: Label + Display,
    W: Write,
{
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    let nodes = render_states(&mut digraph, nfa.states(), nfa.start(), nfa.accepting());
    for ((from, symbol), targets) in nfa.transitions() {
        for to in targets {
            digraph
                .edge(nodes[from].id.clone(), &nodes[to].name)
                .attributes()
                .set_label(&symbol.to_string());
        }
    }
}

/// Render the ENFA to the graphviz dot format. Empty moves are labelled with `ε`.
pub fn enfa_render<S, C, W>(enfa: &Enfa<S, C>, label: &str, output: &mut W)
where
    S: Label + Display,
    C: Label + Display,
    W: Write,
{
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    let nodes = render_states(&mut digraph, enfa.states(), enfa.start(), enfa.accepting());
    for ((from, symbol), targets) in enfa.transitions() {
        let symbol = match symbol {
            Some(symbol) => symbol.to_string(),
            None => "ε".to_string(),
        };
        for to in targets {
            digraph
                .edge(nodes[from].id.clone(), &nodes[to].name)
                .attributes()
                .set_label(&symbol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{set_label, Regex};

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        let mut output = Vec::new();
        f(&mut output);
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_dfa_render() {
        let regex: Regex<char> = "(0+1)*1".parse().unwrap();
        let dfa = regex.to_minimal_dfa();
        let dot = render(|output| dfa_render(&dfa, "EndsInOne", output));
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("EndsInOne"));
        assert!(dot.contains("node_0"));
        assert!(dot.contains("node_1"));
        assert!(!dot.contains("node_2"));
    }

    #[test]
    fn test_nfa_render() {
        let nfa: Nfa<char, char> = Nfa::new(
            ['p', 'q'].into_iter().collect(),
            ['a'].into_iter().collect(),
            [(('p', 'a'), BTreeSet::from(['p', 'q']))]
                .into_iter()
                .collect(),
            'p',
            ['q'].into_iter().collect(),
        )
        .unwrap();
        let dot = render(|output| nfa_render(&nfa, "Nfa", output));
        assert_eq!(dot.matches("->").count(), 2);
    }

    #[test]
    fn test_enfa_render() {
        let regex: Regex<char> = "a*".parse().unwrap();
        let enfa = regex.to_enfa();
        let dot = render(|output| enfa_render(&enfa, "Closure", output));
        assert!(dot.contains("ε"));
        assert!(dot.contains("node_3"));
    }

    #[test]
    fn test_render_composite_states() {
        let regex: Regex<char> = "ab".parse().unwrap();
        let dfa = regex
            .to_dfa()
            .rename(set_label, |symbol| *symbol)
            .unwrap();
        let dot = render(|output| dfa_render(&dfa, "Composite", output));
        assert!(dot.contains("{}"));
    }
}
