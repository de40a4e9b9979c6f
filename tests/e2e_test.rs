// Reads every automaton in the data directory, checks its words and converts it.
// Run with `cargo test --test e2e_test`

use std::fs;
use std::io::BufReader;

use automata::format::{read_automaton, write_dfa, write_enfa, write_nfa, ParsedAutomaton};
use automata::{Automaton, Dfa};

// The words file has one line per word: `<symbols> accept|reject`, `-` is the empty word.
fn read_words(path: &std::path::Path) -> Vec<(Vec<String>, bool)> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (word, verdict) = line.split_once(' ').unwrap();
            let symbols = if word == "-" {
                Vec::new()
            } else {
                word.chars().map(|c| c.to_string()).collect()
            };
            (symbols, verdict.trim() == "accept")
        })
        .collect()
}

fn check_dfa<S: automata::Label>(dfa: &Dfa<S, String>, words: &[(Vec<String>, bool)], name: &str) {
    let minimized = dfa.minimize();
    for (word, expected) in words {
        assert_eq!(dfa.accepts(word).unwrap(), *expected, "{} {:?}", name, word);
        assert_eq!(
            minimized.accepts(word).unwrap(),
            *expected,
            "minimized {} {:?}",
            name,
            word
        );
    }
    assert!(minimized.equivalent_to(dfa), "{}", name);
    assert!(dfa.to_regex().to_dfa().equivalent_to(dfa), "{}", name);
}

#[test]
fn e2e_test() {
    // Initialize the logger
    let _ = env_logger::builder().is_test(true).try_init();

    let mut count = 0;
    for entry in fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().unwrap() == "words" {
            continue;
        }
        println!("Entry: {}", path.display());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let words = read_words(&path.with_extension("words"));
        let automaton =
            read_automaton(BufReader::new(fs::File::open(&path).unwrap())).unwrap();

        // Write the automaton and read it again.
        let mut written = Vec::new();
        match &automaton {
            ParsedAutomaton::Dfa(dfa) => write_dfa(dfa, &mut written).unwrap(),
            ParsedAutomaton::Nfa(nfa) => write_nfa(nfa, &mut written).unwrap(),
            ParsedAutomaton::Enfa(enfa) => write_enfa(enfa, &mut written).unwrap(),
        }
        let reread: ParsedAutomaton = String::from_utf8(written).unwrap().parse().unwrap();
        assert_eq!(reread, automaton, "{}", name);

        match &automaton {
            ParsedAutomaton::Dfa(dfa) => check_dfa(dfa, &words, &name),
            ParsedAutomaton::Nfa(nfa) => {
                for (word, expected) in &words {
                    assert_eq!(nfa.accepts(word).unwrap(), *expected, "{} {:?}", name, word);
                }
                check_dfa(&nfa.to_dfa(), &words, &name);
            }
            ParsedAutomaton::Enfa(enfa) => {
                for (word, expected) in &words {
                    assert_eq!(enfa.accepts(word).unwrap(), *expected, "{} {:?}", name, word);
                }
                check_dfa(&enfa.to_dfa(), &words, &name);
            }
        }
        count += 1;
    }
    assert_eq!(count, 3);
}
