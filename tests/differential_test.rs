// Differential tests: every conversion must preserve the language, checked on all words up to a
// bounded length and against the `regex` crate.
// Run with `cargo test --test differential_test`

use automata::{Automaton, Regex};
use itertools::Itertools;

const MAX_LEN: usize = 6;

// Patterns whose minimal DFAs are small enough that two different languages always differ on a
// word of at most MAX_LEN symbols.
const PATTERNS: &[&str] = &[
    "a*",
    "\\e+aa*",
    "(a+b)*",
    "(a*b*)*",
    "a(ba)*",
    "(ab)*a",
    "ab+ba",
    "ba+ab",
    "a*b",
    "(a+b)*b",
    "b+\\e",
    "\\p",
];

fn words(alphabet: &[char], max_len: usize) -> Vec<Vec<char>> {
    std::iter::once(Vec::new())
        .chain((1..=max_len).flat_map(|len| {
            itertools::repeat_n(alphabet.iter().copied(), len).multi_cartesian_product()
        }))
        .collect()
}

// Translate the syntax into the syntax of the `regex` crate.
fn to_regex_crate_syntax(pattern: &str) -> String {
    let mut translated = String::from("^(?:");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '+' => translated.push('|'),
            '(' => translated.push_str("(?:"),
            '\\' => match chars.next() {
                Some('e') => translated.push_str("(?:)"),
                Some('p') => translated.push_str("[a&&b]"),
                other => panic!("Unexpected escape {:?}", other),
            },
            c => translated.push(c),
        }
    }
    translated.push_str(")$");
    translated
}

// Words with symbols outside of the alphabet are rejected instead of failing.
fn dfa_accepts<A: Automaton<char>>(automaton: &A, word: &[char]) -> bool {
    word.iter().all(|c| automaton.alphabet().contains(c)) && automaton.accepts(word).unwrap()
}

#[test]
fn conversions_preserve_language() {
    let _ = env_logger::builder().is_test(true).try_init();
    let all_words = words(&['a', 'b'], MAX_LEN);
    for pattern in PATTERNS {
        let regex: Regex<char> = pattern.parse().unwrap();
        let reference = regex::Regex::new(&to_regex_crate_syntax(pattern)).unwrap();
        let enfa = regex.to_enfa();
        let dfa = regex.to_dfa();
        let minimal = regex.to_minimal_dfa();
        for w in &all_words {
            let expected = reference.is_match(&w.iter().collect::<String>());
            assert_eq!(dfa_accepts(&enfa, w), expected, "ENFA {} {:?}", pattern, w);
            assert_eq!(dfa_accepts(&dfa, w), expected, "DFA {} {:?}", pattern, w);
            assert_eq!(
                dfa_accepts(&minimal, w),
                expected,
                "minimal DFA {} {:?}",
                pattern,
                w
            );
        }
    }
}

#[test]
fn regex_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let all_words = words(&['a', 'b'], MAX_LEN);
    for pattern in PATTERNS {
        let regex: Regex<char> = pattern.parse().unwrap();
        let minimal = regex.to_minimal_dfa();
        let reduced = minimal.to_regex();
        let reduced_dfa = reduced.to_dfa();
        assert!(
            reduced_dfa.equivalent_to(&minimal),
            "{} reduced to {}",
            pattern,
            reduced
        );
        // The reduced regex also survives its own string form.
        let reparsed: Regex<char> = reduced.to_string().parse().unwrap();
        let reparsed_dfa = reparsed.to_dfa();
        for w in &all_words {
            assert_eq!(
                dfa_accepts(&reparsed_dfa, w),
                dfa_accepts(&minimal, w),
                "{} reduced to {} {:?}",
                pattern,
                reduced,
                w
            );
        }
    }
}

#[test]
fn equivalence_agrees_with_bounded_words() {
    let _ = env_logger::builder().is_test(true).try_init();
    let all_words = words(&['a', 'b'], MAX_LEN);
    let dfas: Vec<_> = PATTERNS
        .iter()
        .map(|pattern| {
            let regex: Regex<char> = pattern.parse().unwrap();
            (pattern, regex.to_dfa())
        })
        .collect();
    for ((left_pattern, left), (right_pattern, right)) in dfas.iter().tuple_combinations() {
        let same_words = all_words
            .iter()
            .all(|w| dfa_accepts(left, w) == dfa_accepts(right, w));
        assert_eq!(
            left.equivalent_to(right),
            same_words,
            "{} vs {}",
            left_pattern,
            right_pattern
        );
    }
    // "(a*b*)*" and "(a+b)*" describe the same language.
    assert!(dfas[2].1.equivalent_to(&dfas[3].1));
}
