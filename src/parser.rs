//! This module contains the parser for the regex syntax.
//! The parser is a recursive-descent parser for the grammar
//!
//! ```text
//! Regex  := Term ('+' Regex)?
//! Term   := Factor Term?
//! Factor := Atom '*'?
//! Atom   := Literal | '\e' | '\p' | '(' Regex ')'
//! ```
//!
//! Closure binds tightest, then concatenation, then union. Concatenations and unions are
//! right-leaning. Every character that is not one of `+`, `*`, `(`, `)` or `\` is a literal.

use std::time::Instant;

use log::trace;

use crate::{ParseError, ParseErrorKind, Regex, Result};

/// Parse the regex syntax into a regex AST.
/// # Arguments
/// * `input` - A string slice that holds the regex syntax.
/// # Returns
/// The regex with one node per syntactic element. No simplification is applied.
/// # Errors
/// An error is returned if the regex syntax is invalid.
/// # Limits
/// Long sequences of concatenations and unions are parsed iteratively. Only nested parentheses
/// recurse, so the nesting depth is bounded by the stack of the calling thread.
pub fn parse_regex(input: &str) -> Result<Regex<char>> {
    let now = Instant::now();
    let mut parser = RegexParser::new(input);
    let regex = parser.parse_regex()?;
    if let Some(c) = parser.peek() {
        let kind = if c == ')' {
            ParseErrorKind::UnopenedParenthesis
        } else {
            ParseErrorKind::UnexpectedCharacter(c)
        };
        return Err(parser.error_at(parser.position, kind).into());
    }
    trace!(
        "Parsing took {} microseconds.",
        now.elapsed().as_micros()
    );
    Ok(regex)
}

// Combine the operands into a right-leaning tree: a, b, c becomes a (b c).
fn right_leaning(
    first: Regex<char>,
    mut rest: Vec<Regex<char>>,
    combine: fn(Box<Regex<char>>, Box<Regex<char>>) -> Regex<char>,
) -> Regex<char> {
    let Some(mut tree) = rest.pop() else {
        return first;
    };
    while let Some(left) = rest.pop() {
        tree = combine(Box::new(left), Box::new(tree));
    }
    combine(Box::new(first), Box::new(tree))
}

struct RegexParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    position: usize,
}

impl<'a> RegexParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    fn error_at(&self, position: usize, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            position,
            input: self.input.to_string(),
        }
    }

    // Regex := Term ('+' Regex)?
    fn parse_regex(&mut self) -> std::result::Result<Regex<char>, ParseError> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();
        while self.peek() == Some('+') {
            self.next();
            rest.push(self.parse_term()?);
        }
        Ok(right_leaning(first, rest, Regex::Union))
    }

    // Term := Factor Term?
    fn parse_term(&mut self) -> std::result::Result<Regex<char>, ParseError> {
        let first = self.parse_factor()?;
        let mut rest = Vec::new();
        // These end the term. A '*' here follows a closure and is reported by the caller.
        while !matches!(self.peek(), None | Some('+') | Some(')') | Some('*')) {
            rest.push(self.parse_factor()?);
        }
        Ok(right_leaning(first, rest, Regex::Concat))
    }

    // Factor := Atom '*'?
    fn parse_factor(&mut self) -> std::result::Result<Regex<char>, ParseError> {
        let atom = self.parse_atom()?;
        if self.peek() == Some('*') {
            self.next();
            Ok(Regex::Closure(Box::new(atom)))
        } else {
            Ok(atom)
        }
    }

    // Atom := Literal | '\e' | '\p' | '(' Regex ')'
    fn parse_atom(&mut self) -> std::result::Result<Regex<char>, ParseError> {
        let start = self.position;
        match self.next() {
            None => Err(self.error_at(start, ParseErrorKind::UnexpectedEndOfInput)),
            Some('\\') => match self.next() {
                Some('e') => Ok(Regex::Epsilon),
                Some('p') => Ok(Regex::Phi),
                Some(c) => Err(self.error_at(start + 1, ParseErrorKind::UnrecognizedEscape(c))),
                None => Err(self.error_at(start, ParseErrorKind::IncompleteEscape)),
            },
            Some('(') => {
                let inner = self.parse_regex()?;
                match self.next() {
                    Some(')') => Ok(inner),
                    None => Err(self.error_at(start, ParseErrorKind::UnclosedParenthesis)),
                    Some(c) => Err(self.error_at(
                        self.position - 1,
                        ParseErrorKind::UnexpectedCharacter(c),
                    )),
                }
            }
            Some(c @ ('+' | '*' | ')')) => {
                Err(self.error_at(start, ParseErrorKind::UnexpectedCharacter(c)))
            }
            Some(c) => Ok(Regex::Literal(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AutomataErrorKind;

    fn lit(c: char) -> Box<Regex<char>> {
        Box::new(Regex::Literal(c))
    }

    fn parse_error_kind(input: &str) -> ParseErrorKind {
        match parse_regex(input).unwrap_err().kind() {
            AutomataErrorKind::RegexSyntaxError(e) => e.kind.clone(),
            other => panic!("Unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_regex("a").unwrap(), Regex::Literal('a'));
    }

    #[test]
    fn test_parse_precedence() {
        // (0+1)*1
        assert_eq!(
            parse_regex("(0+1)*1").unwrap(),
            Regex::Concat(
                Box::new(Regex::Closure(Box::new(Regex::Union(lit('0'), lit('1'))))),
                lit('1')
            )
        );
        // ab*c: the star only applies to b
        assert_eq!(
            parse_regex("ab*c").unwrap(),
            Regex::Concat(
                lit('a'),
                Box::new(Regex::Concat(
                    Box::new(Regex::Closure(lit('b'))),
                    lit('c')
                ))
            )
        );
        // a+bc: concatenation binds tighter than union
        assert_eq!(
            parse_regex("a+bc").unwrap(),
            Regex::Union(lit('a'), Box::new(Regex::Concat(lit('b'), lit('c'))))
        );
    }

    #[test]
    fn test_parse_closure_followed_by_group() {
        assert_eq!(
            parse_regex("a*(b)").unwrap(),
            Regex::Concat(Box::new(Regex::Closure(lit('a'))), lit('b'))
        );
        assert_eq!(
            parse_regex("(a)*(b)*").unwrap(),
            Regex::Concat(
                Box::new(Regex::Closure(lit('a'))),
                Box::new(Regex::Closure(lit('b')))
            )
        );
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(
            parse_regex(r"\e+\p").unwrap(),
            Regex::Union(Box::new(Regex::Epsilon), Box::new(Regex::Phi))
        );
        assert_eq!(
            parse_error_kind(r"a\x"),
            ParseErrorKind::UnrecognizedEscape('x')
        );
        assert_eq!(parse_error_kind(r"a\"), ParseErrorKind::IncompleteEscape);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_error_kind("(ab"), ParseErrorKind::UnclosedParenthesis);
        assert_eq!(parse_error_kind("ab)"), ParseErrorKind::UnopenedParenthesis);
        assert_eq!(parse_error_kind(""), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(parse_error_kind("a+"), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(
            parse_error_kind("()"),
            ParseErrorKind::UnexpectedCharacter(')')
        );
        assert_eq!(
            parse_error_kind("a**"),
            ParseErrorKind::UnexpectedCharacter('*')
        );
        assert_eq!(
            parse_error_kind("(a**)"),
            ParseErrorKind::UnexpectedCharacter('*')
        );
        assert_eq!(
            parse_error_kind("+a"),
            ParseErrorKind::UnexpectedCharacter('+')
        );
    }

    #[test]
    fn test_parse_long_input_on_small_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(|| {
                let concatenation = parse_regex(&"a".repeat(10_000)).unwrap();
                assert!(matches!(
                    &concatenation,
                    Regex::Concat(left, _) if **left == Regex::Literal('a')
                ));
                let union = parse_regex(&vec!["a"; 10_000].join("+")).unwrap();
                assert!(matches!(
                    &union,
                    Regex::Union(left, _) if **left == Regex::Literal('a')
                ));
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_parse_right_leaning() {
        assert_eq!(
            parse_regex("abc").unwrap(),
            Regex::Concat(lit('a'), Box::new(Regex::Concat(lit('b'), lit('c'))))
        );
        assert_eq!(
            parse_regex("a+b+c").unwrap(),
            Regex::Union(lit('a'), Box::new(Regex::Union(lit('b'), lit('c'))))
        );
    }

    #[test]
    fn test_parse_error_display() {
        let result = parse_regex(r"ab\q");
        assert_eq!(
            result.unwrap_err().to_string(),
            r#"regex parse error:
    ab\q
       ^
error: unrecognized escape sequence '\q'"#
        );
    }
}
