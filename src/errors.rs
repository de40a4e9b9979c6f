use thiserror::Error;

/// The result type for the `automata` crate.
pub type Result<T> = std::result::Result<T, AutomataError>;

/// The error type for the `automata` crate.
#[derive(Error, Debug)]
pub struct AutomataError {
    /// The source of the error.
    pub source: Box<AutomataErrorKind>,
}

impl AutomataError {
    /// Create a new `AutomataError`.
    pub fn new(kind: AutomataErrorKind) -> Self {
        AutomataError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &AutomataErrorKind {
        &self.source
    }
}

impl std::fmt::Display for AutomataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum AutomataErrorKind {
    /// The start state is not part of the declared states.
    #[error("Start state {0} is not a declared state")]
    UnknownStartState(String),

    /// An accepting state is not part of the declared states.
    #[error("Accepting state {0} is not a declared state")]
    UnknownAcceptingState(String),

    /// A transition refers to a state that is not part of the declared states.
    #[error("Transition refers to undeclared state {0}")]
    UnknownTransitionState(String),

    /// A transition key uses a symbol that is not part of the declared alphabet.
    #[error("Transition uses undeclared symbol {0}")]
    UnknownSymbol(String),

    /// A word contains a symbol that is not part of the alphabet.
    #[error("Symbol {0} is not in the alphabet")]
    SymbolNotInAlphabet(String),

    /// A DFA has no transition for the given state and symbol.
    #[error("No transition defined for state {state} on symbol {symbol}")]
    UndefinedTransition {
        /// The source state.
        state: String,
        /// The symbol.
        symbol: String,
    },

    /// A renaming maps two distinct states or symbols to the same new label.
    #[error("Renaming is not injective: {0}")]
    NonInjectiveRename(String),

    /// An error occurred during the parsing of the regex syntax.
    #[error(transparent)]
    RegexSyntaxError(#[from] ParseError),

    /// The textual automaton description is malformed.
    #[error("Format error in line {line}: {message}")]
    FormatError {
        /// The 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A std::io error occurred.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl From<ParseError> for AutomataError {
    fn from(error: ParseError) -> Self {
        AutomataError::new(AutomataErrorKind::RegexSyntaxError(error))
    }
}

impl From<std::io::Error> for AutomataError {
    fn from(error: std::io::Error) -> Self {
        AutomataError::new(AutomataErrorKind::IoError(error))
    }
}

impl From<AutomataErrorKind> for AutomataError {
    fn from(kind: AutomataErrorKind) -> Self {
        AutomataError::new(kind)
    }
}

/// An error that occurred while parsing a regular expression.
/// It carries the input and the offending position so the error can be displayed with a caret
/// below the character that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// The character position (not byte offset) of the offending character.
    pub position: usize,
    /// The complete input that was parsed.
    pub input: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "regex parse error:")?;
        writeln!(f, "    {}", self.input)?;
        writeln!(f, "    {}^", " ".repeat(self.position))?;
        write!(f, "error: {}", self.kind)
    }
}

/// The kinds of regex parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A backslash was followed by something other than `e` or `p`.
    #[error("unrecognized escape sequence '\\{0}'")]
    UnrecognizedEscape(char),

    /// A backslash was the last character of the input.
    #[error("incomplete escape sequence")]
    IncompleteEscape,

    /// An opening parenthesis has no matching closing parenthesis.
    #[error("unclosed group")]
    UnclosedParenthesis,

    /// A closing parenthesis has no matching opening parenthesis.
    #[error("unopened group")]
    UnopenedParenthesis,

    /// A character appeared where it cannot start or continue an expression.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// The input ended where an expression was expected.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
