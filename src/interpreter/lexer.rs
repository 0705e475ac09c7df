use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in an expression.
///
/// Every delimiter character (` `, `\t`, `*`, `+`, `-`, `/`, `(`, `)`, `[`,
/// `]`) becomes its own token, including whitespace.
/// Everything between delimiters is a single maximal run that is either an
/// integer literal or an identifier.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer, priority = 3)]
    Integer(i64),
    /// Identifier tokens; any other run of non-delimiter characters, such as
    /// `x`, `arr` or `2x`.
    #[regex(r"[^ \t*+\-/()\[\]]+", |lex| lex.slice().to_string(), priority = 1, allow_greedy = true)]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// A single space or tab. Kept in the stream; the evaluator ignores it.
    #[regex(r"[ \t]")]
    Space,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Space => write!(f, " "),
        }
    }
}

/// Splits expression text into tokens paired with their byte offsets.
///
/// Each call starts a fresh token stream, so the same text can be tokenized
/// any number of times.
///
/// # Errors
/// Returns `LiteralTooLarge` for a digit run that does not fit in an `i64`.
///
/// # Example
/// ```
/// use symexpr::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("a[i] * 2").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
/// assert_eq!(kinds,
///            vec![Token::Identifier("a".into()),
///                 Token::LBracket,
///                 Token::Identifier("i".into()),
///                 Token::RBracket,
///                 Token::Space,
///                 Token::Star,
///                 Token::Space,
///                 Token::Integer(2)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let position = lexer.span().start;
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) if lexer.slice().bytes().all(|b| b.is_ascii_digit()) => {
                return Err(ParseError::LiteralTooLarge { position });
            },
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         position });
            },
        }
    }

    Ok(tokens)
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if it fits.
/// - `None`: If the literal overflows.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
