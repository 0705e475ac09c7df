use logos::Logos;

use crate::error::ParseError;

/// Tokens of a single value record line.
///
/// Whitespace separates tokens and is discarded. The parentheses and comma
/// around `(index,value)` pairs are tokens of their own.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RecordToken {
    /// A signed integer, such as `5`, `+5` or `-3`.
    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().parse::<i64>().ok(), priority = 3)]
    Integer(i64),
    /// Any other run of characters, such as a symbol name.
    #[regex(r"[^ \t\r\n\f(),]+", priority = 1, allow_greedy = true)]
    Word,
    /// `(`
    #[token("(")]
    LParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `)`
    #[token(")")]
    RParen,
}

/// A parsed value record.
///
/// `name value` has no pairs. `name size (index,value) ...` carries the size
/// in `number` and one entry per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The symbol the record assigns.
    pub name:   String,
    /// The scalar value, or the array size.
    pub number: i64,
    /// `(index, value)` pairs in the order written.
    pub pairs:  Vec<(i64, i64)>,
}

impl Record {
    /// Returns the symbol name a record line starts with, or `None` for a
    /// blank line.
    ///
    /// The name is read before anything else is validated, so a record for
    /// an unknown symbol can be skipped no matter what follows it.
    /// Names end at the same separators the record tokenizer skips.
    #[must_use]
    pub fn name(text: &str) -> Option<&str> {
        text.split(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C' | '(' | ',' | ')'))
            .find(|part| !part.is_empty())
    }

    /// Parses one record line.
    ///
    /// # Errors
    /// Returns `InvalidRecord` when the line is not `name integer` followed
    /// by zero or more `(integer,integer)` pairs, or when an integer does not
    /// fit in an `i64`.
    ///
    /// # Example
    /// ```
    /// use symexpr::interpreter::records::Record;
    ///
    /// let record = Record::parse("arr 5 (0,3) (4, -1)", 1).unwrap();
    /// assert_eq!(record.name, "arr");
    /// assert_eq!(record.number, 5);
    /// assert_eq!(record.pairs, vec![(0, 3), (4, -1)]);
    ///
    /// assert!(Record::parse("x five", 2).is_err());
    /// ```
    pub fn parse(text: &str, line: usize) -> Result<Self, ParseError> {
        let mut lexer = RecordToken::lexer(text);
        let mut next = || -> Result<Option<(RecordToken, String)>, ParseError> {
            match lexer.next() {
                Some(Ok(tok)) => Ok(Some((tok, lexer.slice().to_string()))),
                Some(Err(())) => Err(invalid(format!("'{}' is not a valid integer", lexer.slice()),
                                             line)),
                None => Ok(None),
            }
        };

        let name = match next()? {
            Some((RecordToken::Word | RecordToken::Integer(_), slice)) => slice,
            Some((_, slice)) => return Err(invalid(format!("expected a symbol name, found '{slice}'"), line)),
            None => return Err(invalid("empty record".to_string(), line)),
        };

        let number = expect_integer(next()?, &format!("after '{name}'"), line)?;

        let mut pairs = Vec::new();
        while let Some((tok, slice)) = next()? {
            if tok != RecordToken::LParen {
                return Err(invalid(format!("expected '(' to start an (index,value) pair, found '{slice}'"),
                                   line));
            }
            let index = expect_integer(next()?, "as pair index", line)?;
            expect_punct(next()?, RecordToken::Comma, ',', line)?;
            let value = expect_integer(next()?, "as pair value", line)?;
            expect_punct(next()?, RecordToken::RParen, ')', line)?;
            pairs.push((index, value));
        }

        Ok(Self { name,
                  number,
                  pairs })
    }
}

fn invalid(details: String, line: usize) -> ParseError {
    ParseError::InvalidRecord { details, line }
}

fn expect_integer(token: Option<(RecordToken, String)>,
                  context: &str,
                  line: usize)
                  -> Result<i64, ParseError> {
    match token {
        Some((RecordToken::Integer(n), _)) => Ok(n),
        Some((_, slice)) => Err(invalid(format!("expected an integer {context}, found '{slice}'"), line)),
        None => Err(invalid(format!("expected an integer {context}, found end of line"), line)),
    }
}

fn expect_punct(token: Option<(RecordToken, String)>,
                expected: RecordToken,
                symbol: char,
                line: usize)
                -> Result<(), ParseError> {
    match token {
        Some((tok, _)) if tok == expected => Ok(()),
        Some((_, slice)) => Err(invalid(format!("expected '{symbol}', found '{slice}'"), line)),
        None => Err(invalid(format!("expected '{symbol}', found end of line"), line)),
    }
}
