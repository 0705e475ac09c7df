use std::{iter::Peekable, slice};

use crate::{
    error::{Error, ParseError, RuntimeError},
    grammar::{BinaryOperator, Group, MAX_NESTING},
    interpreter::{evaluator::span::FlatSpan, lexer::Token, symbols::SymbolTable},
    util::num::{f64_to_subscript, i64_to_f64},
};

/// Result type used by the evaluator.
///
/// Evaluation fails either on a malformed expression (`Error::Parse`) or on
/// a lookup that cannot be satisfied (`Error::Runtime`).
pub type EvalResult<T> = Result<T, Error>;

type TokenIter<'t> = Peekable<slice::Iter<'t, (Token, usize)>>;

/// Walks a token stream and computes its value.
///
/// The evaluator only reads the symbol table. Everything it needs while
/// walking lives on the stack of the current call, so one table can back
/// any number of concurrent evaluations.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    symbols: &'a SymbolTable,
    end:     usize,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over `symbols`.
    ///
    /// # Parameters
    /// - `symbols`: Table the identifiers are resolved against.
    /// - `end`: Length of the expression text, reported as the position of
    ///   errors found at end of input.
    #[must_use]
    pub const fn new(symbols: &'a SymbolTable, end: usize) -> Self {
        Self { symbols, end }
    }

    /// Evaluates a complete token stream.
    ///
    /// # Errors
    /// - `ParseError` for unbalanced delimiters, missing operands or
    ///   operators, and empty groups.
    /// - `RuntimeError` for unknown identifiers, unallocated arrays and
    ///   subscripts outside the allocated length.
    ///
    /// # Example
    /// ```
    /// use symexpr::interpreter::{
    ///     evaluator::core::Evaluator, lexer::tokenize, symbols::SymbolTable,
    /// };
    ///
    /// let tokens = tokenize("(2+3)*4").unwrap();
    /// let table = SymbolTable::discover(&tokens);
    /// let value = Evaluator::new(&table, 7).evaluate(&tokens).unwrap();
    /// assert_eq!(value, 20.0);
    /// ```
    pub fn evaluate(&self, tokens: &[(Token, usize)]) -> EvalResult<f64> {
        let mut tokens = tokens.iter().peekable();
        self.eval_group(&mut tokens, Group::TopLevel, 0)
    }

    /// Evaluates tokens up to and including the terminator of `group`.
    ///
    /// Operands and operators are collected into a [`FlatSpan`]. An opening
    /// parenthesis or subscript recurses with the matching group, and its
    /// result becomes one operand of the current span.
    ///
    /// `depth` counts the groups enclosing this one; the top level is `0`.
    fn eval_group(&self,
                  tokens: &mut TokenIter<'_>,
                  group: Group,
                  depth: usize)
                  -> EvalResult<f64> {
        let mut span = FlatSpan::new();

        loop {
            let Some((token, position)) = tokens.next() else {
                return match group.closing() {
                    Some(expected) => Err(ParseError::UnclosedGroup { expected,
                                                                      position: self.end }.into()),
                    None => Ok(span.reduce(self.end)?),
                };
            };
            let position = *position;

            match token {
                Token::Space => {},
                Token::Integer(n) => span.push_operand(i64_to_f64(*n), token, position)?,
                Token::Identifier(name) => {
                    let value = if let Some(&&(Token::LBracket, bracket)) = tokens.peek() {
                        let depth = nested(depth, bracket)?;
                        tokens.next();
                        self.eval_subscript(tokens, name, position, depth)?
                    } else {
                        self.scalar_value(name, position)?
                    };
                    span.push_operand(value, token, position)?;
                },
                Token::LParen => {
                    let value = self.eval_group(tokens, Group::Paren, nested(depth, position)?)?;
                    span.push_operand(value, token, position)?;
                },
                Token::RParen | Token::RBracket => {
                    let delimiter = if *token == Token::RParen { ')' } else { ']' };
                    if group.closing() == Some(delimiter) {
                        return Ok(span.reduce(position)?);
                    }
                    return Err(ParseError::UnmatchedClosing { delimiter, position }.into());
                },
                Token::LBracket => {
                    return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                             position }.into());
                },
                Token::Plus => span.push_operator(BinaryOperator::Add, position)?,
                Token::Minus => span.push_operator(BinaryOperator::Sub, position)?,
                Token::Star => span.push_operator(BinaryOperator::Mul, position)?,
                Token::Slash => span.push_operator(BinaryOperator::Div, position)?,
            }
        }
    }

    /// Evaluates the subscript following `name[` and reads that element.
    ///
    /// The subscript is truncated toward zero before indexing.
    fn eval_subscript(&self,
                      tokens: &mut TokenIter<'_>,
                      name: &str,
                      position: usize,
                      depth: usize)
                      -> EvalResult<f64> {
        let Some(array) = self.symbols.array(name) else {
            return Err(self.unresolved(name, position).into());
        };
        let subscript = self.eval_group(tokens, Group::Subscript, depth)?;

        let values = array.values
                          .as_ref()
                          .ok_or_else(|| RuntimeError::UnallocatedArray { name: name.to_string(),
                                                                          position })?;
        let index = f64_to_subscript(subscript).ok_or_else(|| {
                        RuntimeError::InvalidIndex { name: name.to_string(),
                                                     value: subscript.to_string(),
                                                     position }
                    })?;

        let value = usize::try_from(index).ok()
                                          .and_then(|i| values.get(i))
                                          .ok_or_else(|| RuntimeError::IndexOutOfBounds {
                                              name: name.to_string(),
                                              len: values.len(),
                                              found: index,
                                              position,
                                          })?;

        Ok(i64_to_f64(*value))
    }

    fn scalar_value(&self, name: &str, position: usize) -> EvalResult<f64> {
        match self.symbols.scalar(name) {
            Some(scalar) => Ok(i64_to_f64(scalar.value)),
            None => Err(self.unresolved(name, position).into()),
        }
    }

    /// Explains why `name` did not resolve as the kind it was used as.
    fn unresolved(&self, name: &str, position: usize) -> RuntimeError {
        let name = name.to_string();
        if self.symbols.array(&name).is_some() {
            RuntimeError::MissingSubscript { name, position }
        } else if self.symbols.scalar(&name).is_some() {
            RuntimeError::ScalarSubscripted { name, position }
        } else {
            RuntimeError::UnknownVariable { name, position }
        }
    }
}

/// Returns the depth of a group opened at `position` inside one at `depth`.
fn nested(depth: usize, position: usize) -> Result<usize, ParseError> {
    if depth >= MAX_NESTING {
        return Err(ParseError::NestingTooDeep { position });
    }
    Ok(depth + 1)
}
