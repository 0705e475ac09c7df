use crate::{error::ParseError, grammar::BinaryOperator, interpreter::lexer::Token};

/// Operands and operators of one nesting level, in source order.
///
/// Nested groups and subscripts are already reduced to single operands by
/// the time they are pushed here. A well-formed span alternates operand,
/// operator, operand, ..., operand.
///
/// Operands are `f64`, so every integer up to `2^53` in magnitude, and every
/// sum or product that stays in that range, is exact.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlatSpan {
    operands:  Vec<f64>,
    operators: Vec<BinaryOperator>,
}

impl FlatSpan {
    /// Creates an empty span.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operand.
    ///
    /// # Errors
    /// Returns `ExpectedOperator` when the previous item was also an
    /// operand.
    pub fn push_operand(&mut self,
                        value: f64,
                        token: &Token,
                        position: usize)
                        -> Result<(), ParseError> {
        if self.operands.len() != self.operators.len() {
            return Err(ParseError::ExpectedOperator { token: token.to_string(),
                                                      position });
        }
        self.operands.push(value);
        Ok(())
    }

    /// Appends an operator.
    ///
    /// # Errors
    /// Returns `ExpectedOperand` when the span is empty or already ends in
    /// an operator. There is no unary minus.
    pub fn push_operator(&mut self, op: BinaryOperator, position: usize) -> Result<(), ParseError> {
        if self.operands.len() != self.operators.len() + 1 {
            return Err(ParseError::ExpectedOperand { position });
        }
        self.operators.push(op);
        Ok(())
    }

    /// Reduces the span to a single value.
    ///
    /// The first pass folds every `*` and `/` into the operand on its left,
    /// leaving only `+` and `-` between the survivors. The second pass folds
    /// the survivors left to right. Both passes use plain `f64` arithmetic.
    ///
    /// # Parameters
    /// - `position`: Byte offset of the span's terminator, for errors.
    ///
    /// # Errors
    /// Returns `EmptyExpression` for a span without operands and
    /// `ExpectedOperand` for one ending in an operator.
    ///
    /// # Example
    /// ```
    /// use symexpr::{
    ///     grammar::BinaryOperator,
    ///     interpreter::{evaluator::span::FlatSpan, lexer::Token},
    /// };
    ///
    /// // 2 + 3 * 4 - 6 / 3
    /// let mut span = FlatSpan::new();
    /// span.push_operand(2.0, &Token::Integer(2), 0).unwrap();
    /// span.push_operator(BinaryOperator::Add, 1).unwrap();
    /// span.push_operand(3.0, &Token::Integer(3), 2).unwrap();
    /// span.push_operator(BinaryOperator::Mul, 3).unwrap();
    /// span.push_operand(4.0, &Token::Integer(4), 4).unwrap();
    /// span.push_operator(BinaryOperator::Sub, 5).unwrap();
    /// span.push_operand(6.0, &Token::Integer(6), 6).unwrap();
    /// span.push_operator(BinaryOperator::Div, 7).unwrap();
    /// span.push_operand(3.0, &Token::Integer(3), 8).unwrap();
    ///
    /// assert_eq!(span.reduce(9).unwrap(), 12.0);
    /// ```
    pub fn reduce(self, position: usize) -> Result<f64, ParseError> {
        let mut operands = self.operands.into_iter();
        let Some(mut acc) = operands.next() else {
            return Err(ParseError::EmptyExpression { position });
        };
        if self.operators.len() == operands.len() + 1 {
            return Err(ParseError::ExpectedOperand { position });
        }

        let mut survivors = Vec::new();
        let mut additive = Vec::new();
        for (op, value) in self.operators.into_iter().zip(operands) {
            if op.is_multiplicative() {
                acc = op.apply(acc, value);
            } else {
                survivors.push(acc);
                additive.push(op);
                acc = value;
            }
        }
        survivors.push(acc);

        let mut survivors = survivors.into_iter();
        let first = survivors.next().unwrap_or_default();
        Ok(additive.into_iter()
                   .zip(survivors)
                   .fold(first, |acc, (op, value)| op.apply(acc, value)))
    }
}
