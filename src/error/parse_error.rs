use thiserror::Error;

/// Represents all errors that can occur while tokenizing an expression,
/// checking its structure, or reading value records.
///
/// Expression errors carry the byte `position` of the offending token in the
/// expression text. Record errors carry the 1-based `line` of the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot appear where it was found.
    #[error("Error at position {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token in the expression.
        position: usize,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("Error at position {position}: Literal is too large.")]
    LiteralTooLarge {
        /// Byte offset of the literal in the expression.
        position: usize,
    },
    /// A `)` or `]` was found with no matching opening delimiter.
    #[error("Error at position {position}: Unmatched closing '{delimiter}'.")]
    UnmatchedClosing {
        /// The closing delimiter that was found.
        delimiter: char,
        /// Byte offset of the delimiter in the expression.
        position:  usize,
    },
    /// The expression ended while a group was still open.
    #[error("Error at position {position}: Expected closing '{expected}' but none found.")]
    UnclosedGroup {
        /// The closing delimiter that was expected.
        expected: char,
        /// Byte offset where the input ended.
        position: usize,
    },
    /// Parentheses and subscripts are nested deeper than
    /// [`MAX_NESTING`](crate::grammar::MAX_NESTING) levels.
    #[error("Error at position {position}: Groups nest deeper than {} levels.",
            crate::grammar::MAX_NESTING)]
    NestingTooDeep {
        /// Byte offset of the opening delimiter that exceeded the limit.
        position: usize,
    },
    /// An operand was expected (at the start of a group or after an
    /// operator) but something else was found.
    #[error("Error at position {position}: Expected a number, variable or group.")]
    ExpectedOperand {
        /// Byte offset where the operand was expected.
        position: usize,
    },
    /// Two operands followed each other without an operator in between.
    #[error("Error at position {position}: Expected an operator before {token}.")]
    ExpectedOperator {
        /// The token found instead of an operator.
        token:    String,
        /// Byte offset of that token.
        position: usize,
    },
    /// A group, subscript or the whole expression contains no operands.
    #[error("Error at position {position}: Empty expression.")]
    EmptyExpression {
        /// Byte offset of the end of the empty group.
        position: usize,
    },
    /// A value record does not have the `name value` or
    /// `name size (index,value) ...` shape.
    #[error("Error on line {line}: Invalid value record: {details}.")]
    InvalidRecord {
        /// What was wrong with the record.
        details: String,
        /// The record line where the error occurred.
        line:    usize,
    },
    /// An array record declared a negative size.
    #[error("Error on line {line}: Array '{name}' cannot have negative size {size}.")]
    NegativeArraySize {
        /// The array name.
        name: String,
        /// The declared size.
        size: i64,
        /// The record line where the error occurred.
        line: usize,
    },
    /// An `(index,value)` pair wrote outside the declared array size.
    #[error("Error on line {line}: Index {index} is outside array '{name}' of size {size}.")]
    RecordIndexOutOfRange {
        /// The array name.
        name:  String,
        /// The index found in the pair.
        index: i64,
        /// The declared size.
        size:  usize,
        /// The record line where the error occurred.
        line:  usize,
    },
}
