/// Represents a binary operator.
///
/// Only the four arithmetic operators exist in the expression language.
/// `*` and `/` bind tighter than `+` and `-`; operators of equal precedence
/// associate to the left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl BinaryOperator {
    /// Returns `true` for `*` and `/`, the operators collapsed in the first
    /// reduction pass.
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    /// Applies the operator to two operands.
    ///
    /// Division follows IEEE-754 semantics, so dividing by zero yields an
    /// infinity or NaN instead of an error.
    ///
    /// # Example
    /// ```
    /// use symexpr::grammar::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Sub.apply(7.0, 2.0), 5.0);
    /// assert!(BinaryOperator::Div.apply(1.0, 0.0).is_infinite());
    /// assert!(BinaryOperator::Div.apply(0.0, 0.0).is_nan());
    /// ```
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
        }
    }
}

/// Deepest nesting of parentheses and subscripts an expression may use.
///
/// The evaluator recurses once per level, so the limit keeps deeply nested
/// input from exhausting the stack.
pub const MAX_NESTING: usize = 256;

/// The three productions the evaluator recurses over.
///
/// Each production is a flat span of operands and operators that ends at
/// its own terminator.
///
/// ```text
///     expression := span EOF
///     group      := "(" span ")"
///     subscript  := identifier "[" span "]"
///     span       := operand (operator operand)*
///     operand    := integer | identifier | group | subscript
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Group {
    /// The whole expression, terminated by end of input.
    TopLevel,
    /// A parenthesized group, terminated by `)`.
    Paren,
    /// An array subscript, terminated by `]`.
    Subscript,
}

impl Group {
    /// The delimiter that closes this group, if any.
    #[must_use]
    pub const fn closing(self) -> Option<char> {
        match self {
            Self::TopLevel => None,
            Self::Paren => Some(')'),
            Self::Subscript => Some(']'),
        }
    }
}
