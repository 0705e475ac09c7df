use log::debug;

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        lexer::tokenize,
        symbols::{ArraySymbol, ScalarSymbol, SymbolTable},
    },
};

/// An expression together with the symbols it names.
///
/// The lifecycle is: construct from text, [`build_symbols`], load values
/// with [`load_symbol_values`], then [`evaluate`] as often as needed.
/// Each `Expression` owns its own symbol table; separate expressions never
/// share values.
///
/// [`build_symbols`]: Self::build_symbols
/// [`load_symbol_values`]: Self::load_symbol_values
/// [`evaluate`]: Self::evaluate
///
/// # Example
/// ```
/// use symexpr::interpreter::expression::Expression;
///
/// let mut expr = Expression::new("a[b[0]+1] * x");
/// expr.build_symbols().unwrap();
/// expr.load_symbol_text("x 2\nb 2 (0,1) (1,9)\na 3 (2,42)").unwrap();
/// assert_eq!(expr.evaluate().unwrap(), 84.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    source:  String,
    symbols: SymbolTable,
}

impl Expression {
    /// Creates an expression with an empty symbol table.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self { source:  source.into(),
               symbols: SymbolTable::new(), }
    }

    /// The expression text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Discovers the scalars and arrays named in the expression.
    ///
    /// Rebuilding discards previously loaded values; every symbol starts at
    /// zero and every array starts unallocated.
    ///
    /// # Errors
    /// Returns a `ParseError` if the expression cannot be tokenized.
    pub fn build_symbols(&mut self) -> Result<(), ParseError> {
        let tokens = tokenize(&self.source)?;
        self.symbols = SymbolTable::discover(&tokens);
        debug!("'{}' names {} scalar(s) and {} array(s)",
               self.source,
               self.symbols.scalars().len(),
               self.symbols.arrays().len());
        Ok(())
    }

    /// Loads values from record lines. See [`SymbolTable::load`].
    ///
    /// # Errors
    /// Returns the first malformed record.
    pub fn load_symbol_values<I, S>(&mut self, records: I) -> Result<(), ParseError>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        self.symbols.load(records)
    }

    /// Loads values from text holding one record per line.
    ///
    /// # Errors
    /// Returns the first malformed record.
    pub fn load_symbol_text(&mut self, text: &str) -> Result<(), ParseError> {
        self.load_symbol_values(text.lines())
    }

    /// Evaluates the expression with the values currently loaded.
    ///
    /// The text is tokenized again on every call and nothing is cached, so
    /// repeated calls give the same result until values change.
    ///
    /// # Errors
    /// Returns `Error::Parse` for a malformed expression and `Error::Runtime`
    /// for a subscript that cannot be resolved.
    pub fn evaluate(&self) -> EvalResult<f64> {
        let tokens = tokenize(&self.source)?;
        let value = Evaluator::new(&self.symbols, self.source.len()).evaluate(&tokens)?;
        debug!("'{}' evaluated to {value}", self.source);
        Ok(value)
    }

    /// The symbol table.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Scalar symbols in first-seen order.
    #[must_use]
    pub fn scalars(&self) -> &[ScalarSymbol] {
        self.symbols.scalars()
    }

    /// Array symbols in first-seen order.
    #[must_use]
    pub fn arrays(&self) -> &[ArraySymbol] {
        self.symbols.arrays()
    }

    /// One line per symbol, scalars first. See [`SymbolTable::listing`].
    #[must_use]
    pub fn symbol_listing(&self) -> String {
        self.symbols.listing()
    }
}
