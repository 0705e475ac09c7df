use std::fmt;

use log::{debug, trace};

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, records::Record},
};

/// A named variable holding one integer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarSymbol {
    /// The variable name, matched exactly and case-sensitively.
    pub name:  String,
    /// The current value. Zero until a value record sets it.
    pub value: i64,
}

impl ScalarSymbol {
    /// Creates a scalar with the default value of zero.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name:  name.into(),
               value: 0, }
    }
}

impl fmt::Display for ScalarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A named, fixed-length sequence of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySymbol {
    /// The variable name, matched exactly and case-sensitively.
    pub name:   String,
    /// The allocated values, or `None` until a value record declares the
    /// array's size.
    pub values: Option<Vec<i64>>,
}

impl ArraySymbol {
    /// Creates an unallocated array.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name:   name.into(),
               values: None, }
    }
}

impl fmt::Display for ArraySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=[", self.name)?;
        if let Some(values) = &self.values {
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{v}")?;
            }
        }
        write!(f, "]")
    }
}

/// The scalars and arrays named by one expression.
///
/// Symbols are kept in order of first appearance. A name appears in at most
/// one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    scalars: Vec<ScalarSymbol>,
    arrays:  Vec<ArraySymbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers every variable in a token stream.
    ///
    /// An identifier immediately followed by `[` is an array; any other
    /// identifier is a scalar. Integer literals and delimiters are not
    /// symbols. Each name is registered once, with the kind of its first
    /// occurrence; later occurrences never reclassify it.
    ///
    /// # Example
    /// ```
    /// use symexpr::interpreter::{lexer::tokenize, symbols::SymbolTable};
    ///
    /// let table = SymbolTable::discover(&tokenize("a+a*b").unwrap());
    /// let names: Vec<&str> = table.scalars().iter().map(|s| s.name.as_str()).collect();
    /// assert_eq!(names, ["a", "b"]);
    /// assert!(table.arrays().is_empty());
    /// ```
    #[must_use]
    pub fn discover(tokens: &[(Token, usize)]) -> Self {
        let mut table = Self::new();

        for (i, (token, _)) in tokens.iter().enumerate() {
            let Token::Identifier(name) = token else {
                continue;
            };

            if table.contains(name) {
                continue;
            }

            if matches!(tokens.get(i + 1), Some((Token::LBracket, _))) {
                debug!("discovered array symbol '{name}'");
                table.arrays.push(ArraySymbol::new(name.clone()));
            } else {
                debug!("discovered scalar symbol '{name}'");
                table.scalars.push(ScalarSymbol::new(name.clone()));
            }
        }

        table
    }

    /// All scalar symbols in first-seen order.
    #[must_use]
    pub fn scalars(&self) -> &[ScalarSymbol] {
        &self.scalars
    }

    /// All array symbols in first-seen order.
    #[must_use]
    pub fn arrays(&self) -> &[ArraySymbol] {
        &self.arrays
    }

    /// Looks up a scalar by exact name.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&ScalarSymbol> {
        self.scalars.iter().find(|s| s.name == name)
    }

    /// Looks up an array by exact name.
    #[must_use]
    pub fn array(&self, name: &str) -> Option<&ArraySymbol> {
        self.arrays.iter().find(|a| a.name == name)
    }

    /// Returns `true` if `name` is a scalar or an array in this table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.scalar(name).is_some() || self.array(name).is_some()
    }

    /// Loads symbol values from value records, one record per line.
    ///
    /// Blank lines and records naming unknown symbols are skipped. Records
    /// are applied in order, so a later record for the same symbol wins.
    ///
    /// # Errors
    /// Returns the first malformed record as a `ParseError` carrying its
    /// 1-based line number. Records before it have already been applied.
    ///
    /// # Example
    /// ```
    /// use symexpr::interpreter::{lexer::tokenize, symbols::SymbolTable};
    ///
    /// let mut table = SymbolTable::discover(&tokenize("x + arr[1]").unwrap());
    /// table.load(["x 5", "arr 3 (0,10) (2,7)", "unused 9"]).unwrap();
    ///
    /// assert_eq!(table.scalar("x").unwrap().value, 5);
    /// assert_eq!(table.array("arr").unwrap().values, Some(vec![10, 0, 7]));
    /// ```
    pub fn load<I, S>(&mut self, records: I) -> Result<(), ParseError>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        for (i, text) in records.into_iter().enumerate() {
            let line = i + 1;
            let text = text.as_ref();

            let Some(name) = Record::name(text) else {
                continue;
            };
            if !self.contains(name) {
                trace!("skipping record for unknown symbol '{name}' on line {line}");
                continue;
            }

            let record = Record::parse(text, line)?;
            self.apply(&record, line)?;
        }

        Ok(())
    }

    /// Applies one parsed record to a known symbol.
    ///
    /// A scalar takes `name value` only. An array record allocates a fresh
    /// zero-filled sequence of the declared size, so `name size` without
    /// pairs allocates an all-zero array.
    fn apply(&mut self, record: &Record, line: usize) -> Result<(), ParseError> {
        if let Some(scalar) = self.scalars.iter_mut().find(|s| s.name == record.name) {
            if !record.pairs.is_empty() {
                return Err(ParseError::InvalidRecord { details: format!("scalar '{}' cannot take (index,value) pairs",
                                                                        record.name),
                                                       line });
            }
            scalar.value = record.number;
            debug!("loaded {scalar}");
            return Ok(());
        }

        let Some(array) = self.arrays.iter_mut().find(|a| a.name == record.name) else {
            trace!("skipping record for unknown symbol '{}' on line {line}", record.name);
            return Ok(());
        };

        let size = usize::try_from(record.number).map_err(|_| ParseError::NegativeArraySize {
            name: record.name.clone(),
            size: record.number,
            line,
        })?;

        let mut values = vec![0; size];
        for &(index, value) in &record.pairs {
            let slot = usize::try_from(index).ok()
                                             .and_then(|i| values.get_mut(i))
                                             .ok_or_else(|| ParseError::RecordIndexOutOfRange {
                                                 name: record.name.clone(),
                                                 index,
                                                 size,
                                                 line,
                                             })?;
            *slot = value;
        }
        array.values = Some(values);
        debug!("loaded {array}");

        Ok(())
    }

    /// Renders every symbol on its own line, scalars first, as
    /// `name=value` and `name=[v0,v1,...]`.
    #[must_use]
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for scalar in &self.scalars {
            out.push_str(&scalar.to_string());
            out.push('\n');
        }
        for array in &self.arrays {
            out.push_str(&array.to_string());
            out.push('\n');
        }
        out
    }
}
