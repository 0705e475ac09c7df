/// The evaluator module computes the value of an expression.
///
/// The evaluator walks the token stream left to right, recursing into
/// parenthesized groups and array subscripts, and reduces each nesting level
/// with the usual precedence of `*` and `/` over `+` and `-`.
///
/// # Responsibilities
/// - Resolves scalar and array identifiers against the symbol table.
/// - Reports malformed nesting and out-of-range subscripts.
/// - Follows float semantics for division by zero.
pub mod evaluator;
/// The expression module ties the phases together.
///
/// An `Expression` owns its text and its symbol table and exposes the
/// build, load and evaluate steps in order.
pub mod expression;
/// The lexer module tokenizes expression text.
///
/// Every delimiter is kept as a token of its own and the runs between them
/// become integer literals or identifiers. Whitespace tokens survive
/// tokenization and are ignored by the evaluator.
pub mod lexer;
/// The records module parses value record lines.
///
/// A record is either `name value` or `name size (index,value) ...`. This is
/// the only input format besides the expression itself.
pub mod records;
/// The symbols module holds the scalar and array variables of an expression.
///
/// Symbols are discovered from the token stream, deduplicated by name, and
/// filled in from value records.
///
/// # Responsibilities
/// - Classifies identifiers as scalars or arrays by one token of lookahead.
/// - Applies value records and ignores records for unknown names.
/// - Renders the diagnostic symbol listing.
pub mod symbols;
