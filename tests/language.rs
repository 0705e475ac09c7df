use std::{fs, path::Path, thread};

use symexpr::{
    error::{Error, ParseError, RuntimeError},
    get_result,
    grammar::MAX_NESTING,
    interpreter::{
        expression::Expression,
        lexer::{Token, tokenize},
    },
};
use walkdir::WalkDir;

#[test]
fn fixture_cases_evaluate_to_expected() {
    let mut count = 0;

    for entry in WalkDir::new("tests/fixtures").into_iter()
                                               .filter_map(Result::ok)
                                               .filter(|e| e.file_name() == "expression.txt")
    {
        let dir = entry.path().parent().unwrap_or_else(|| Path::new("."));
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
        };

        count += 1;
        let expected: f64 = read("expected.txt").trim().parse().unwrap();
        match get_result(read("expression.txt").trim(), &read("values.txt")) {
            Ok(value) => assert_eq!(value, expected, "fixture {dir:?}"),
            Err(e) => panic!("Fixture {dir:?} failed:\nError: {e}"),
        }
    }

    assert!(count > 0, "No fixtures found in tests/fixtures");
}

fn assert_eval(expression: &str, values: &str, expected: f64) {
    match get_result(expression, values) {
        Ok(value) => assert_eq!(value, expected, "'{expression}' with values {values:?}"),
        Err(e) => panic!("'{expression}' failed: {e}"),
    }
}

fn assert_constant(expression: &str, expected: f64) {
    assert_eval(expression, "", expected);
}

fn eval_err(expression: &str, values: &str) -> Error {
    match get_result(expression, values) {
        Ok(value) => panic!("'{expression}' evaluated to {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn built(expression: &str) -> Expression {
    let mut expr = Expression::new(expression);
    expr.build_symbols().unwrap();
    expr
}

fn scalar_names(expr: &Expression) -> Vec<&str> {
    expr.scalars().iter().map(|s| s.name.as_str()).collect()
}

fn array_names(expr: &Expression) -> Vec<&str> {
    expr.arrays().iter().map(|a| a.name.as_str()).collect()
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_constant("2+3*4", 14.0);
    assert_constant("(2+3)*4", 20.0);
    assert_constant("2*3+4*5", 26.0);
    assert_constant("1+2*3-4/2", 5.0);
}

#[test]
fn equal_precedence_associates_left() {
    assert_constant("10-4-3", 3.0);
    assert_constant("100/10/5", 2.0);
    assert_constant("8/4*2", 4.0);
    assert_constant("2-3+4", 3.0);
}

#[test]
fn nested_parentheses() {
    assert_constant("((1+2))*(3)", 9.0);
    assert_constant("2*(3+(4-1)*2)", 18.0);
    assert_constant("((((7))))", 7.0);
    assert_constant("(1+2)/(4-1)", 1.0);
}

#[test]
fn whitespace_is_ignored() {
    assert_constant(" 2 +\t3 ", 5.0);
    assert_constant("( 1 + 2 ) * 3", 9.0);
}

#[test]
fn arithmetic_is_double_precision() {
    assert_constant("16777217", 16_777_217.0);
    assert_constant("16777216+1", 16_777_217.0);
}

#[test]
fn division_follows_float_semantics() {
    assert_constant("7/2", 3.5);
    assert_eq!(get_result("10/0", "").unwrap(), f64::INFINITY);
    assert_eq!(get_result("0-10/0", "").unwrap(), f64::NEG_INFINITY);
    assert!(get_result("0/0", "").unwrap().is_nan());
    assert!(get_result("x/y", "x 0\ny 0").unwrap().is_nan());
}

#[test]
fn whitespace_tokens_survive_tokenizing() {
    let tokens: Vec<Token> = tokenize("a +b").unwrap().into_iter().map(|(t, _)| t).collect();
    assert_eq!(tokens,
               vec![Token::Identifier("a".into()),
                    Token::Space,
                    Token::Plus,
                    Token::Identifier("b".into())]);
}

#[test]
fn tokens_carry_byte_offsets() {
    let positions: Vec<usize> = tokenize("ab[12]").unwrap().into_iter().map(|(_, p)| p).collect();
    assert_eq!(positions, vec![0, 2, 3, 5]);
}

#[test]
fn tokenizing_is_restartable() {
    assert_eq!(tokenize("x*(y+1)").unwrap(), tokenize("x*(y+1)").unwrap());
}

#[test]
fn mixed_runs_are_identifiers() {
    let tokens = tokenize("2x").unwrap();
    assert_eq!(tokens, vec![(Token::Identifier("2x".into()), 0)]);
}

#[test]
fn oversized_literal_is_rejected() {
    assert_eq!(tokenize("1+99999999999999999999"),
               Err(ParseError::LiteralTooLarge { position: 2 }));
}

#[test]
fn discovery_deduplicates_in_first_seen_order() {
    let expr = built("a+a*b");
    assert_eq!(scalar_names(&expr), ["a", "b"]);
    assert!(expr.arrays().is_empty());

    let expr = built("z*y+x-y*z");
    assert_eq!(scalar_names(&expr), ["z", "y", "x"]);
}

#[test]
fn discovery_classifies_by_first_occurrence() {
    let expr = built("x[0]+x");
    assert_eq!(array_names(&expr), ["x"]);
    assert!(expr.scalars().is_empty());

    let expr = built("y+y[0]");
    assert_eq!(scalar_names(&expr), ["y"]);
    assert!(expr.arrays().is_empty());
}

#[test]
fn discovery_skips_literals_and_finds_subscript_symbols() {
    let expr = built("a[b[2]+i] * 3 + (k - 10)");
    assert_eq!(array_names(&expr), ["a", "b"]);
    assert_eq!(scalar_names(&expr), ["i", "k"]);
}

#[test]
fn space_before_bracket_is_not_array_shaped() {
    let expr = built("a [0]");
    assert_eq!(scalar_names(&expr), ["a"]);
    assert!(matches!(expr.evaluate(),
                     Err(Error::Parse(ParseError::UnexpectedToken { position: 2, .. }))));
}

#[test]
fn discovery_is_idempotent() {
    let mut expr = built("p*q+r[p]");
    let first = expr.symbols().clone();
    expr.build_symbols().unwrap();
    assert_eq!(expr.symbols(), &first);
}

#[test]
fn scalar_values_load() {
    assert_eval("x+1", "x 5", 6.0);
    assert_eval("x*y-x", "x 3\ny 4", 9.0);
    assert_eval("x", "x -7", -7.0);
}

#[test]
fn unloaded_scalars_are_zero() {
    assert_eval("x+1", "", 1.0);
}

#[test]
fn array_values_load() {
    assert_eval("arr[0]+arr[2]", "arr 3 (0,10) (2,7)", 17.0);
    assert_eval("arr[1]", "arr 3 (0,10) (2,7)", 0.0);
}

#[test]
fn nested_subscripts() {
    assert_eval("a[b[0]+1]", "b 2 (0,1) (1,9)\na 3 (2,42)", 42.0);
    assert_eval("a[b[b[0]]]", "b 2 (0,1) (1,0)\na 1 (0,5)", 5.0);
    assert_eval("a[(i+1)*2]-a[i]", "i 1\na 5 (1,3) (4,10)", 7.0);
}

#[test]
fn subscripts_are_truncated() {
    assert_eval("a[3/2]", "a 2 (1,8)", 8.0);
}

#[test]
fn records_may_arrive_in_any_order_and_repeat() {
    assert_eval("a[0]+x", "a 1 (0,4)\nx 1\nx 2", 6.0);
    assert_eval("a[0]", "a 1 (0,4)\na 2 (1,9)", 0.0);
}

#[test]
fn unknown_records_are_ignored() {
    assert_eval("x+1", "nope 12\nghost 3 (0,1)\nx 2\nnope garbage (", 3.0);
}

#[test]
fn blank_record_lines_are_skipped() {
    assert_eval("x", "\n  \nx 4\n", 4.0);
}

#[test]
fn record_integers_may_carry_a_plus_sign() {
    assert_eval("x", "x +5", 5.0);
    assert_eval("a[1]", "a +2 (+1,+6)", 6.0);
}

#[test]
fn record_names_end_only_at_ascii_separators() {
    assert_eval("x", "x\u{a0}5\nx 2", 2.0);
    assert_eval("x", "\u{a0}x 5", 0.0);
}

#[test]
fn two_token_record_allocates_array() {
    assert_eval("a[2]", "a 3", 0.0);
}

#[test]
fn record_pairs_tolerate_spaces() {
    assert_eval("a[1]", "a 2 ( 1 , 6 )", 6.0);
}

#[test]
fn malformed_records_are_fatal() {
    assert!(matches!(eval_err("x", "x five"),
                     Error::Parse(ParseError::InvalidRecord { line: 1, .. })));
    assert!(matches!(eval_err("a[0]", "a 2 (0;1)"),
                     Error::Parse(ParseError::InvalidRecord { line: 1, .. })));
    assert!(matches!(eval_err("x", "\nx 1 (0,1)"),
                     Error::Parse(ParseError::InvalidRecord { line: 2, .. })));
    assert!(matches!(eval_err("a[0]", "a -1"),
                     Error::Parse(ParseError::NegativeArraySize { size: -1, .. })));
    assert!(matches!(eval_err("a[0]", "a 2 (2,1)"),
                     Error::Parse(ParseError::RecordIndexOutOfRange { index: 2, size: 2, .. })));
}

#[test]
fn subscript_out_of_range_fails() {
    assert_eq!(eval_err("a[3]", "a 3 (0,1)"),
               Error::Runtime(RuntimeError::IndexOutOfBounds { name:     "a".into(),
                                                               len:      3,
                                                               found:    3,
                                                               position: 0, }));
    assert!(matches!(eval_err("1+a[0-1]", "a 3"),
                     Error::Runtime(RuntimeError::IndexOutOfBounds { found: -1,
                                                                     position: 2,
                                                                     .. })));
}

#[test]
fn unallocated_array_fails() {
    assert_eq!(eval_err("a[0]", "x 1"),
               Error::Runtime(RuntimeError::UnallocatedArray { name:     "a".into(),
                                                               position: 0, }));
}

#[test]
fn non_finite_subscript_fails() {
    assert!(matches!(eval_err("a[1/0]", "a 1"),
                     Error::Runtime(RuntimeError::InvalidIndex { .. })));
}

#[test]
fn kind_mismatch_fails() {
    assert!(matches!(eval_err("x[0]+x", "x 2 (0,1)"),
                     Error::Runtime(RuntimeError::MissingSubscript { position: 5, .. })));
    assert!(matches!(eval_err("y+y[0]", "y 1"),
                     Error::Runtime(RuntimeError::ScalarSubscripted { position: 2, .. })));
}

#[test]
fn evaluating_without_symbols_fails() {
    let expr = Expression::new("x+1");
    assert!(matches!(expr.evaluate(),
                     Err(Error::Runtime(RuntimeError::UnknownVariable { .. }))));
}

#[test]
fn unbalanced_groups_fail() {
    assert_eq!(eval_err("(1+2", ""),
               Error::Parse(ParseError::UnclosedGroup { expected: ')',
                                                        position: 4, }));
    assert_eq!(eval_err("1+2)", ""),
               Error::Parse(ParseError::UnmatchedClosing { delimiter: ')',
                                                           position:  3, }));
    assert_eq!(eval_err("a[1", "a 2"),
               Error::Parse(ParseError::UnclosedGroup { expected: ']',
                                                        position: 3, }));
    assert_eq!(eval_err("(a[1)]", "a 2"),
               Error::Parse(ParseError::UnmatchedClosing { delimiter: ')',
                                                           position:  4, }));
    assert_eq!(eval_err("1]", ""),
               Error::Parse(ParseError::UnmatchedClosing { delimiter: ']',
                                                           position:  1, }));
}

#[test]
fn misplaced_operands_and_operators_fail() {
    assert!(matches!(eval_err("-1", ""),
                     Error::Parse(ParseError::ExpectedOperand { position: 0 })));
    assert!(matches!(eval_err("1+*2", ""),
                     Error::Parse(ParseError::ExpectedOperand { position: 2 })));
    assert!(matches!(eval_err("1+", ""),
                     Error::Parse(ParseError::ExpectedOperand { position: 2 })));
    assert!(matches!(eval_err("1 2", ""),
                     Error::Parse(ParseError::ExpectedOperator { position: 2, .. })));
    assert!(matches!(eval_err("2(3)", ""),
                     Error::Parse(ParseError::ExpectedOperator { position: 1, .. })));
}

#[test]
fn empty_groups_fail() {
    assert!(matches!(eval_err("", ""), Error::Parse(ParseError::EmptyExpression { position: 0 })));
    assert!(matches!(eval_err("   ", ""),
                     Error::Parse(ParseError::EmptyExpression { position: 3 })));
    assert!(matches!(eval_err("1+()", ""),
                     Error::Parse(ParseError::EmptyExpression { position: 3 })));
    assert!(matches!(eval_err("a[]", "a 1"),
                     Error::Parse(ParseError::EmptyExpression { position: 2 })));
}

#[test]
fn nesting_up_to_the_limit_evaluates() {
    let parens = format!("{}7{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
    assert_constant(&parens, 7.0);

    let subscripts = format!("{}0{}", "a[".repeat(MAX_NESTING), "]".repeat(MAX_NESTING));
    assert_eval(&subscripts, "a 1 (0,0)", 0.0);
}

#[test]
fn deep_nesting_is_rejected() {
    let depth = 10_000;

    let parens = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(eval_err(&parens, ""),
               Error::Parse(ParseError::NestingTooDeep { position: MAX_NESTING }));

    let subscripts = format!("{}1{}", "a[".repeat(depth), "]".repeat(depth));
    assert_eq!(eval_err(&subscripts, "a 2"),
               Error::Parse(ParseError::NestingTooDeep { position: 2 * MAX_NESTING + 1 }));

    let mixed = format!("{}1{}", "(a[".repeat(depth), "])".repeat(depth));
    assert!(matches!(eval_err(&mixed, "a 2"),
                     Error::Parse(ParseError::NestingTooDeep { .. })));
}

#[test]
fn evaluation_is_repeatable() {
    let mut expr = built("a[i]*(i+2)");
    expr.load_symbol_text("i 1\na 2 (1,5)").unwrap();
    let first = expr.evaluate().unwrap();
    assert_eq!(first, 15.0);
    assert_eq!(expr.evaluate().unwrap(), first);
    assert_eq!(expr.evaluate().unwrap(), first);
}

#[test]
fn reloading_changes_the_result() {
    let mut expr = built("x*2");
    expr.load_symbol_text("x 3").unwrap();
    assert_eq!(expr.evaluate().unwrap(), 6.0);
    expr.load_symbol_values(["x 10"]).unwrap();
    assert_eq!(expr.evaluate().unwrap(), 20.0);
}

#[test]
fn rebuilding_resets_values() {
    let mut expr = built("x");
    expr.load_symbol_text("x 3").unwrap();
    expr.build_symbols().unwrap();
    assert_eq!(expr.source(), "x");
    assert_eq!(expr.evaluate().unwrap(), 0.0);
}

#[test]
fn expressions_do_not_share_symbols() {
    let mut first = built("x");
    let second = built("x");
    first.load_symbol_text("x 9").unwrap();
    assert_eq!(first.evaluate().unwrap(), 9.0);
    assert_eq!(second.evaluate().unwrap(), 0.0);
}

#[test]
fn loaded_expression_evaluates_concurrently() {
    let mut expr = built("a[b[0]+1] + x*(y-1)");
    expr.load_symbol_text("x 3\ny 5\nb 1 (0,1)\na 3 (2,42)").unwrap();

    let expr = &expr;
    let results: Vec<f64> = thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(move || expr.evaluate().unwrap())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(results.iter().all(|&v| v == 54.0));
}

#[test]
fn symbol_listing_shows_loaded_values() {
    let mut expr = built("x + arr[y] + empty[0]");
    expr.load_symbol_text("x 5\narr 3 (0,10) (2,7)").unwrap();
    assert_eq!(expr.symbol_listing(), "x=5\ny=0\narr=[10,0,7]\nempty=[]\n");
}

#[test]
fn errors_render_their_position() {
    let message = eval_err("(1+2", "").to_string();
    assert_eq!(message, "Error at position 4: Expected closing ')' but none found.");

    let deep = format!("{}1", "(".repeat(MAX_NESTING + 1));
    let message = eval_err(&deep, "").to_string();
    assert_eq!(message,
               format!("Error at position {MAX_NESTING}: Groups nest deeper than {MAX_NESTING} levels."));

    let message = eval_err("x", "x 1 (0,1)").to_string();
    assert!(message.starts_with("Error on line 1:"), "{message}");
}
