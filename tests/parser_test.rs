use color_eyre::eyre::{Context, Result};
use proptest::prelude::*;
use std::{
    fs::{read_dir, read_to_string},
    path::Path,
};

use vslang::{
    lexer::Lexer,
    parser::{
        formatter::{BasicFormatter, ParserFormatter, SExpressionFormatter},
        Parser, ParserErrorKind,
    },
};

fn check(input: &str, expected: &str, test_name: &str) {
    let formatter = SExpressionFormatter::new(input);
    let tokens = Lexer::new(input)
        .tokenize()
        .expect("Parser test data is lexically valid.");
    let actual = match Parser::new(tokens).parse() {
        Ok(program) => formatter.format_program(&program),
        Err(error) => formatter.format_error(&error),
    };

    assert_eq!(actual, expected.trim_end(), "Failed the test {test_name}");
}

fn check_expression(input: &str, expected: &str) {
    let formatter = SExpressionFormatter::new(input);
    let tokens = Lexer::new(input)
        .tokenize()
        .expect("Expression is lexically valid.");
    let actual = match Parser::new(tokens).parse_expression() {
        Ok(expr) => formatter.format_expression(&expr),
        Err(error) => formatter.format_error(&error),
    };
    assert_eq!(actual, expected, "Failed to parse {input}");
}

#[test]
fn smoke_test() {
    check("", "", "smoke");
}

#[test]
fn comparison_shares_the_additive_tier() {
    check_expression("1 < 2 + 3", "(+ (< 1 2) 3)");
    check_expression("1 + 2 >= 3 - 4", "(- (>= (+ 1 2) 3) 4)");
}

#[test]
fn multiplicative_binds_tighter() {
    check_expression("8 / 4 / 2", "(/ (/ 8 4) 2)");
    check_expression("2 + 3 * 4", "(+ 2 (* 3 4))");
    check_expression("2 * (3 + 4)", "(* 2 (+ 3 4))");
}

#[test]
fn expressions_must_consume_all_tokens() {
    check_expression("1 2", "[line 1] Error: Expected EOF but got NUMBER.");
}

#[test]
fn calls_and_literals() {
    check_expression("len(\"hey\")", "(call len \"hey\")");
    check_expression("read()", "(call read)");
    check_expression("substring(\"a b\", x, 1)", "(call substring \"a b\" x 1)");
}

#[test]
fn negative_literals_are_not_expressions() {
    let tokens = Lexer::new("print(-1);").tokenize().expect("Valid tokens.");
    let error = Parser::new(tokens).parse().expect_err("`-` is not a prefix.");
    assert!(matches!(error.kind, ParserErrorKind::NonExpression(_)));
}

#[test]
fn basic_errors_name_the_line() {
    let source = "print(1);\nprint(1)";
    let tokens = Lexer::new(source).tokenize().expect("Valid tokens.");
    let error = Parser::new(tokens).parse().expect_err("Missing semicolon.");
    assert_eq!(
        BasicFormatter::new(source).format_error(&error),
        "[line 2] Error: Expected SEMICOLON but got EOF."
    );
}

#[test]
fn basic_formatter_prints_s_expressions() {
    let source = "let x = 1 + 2;";
    let tokens = Lexer::new(source).tokenize().expect("Valid tokens.");
    let program = Parser::new(tokens).parse().expect("Valid program.");
    assert_eq!(BasicFormatter::new(source).format_program(&program), "(let x (+ 1 2))");
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/parser/in");
    let output_dir = Path::new("./test_data/parser/out");

    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "vs" {
            continue;
        }

        let test_name = AsRef::<Path>::as_ref(
            path.file_name()
                .expect("File name can't be none as the path is to a real file."),
        );

        let input = read_to_string(&path).context("Failed to open input test data file")?;

        let expected = {
            let output_file_name = test_name.with_extension("txt");
            let output_path = output_dir.join(output_file_name);
            read_to_string(output_path).context("Failed to open output test data file")?
        };

        let res = std::panic::catch_unwind(|| {
            check(&input, &expected, &test_name.to_string_lossy());
        });
        if res.is_err() {
            println!("\tFails test case {test_name:?}");
            succeeded = false;
        }
    }

    assert!(succeeded, "Some parser test cases failed");
    Ok(())
}

// Property-based tests

fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("<"),
        Just(">"),
        Just("<="),
        Just(">="),
    ]
}

proptest! {
    #[test]
    fn additive_chains_fold_left(
        first in 0u32..1000,
        rest in prop::collection::vec((operator_strategy(), 0u32..1000), 0..20),
    ) {
        let mut source = first.to_string();
        let mut expected = first.to_string();
        for (operator, operand) in rest.iter() {
            source.push_str(&format!(" {operator} {operand}"));
            expected = format!("({operator} {expected} {operand})");
        }
        let tokens = Lexer::new(&source).tokenize().unwrap();
        let expr = Parser::new(tokens).parse_expression().unwrap();
        prop_assert_eq!(SExpressionFormatter::new(&source).format_expression(&expr), expected);
    }
}
