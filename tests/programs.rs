use pretty_assertions::assert_eq;
use rlox::{Lox, Options, Outcome};

struct Run {
    outcome: Outcome,
    stdout: String,
    stderr: Vec<String>,
}

fn run(source: &str) -> Run {
    let mut lox = Lox::with_output(Vec::new(), Options::default());
    let outcome = lox.run(source);
    Run {
        outcome,
        stdout: String::from_utf8(lox.output().clone()).unwrap(),
        stderr: lox.diagnostics_mut().drain(),
    }
}

fn assert_prints(source: &str, expected: &str) {
    let result = run(source);
    assert_eq!(result.stderr, Vec::<String>::new());
    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.stdout, expected);
}

#[test]
fn precedence() {
    assert_prints("print 1 + 2 * 3;", "7\n");
    assert_prints("print (1 + 2) * 3;", "9\n");
    assert_prints("print 10 - 4 - 3;", "3\n");
    assert_prints("print 2 * 3 == 6 and 1 < 2;", "true\n");
}

#[test]
fn integral_numbers_drop_the_fraction() {
    assert_prints("print 6 / 2;", "3\n");
    assert_prints("print 0.1 + 0.2 > 0.3;", "true\n");
    assert_prints("print 1.25;", "1.25\n");
}

#[test]
fn concatenation() {
    assert_prints("print \"a\" + \"b\";", "ab\n");
    let result = run("print 1 + \"b\";");
    assert_eq!(result.outcome, Outcome::RuntimeError);
    assert_eq!(
        result.stderr,
        vec!["[line 1] Operands must be two numbers or two strings.".to_string()]
    );
}

#[test]
fn scoping() {
    assert_prints("var a = 1; { var a = 2; print a; } print a;", "2\n1\n");
    assert_prints(
        "var a = \"global\"; { a = \"assigned\"; var b = a; print b; } print a;",
        "assigned\nassigned\n",
    );
}

#[test]
fn declarations() {
    assert_prints("var a; print a; { var b; print b; }", "nil\nnil\n");
    assert_prints("var a = 1; var a = 2; print a;", "2\n");
    assert_prints("var a; print a; var a = 2; print a;", "nil\n2\n");
}

#[test]
fn undeclared_names() {
    let result = run("a = 1;");
    assert_eq!(result.outcome, Outcome::RuntimeError);
    assert_eq!(result.stderr, vec!["[line 1] Undefined variable 'a'.".to_string()]);
    let result = run("print\n  a;");
    assert_eq!(result.stderr, vec!["[line 2] Undefined variable 'a'.".to_string()]);
}

#[test]
fn logic_returns_operands() {
    assert_prints("print nil or \"x\";", "x\n");
    assert_prints("print 1 and 2;", "2\n");
    assert_prints("print !nil;", "true\n");
    assert_prints("print !0;", "false\n");
}

#[test]
fn runtime_error_stops_remaining_statements() {
    let result = run("print 1;\nprint -\"two\";\nprint 3;");
    assert_eq!(result.outcome, Outcome::RuntimeError);
    assert_eq!(result.stdout, "1\n");
    assert_eq!(result.stderr, vec!["[line 2] Operand must be a number.".to_string()]);
    assert_eq!(Outcome::RuntimeError.exit_code(), 70);
}

#[test]
fn parser_recovers_and_reports_each_statement() {
    let result = run("var = 1;\nprint (2;\nprint 3;");
    assert_eq!(result.outcome, Outcome::StaticError);
    assert_eq!(result.stdout, "");
    assert_eq!(
        result.stderr,
        vec![
            "[line 1] Error at '=': Expect variable name.".to_string(),
            "[line 2] Error at ';': Expect ')' after expression.".to_string(),
        ]
    );
}

#[test]
fn scan_and_parse_errors_are_all_reported() {
    let result = run("print \"open;\n");
    assert_eq!(
        result.stderr,
        vec![
            "[line 2] Error: Unterminated string.".to_string(),
            "[line 2] Error at end: Expect expression.".to_string(),
        ]
    );
}

#[test]
fn loops() {
    assert_prints(
        "var a = 0; var b = 1;\nwhile (a < 20) { print a; var t = a; a = b; b = t + b; }",
        "0\n1\n1\n2\n3\n5\n8\n13\n",
    );
    assert_prints(
        "for (var i = 3; i > 0; i = i - 1) print i;",
        "3\n2\n1\n",
    );
}

#[test]
fn comments_are_ignored() {
    assert_prints("// nothing here\nprint 1; // trailing\n", "1\n");
}
