extern crate monkey_lang;

use monkey_lang::ast;
use monkey_lang::lexer::Lexer;
use monkey_lang::parser::Parser;

#[test]
fn parse_let_statements() {
    let tests = vec![
        ("let x = 5;", "x", "5"),
        ("let y = true;", "y", "true"),
        ("let foobar = y;", "foobar", "y"),
        ("let add = fn(a, b) { a + b };", "add", "fn(a, b) {(a + b)}"),
    ];

    for (input, want_name, want_value) in tests {
        let prog = parse(input);

        assert_eq!(prog.statements.len(), 1);

        let stmt = if let ast::Statement::Let(stmt) = &prog.statements[0] {
            stmt
        } else {
            panic!("not a let statement");
        };

        assert_eq!(want_name, stmt.name);
        assert_eq!(want_value, stmt.value.to_string());
    }
}

#[test]
fn parse_return_statements() {
    let tests = vec![
        ("return 5;", Some("5".to_string())),
        ("return x + y;", Some("(x + y)".to_string())),
        ("return;", None),
        ("return", None),
    ];

    for (input, want) in tests {
        let prog = parse(input);

        assert_eq!(prog.statements.len(), 1);

        let stmt = if let ast::Statement::Return(stmt) = &prog.statements[0] {
            stmt
        } else {
            panic!("not a return statement");
        };

        assert_eq!(want, stmt.value.as_ref().map(|v| v.to_string()));
    }
}

#[test]
fn parse_identifier_expression() {
    let prog = parse("foobar;");

    assert_eq!(prog.statements.len(), 1);

    let id =
        if let ast::Statement::Expression(ast::Expression::Identifier(id)) = &prog.statements[0] {
            id
        } else {
            panic!("not an identifier expression");
        };

    assert_eq!("foobar", id);
}

#[test]
fn parse_integer_literal_expression() {
    let prog = parse("5;");

    assert_eq!(prog.statements.len(), 1);

    let got = if let ast::Statement::Expression(ast::Expression::Integer(int)) = &prog.statements[0]
    {
        int
    } else {
        panic!("not an integer expression");
    };

    assert_eq!(5, *got);
}

#[test]
fn parse_string_literal_expression() {
    let prog = parse(r#""hello world";"#);

    assert_eq!(prog.statements.len(), 1);

    let got = if let ast::Statement::Expression(ast::Expression::String(s)) = &prog.statements[0] {
        s
    } else {
        panic!("not a string expression");
    };

    assert_eq!("hello world", got);
}

#[test]
fn parse_boolean_literal_expressions() {
    let tests = vec![("true;", true), ("false;", false)];

    for (input, want) in tests {
        let prog = parse(input);

        let got =
            if let ast::Statement::Expression(ast::Expression::Boolean(b)) = &prog.statements[0] {
                b
            } else {
                panic!("not a boolean expression");
            };

        assert_eq!(want, *got);
    }
}

#[test]
fn parse_prefix_expressions() {
    let tests = vec![
        ("!5;", "(!5)"),
        ("-15;", "(-15)"),
        ("!true;", "(!true)"),
        ("!false;", "(!false)"),
    ];

    for (input, want) in tests {
        let prog = parse(input);

        let got =
            if let ast::Statement::Expression(expr @ ast::Expression::Prefix(_)) =
                &prog.statements[0]
            {
                expr
            } else {
                panic!("not a prefix expression");
            };

        assert_eq!(want, got.to_string());
    }
}

#[test]
fn parse_infix_expressions() {
    let tests = vec![
        ("5 + 5;", "(5 + 5)"),
        ("5 - 5;", "(5 - 5)"),
        ("5 * 5;", "(5 * 5)"),
        ("5 / 5;", "(5 / 5)"),
        ("5 > 5;", "(5 > 5)"),
        ("5 < 5;", "(5 < 5)"),
        ("5 == 5;", "(5 == 5)"),
        ("5 != 5;", "(5 != 5)"),
        ("true == true", "(true == true)"),
        ("true != false", "(true != false)"),
        ("false == false", "(false == false)"),
    ];

    for (input, want) in tests {
        let prog = parse(input);

        let got =
            if let ast::Statement::Expression(expr @ ast::Expression::Infix(_)) =
                &prog.statements[0]
            {
                expr
            } else {
                panic!("not an infix expression");
            };

        assert_eq!(want, got.to_string());
    }
}

#[test]
fn parse_operator_precedence() {
    let tests = vec![
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true", "true"),
        ("false", "false"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)",
        ),
        (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
        ),
    ];

    for (input, want) in tests {
        let got = format!("{}", parse(input));

        assert_eq!(want, got);
    }
}

#[test]
fn parse_if_expression() {
    let prog = parse("if (x < y) { x }");

    let expr = if let ast::Statement::Expression(ast::Expression::If(expr)) = &prog.statements[0] {
        expr
    } else {
        panic!("not an if expression");
    };

    assert_eq!("(x < y)", expr.condition.to_string());
    assert_eq!("x", expr.consequence.to_string());
    assert!(expr.alternative.is_none());
}

#[test]
fn parse_if_else_expression() {
    let prog = parse("if (x < y) { x } else { y }");

    let expr = if let ast::Statement::Expression(ast::Expression::If(expr)) = &prog.statements[0] {
        expr
    } else {
        panic!("not an if expression");
    };

    assert_eq!("(x < y)", expr.condition.to_string());
    assert_eq!("x", expr.consequence.to_string());
    assert_eq!(
        "y",
        expr.alternative.as_ref().expect("no alternative").to_string()
    );
}

#[test]
fn parse_function_literal() {
    let prog = parse("fn(x, y) { x + y; }");

    let func =
        if let ast::Statement::Expression(ast::Expression::Function(func)) = &prog.statements[0] {
            func
        } else {
            panic!("not a function literal");
        };

    assert_eq!(vec!["x".to_string(), "y".to_string()], func.parameters);
    assert_eq!("(x + y)", func.body.to_string());
}

#[test]
fn parse_function_parameters() {
    let tests = vec![
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (input, want) in tests {
        let prog = parse(input);

        let func = if let ast::Statement::Expression(ast::Expression::Function(func)) =
            &prog.statements[0]
        {
            func
        } else {
            panic!("not a function literal");
        };

        let want: Vec<String> = want.into_iter().map(String::from).collect();
        assert_eq!(want, func.parameters);
    }
}

#[test]
fn parse_call_expression() {
    let prog = parse("add(1, 2 * 3, 4 + 5);");

    let call =
        if let ast::Statement::Expression(ast::Expression::Call(call)) = &prog.statements[0] {
            call
        } else {
            panic!("not a call expression");
        };

    assert_eq!("add", call.function.to_string());

    let want = vec!["1", "(2 * 3)", "(4 + 5)"];
    let got: Vec<String> = call.arguments.iter().map(|a| a.to_string()).collect();
    assert_eq!(want, got);
}

#[test]
fn parse_array_literal() {
    let prog = parse("[1, 2 * 2, 3 + 3]");

    let array =
        if let ast::Statement::Expression(ast::Expression::Array(array)) = &prog.statements[0] {
            array
        } else {
            panic!("not an array literal");
        };

    let want = vec!["1", "(2 * 2)", "(3 + 3)"];
    let got: Vec<String> = array.elements.iter().map(|e| e.to_string()).collect();
    assert_eq!(want, got);
}

#[test]
fn parse_empty_array_literal() {
    let prog = parse("[]");

    let array =
        if let ast::Statement::Expression(ast::Expression::Array(array)) = &prog.statements[0] {
            array
        } else {
            panic!("not an array literal");
        };

    assert!(array.elements.is_empty());
}

#[test]
fn parse_index_expression() {
    let prog = parse("myArray[1 + 1]");

    let index =
        if let ast::Statement::Expression(ast::Expression::Index(index)) = &prog.statements[0] {
            index
        } else {
            panic!("not an index expression");
        };

    assert_eq!("myArray", index.left.to_string());
    assert_eq!("(1 + 1)", index.index.to_string());
}

#[test]
fn parse_hash_literal_string_keys() {
    let prog = parse(r#"{"one": 1, "two": 2, "three": 3}"#);

    let hash =
        if let ast::Statement::Expression(ast::Expression::Hash(hash)) = &prog.statements[0] {
            hash
        } else {
            panic!("not a hash literal");
        };

    // Pairs are kept in source order by the parser.
    let want = vec![
        ("\"one\"", "1"),
        ("\"two\"", "2"),
        ("\"three\"", "3"),
    ];
    let got: Vec<(String, String)> = hash
        .pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for ((want_k, want_v), (got_k, got_v)) in want.into_iter().zip(got) {
        assert_eq!(want_k, got_k);
        assert_eq!(want_v, got_v);
    }
}

#[test]
fn parse_empty_hash_literal() {
    let prog = parse("{}");

    let hash =
        if let ast::Statement::Expression(ast::Expression::Hash(hash)) = &prog.statements[0] {
            hash
        } else {
            panic!("not a hash literal");
        };

    assert!(hash.pairs.is_empty());
}

#[test]
fn parse_hash_literal_with_expressions() {
    let prog = parse(r#"{"one": 0 + 1, "two": 10 - 8, "three": 15 / 5}"#);

    let hash =
        if let ast::Statement::Expression(ast::Expression::Hash(hash)) = &prog.statements[0] {
            hash
        } else {
            panic!("not a hash literal");
        };

    let want = vec!["(0 + 1)", "(10 - 8)", "(15 / 5)"];
    let got: Vec<String> = hash.pairs.iter().map(|(_, v)| v.to_string()).collect();
    assert_eq!(want, got);
}

#[test]
fn parse_hash_literal_mixed_keys() {
    let prog = parse(r#"{1: "one", true: "yes"}"#);

    let hash =
        if let ast::Statement::Expression(ast::Expression::Hash(hash)) = &prog.statements[0] {
            hash
        } else {
            panic!("not a hash literal");
        };

    assert_eq!(hash.pairs.len(), 2);
    assert_eq!(ast::Expression::Integer(1), hash.pairs[0].0);
    assert_eq!(ast::Expression::Boolean(true), hash.pairs[1].0);
}

#[test]
fn parse_brace_disambiguation() {
    // A brace in expression position opens a hash literal, while the brace
    // following an if or fn header opens a block.
    let prog = parse(r#"if (true) { {"a": 1} }"#);

    let expr = if let ast::Statement::Expression(ast::Expression::If(expr)) = &prog.statements[0] {
        expr
    } else {
        panic!("not an if expression");
    };

    if let ast::Statement::Expression(ast::Expression::Hash(_)) = expr.consequence.statements[0] {
    } else {
        panic!("consequence does not contain a hash literal");
    }
}

#[test]
fn parse_canonical_render_round_trip() {
    let tests = vec![
        "let x = 5;",
        "let add = fn(x, y) { x + y; };",
        "a + b * c",
        "-(5 + 5)",
        "if (x < y) { x } else { y }",
        r#"{"one": 1, "two": 2}"#,
        "[1, 2 * 2, 3 + 3]",
        "add(1, 2 * 3)",
        "myArray[1 + 1]",
        r#""hello world""#,
        "return 10;",
    ];

    // Re-parsing a program's canonical rendering produces the same
    // canonical rendering.
    for input in tests {
        let first = parse(input).to_string();
        let second = parse(&first).to_string();

        assert_eq!(first, second);
    }
}

#[test]
fn parse_errors_unexpected_token() {
    let mut p = Parser::new(Lexer::new("let x 5;"));
    let err = p.parse().expect_err("expected parse errors");

    let want = vec!["expected next token to be =, got: integer(5) (line 1, column 7)"];
    let got: Vec<String> = err.errors().iter().map(|e| e.to_string()).collect();

    assert_eq!(want, got);
}

#[test]
fn parse_errors_accumulate() {
    let mut p = Parser::new(Lexer::new("let = 5;"));
    let err = p.parse().expect_err("expected parse errors");

    let want = vec![
        "expected next token to be identifier, got: = (line 1, column 5)",
        "no prefix parse function for = found (line 1, column 5)",
    ];
    let got: Vec<String> = err.errors().iter().map(|e| e.to_string()).collect();

    assert_eq!(want, got);
}

#[test]
fn parse_errors_illegal_integer() {
    let mut p = Parser::new(Lexer::new("92233720368547758078"));
    let err = p.parse().expect_err("expected parse errors");

    let want =
        vec!["could not parse 92233720368547758078 as integer (line 1, column 1)"];
    let got: Vec<String> = err.errors().iter().map(|e| e.to_string()).collect();

    assert_eq!(want, got);
}

fn parse(input: &str) -> ast::Program {
    let mut p = Parser::new(Lexer::new(input));

    p.parse().expect("failed to parse program")
}
