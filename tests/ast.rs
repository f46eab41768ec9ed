extern crate monkey_lang;

use monkey_lang::ast;
use monkey_lang::token::Token;

#[test]
fn ast_display_let_statement() {
    let program = ast::Program {
        statements: vec![ast::Statement::Let(ast::LetStatement {
            name: "myVar".to_string(),
            value: ast::Expression::Identifier("anotherVar".to_string()),
        })],
    };

    assert_eq!(format!("{}", program), "let myVar = anotherVar;")
}

#[test]
fn ast_display_return_statements() {
    let tests = vec![
        (
            ast::Statement::Return(ast::ReturnStatement {
                value: Some(ast::Expression::Integer(5)),
            }),
            "return 5;",
        ),
        (
            ast::Statement::Return(ast::ReturnStatement { value: None }),
            "return;",
        ),
    ];

    for (stmt, want) in tests {
        assert_eq!(format!("{}", stmt), want);
    }
}

#[test]
fn ast_display_expressions() {
    let tests = vec![
        (
            ast::Expression::Prefix(ast::PrefixExpression {
                operator: Token::Minus,
                right: Box::new(ast::Expression::Integer(5)),
            }),
            "(-5)",
        ),
        (
            ast::Expression::Infix(ast::InfixExpression {
                left: Box::new(ast::Expression::Integer(1)),
                operator: Token::Plus,
                right: Box::new(ast::Expression::Integer(2)),
            }),
            "(1 + 2)",
        ),
        (ast::Expression::String("hello".to_string()), "\"hello\""),
        (
            ast::Expression::Array(ast::ArrayLiteral {
                elements: vec![
                    ast::Expression::Integer(1),
                    ast::Expression::Boolean(true),
                ],
            }),
            "[1, true]",
        ),
        (
            ast::Expression::Hash(ast::HashLiteral {
                pairs: vec![(
                    ast::Expression::String("one".to_string()),
                    ast::Expression::Integer(1),
                )],
            }),
            "{\"one\": 1}",
        ),
        (
            ast::Expression::Index(ast::IndexExpression {
                left: Box::new(ast::Expression::Identifier("xs".to_string())),
                index: Box::new(ast::Expression::Integer(0)),
            }),
            "(xs[0])",
        ),
        (
            ast::Expression::Call(ast::CallExpression {
                function: Box::new(ast::Expression::Identifier("add".to_string())),
                arguments: vec![
                    ast::Expression::Integer(1),
                    ast::Expression::Integer(2),
                ],
            }),
            "add(1, 2)",
        ),
    ];

    for (expr, want) in tests {
        assert_eq!(format!("{}", expr), want);
    }
}

#[test]
fn ast_display_if_expression() {
    let expr = ast::Expression::If(ast::IfExpression {
        condition: Box::new(ast::Expression::Infix(ast::InfixExpression {
            left: Box::new(ast::Expression::Identifier("x".to_string())),
            operator: Token::LessThan,
            right: Box::new(ast::Expression::Identifier("y".to_string())),
        })),
        consequence: ast::BlockStatement {
            statements: vec![ast::Statement::Expression(ast::Expression::Identifier(
                "x".to_string(),
            ))],
        },
        alternative: Some(ast::BlockStatement {
            statements: vec![ast::Statement::Expression(ast::Expression::Identifier(
                "y".to_string(),
            ))],
        }),
    });

    assert_eq!(format!("{}", expr), "if ((x < y)) {x} else {y}");
}

#[test]
fn ast_display_function_literal() {
    let expr = ast::Expression::Function(ast::FunctionLiteral {
        parameters: vec!["x".to_string(), "y".to_string()],
        body: ast::BlockStatement {
            statements: vec![ast::Statement::Expression(ast::Expression::Infix(
                ast::InfixExpression {
                    left: Box::new(ast::Expression::Identifier("x".to_string())),
                    operator: Token::Plus,
                    right: Box::new(ast::Expression::Identifier("y".to_string())),
                },
            ))],
        },
    });

    assert_eq!(format!("{}", expr), "fn(x, y) {(x + y)}");
}

#[test]
fn ast_display_node() {
    let node = ast::Node::Statement(ast::Statement::Expression(ast::Expression::Boolean(true)));

    assert_eq!(format!("{}", node), "true");
}
