extern crate shale_lang;

use shale_lang::literal::Literal;
use shale_lang::token::{Token, Type};

#[test]
fn create_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        1,
    );

    assert_eq!(token.r#type, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, None);
    assert_eq!(token.line, 1);
}

#[test]
fn create_token_from_str() {
    let token = Token::from("init");

    assert_eq!(token.r#type, Type::Identifier);
    assert_eq!(token.lexeme, "init");
    assert_eq!(token.literal, None);
    assert_eq!(token.line, 0);
}

#[test]
fn create_token_with_literal() {
    let token = Token::new(
        Type::Number,
        "12".to_string(),
        Some(Literal::Number(12.0)),
        3,
    );

    assert_eq!(token.literal, Some(Literal::Number(12.0)));
    assert_eq!(token.line, 3);
}

#[test]
fn display_token() {
    let token = Token::new(
        Type::LeftParen,
        "(".to_string(),
        None,
        1,
    );

    assert_eq!(format!("{}", token), "LeftParen ( None @ 1");
}
