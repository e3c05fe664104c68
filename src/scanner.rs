use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Token, Type};

pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    had_error: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
            had_error: false,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    /// Scanning stops at the first lexical error; the partial token list is
    /// returned without a trailing EOF token in that case.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() && !self.had_error {
            self.start = self.current;
            self.scan_token();
        }

        if !self.had_error {
            self.tokens.push(Token::new(Type::EOF, String::from(""), None, self.line));
        }

        self.tokens.clone()
    }

    /// Returns the next character and consumes it.
    fn advance(&mut self) -> char {
        match self.chars.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => panic!("tried to advance past end of the source."),
        }
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Returns the next next character without consuming it.
    fn peek_next(&mut self) -> char {
        self.chars.peek_next().copied().unwrap_or('\0')
    }

    /// Returns if the scanner has reached the end of the source.
    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Reports a lexical error and stops the scanner.
    fn error(&mut self, line: usize, message: String) {
        self.had_error = true;
        ScanError { line, message }.throw();
    }

    /// Adds a new token to the list of tokens.
    /// The lexeme is always the exact `[start, current)` slice of the source.
    fn add_token(&mut self, r#type: Type, literal: Option<Literal>) {
        let lexeme = self.source.substring(self.start, self.current).to_string();
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        self.advance();
        self.add_token(r#type, None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        self.advance();
        self.advance();
        self.add_token(r#type, None);
    }

    /// Handles a string literal. Strings may span multiple lines.
    fn string(&mut self) {
        let line = self.line;
        self.advance(); // Move past the starting double quote.

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error(line, String::from("unterminated string"));
            return;
        }

        self.advance(); // Move past the closing double quote.

        // Literal does not include the double quotes unlike the lexeme.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_token(Type::String, Some(Literal::String(value)));
    }

    /// Handles a number literal. Numbers are plain digit runs; there are no
    /// fractional literals, so a following '.' is scanned as its own token.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let value = self.source.substring(self.start, self.current)
            .parse::<f64>()
            .expect("digit run to parse as a number");

        self.add_token(Type::Number, Some(Literal::Number(value)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        while matches!(self.peek(), c if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let token_type = match self.source.substring(self.start, self.current) {
            "and"      => Type::And,
            "break"    => Type::Break,
            "class"    => Type::Class,
            "continue" => Type::Continue,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, None);
    }

    /// Handles a block comment. Block comments may span multiple lines and
    /// must be terminated with `*/`.
    fn block_comment(&mut self) {
        let line = self.line;
        self.advance(); // '/'
        self.advance(); // '*'

        while !self.is_at_end() {
            match self.advance() {
                '\n' => self.line += 1,
                '*' if self.peek() == '/' => {
                    self.advance();
                    return;
                },
                _ => (),
            }
        }

        self.error(line, String::from("unterminated block comment"));
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            ':' => self.add_single_char_token(Type::Colon),
            '?' => self.add_single_char_token(Type::Question),
            '*' => self.add_single_char_token(Type::Star),

            // Two character tokens
            '!' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.peek_next() == '=' {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },

            // Comments or slash
            // The lookahead moves the peek cursor, so it is read only once;
            // the cursor resets on the next advance.
            '/' => {
                match self.peek_next() {
                    '/' => {
                        self.advance();
                        self.advance();
                        while !self.is_at_end() && self.peek() != '\n' {
                            self.advance();
                        }
                    },
                    '*' => self.block_comment(),
                    _ => self.add_single_char_token(Type::Slash),
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();
                self.line += 1;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                let line = self.line;
                self.error(line, format!("unexpected character '{c}'"));
            },
        }
    }
}
