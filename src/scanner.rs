use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::token::{Token, Type, Location};
use crate::literal::Literal;
use crate::error::{Error, ScanError};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner::with_start_line(source, 1)
    }

    /// Creates a new scanner that numbers its first line `line`.
    /// The prompt uses this to keep locations unique across submissions.
    pub fn with_start_line(source: &'a str, line: usize) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line,
            column_offset: 0,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(
            Token::new(
                Type::EOF,
                String::from(""),
                None,
                Location::new(self.line, self.current - self.column_offset)
            )
        );

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        match self.source.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => panic!("tried to advance past end of the file."),
        }
    }

    /// Consumes the next character only if it is the expected one.
    fn advance_if(&mut self, expected: char) -> bool {
        match self.source.next_if(|&c| c == expected) {
            Some(_) => {
                self.current += 1;
                true
            },
            None => false,
        }
    }

    /// Returns the next character without consuming it.
    /// The end of the file reads as '\0'.
    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    /// Returns the character after the next one without consuming either.
    /// The peek cursor is reset so `peek` keeps pointing at the next character.
    fn peek_next(&mut self) -> char {
        let c = self.source.peek_next().copied().unwrap_or('\0');
        self.source.reset_cursor();
        c
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        let location = Location::new(self.line, self.start - self.column_offset);
        self.add_token_at(r#type, lexeme, literal, location);
    }

    /// Adds a new token with an explicit location.
    fn add_token_at(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>, location: Location) {
        self.tokens.push(Token::new(r#type, lexeme, literal, location));
    }

    /// Adds either a two character token or a single character one,
    /// depending on whether the next character is '='.
    fn add_operator_token(&mut self, first: char, double: Type, single: Type) {
        if self.advance_if('=') {
            self.add_token(double, format!("{first}="), None);
        } else {
            self.add_token(single, first.to_string(), None);
        }
    }

    /// Handles a string literal. The opening quote is already consumed.
    /// Strings may span lines; the token is located at the opening quote.
    fn string(&mut self) {
        let location = Location::new(self.line, self.start - self.column_offset);

        let mut value = Vec::new();
        while let Some(c) = self.source.next_if(|&c| c != '"') {
            self.current += 1;
            value.push(c);

            if c == '\n' {
                self.line += 1;
                self.column_offset = self.current;
            }
        }

        if self.is_at_end() {
            ScanError {
                line: location.line,
                message: String::from("Unterminated string."),
            }.throw();
            return;
        }

        self.advance();  // The closing double quote.

        let value: String = value.into_iter().collect();

        // The literal does not include the double quotes unlike the lexeme.
        self.add_token_at(Type::String, format!("\"{value}\""), Some(Literal::String(value)), location);
    }

    /// Handles a number literal. The first digit is already consumed.
    /// A trailing '.' without digits after it is left for the next token.
    fn number(&mut self, first: char) {
        let mut value = vec![first];

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance());  // The dot.

            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let value: String = value.into_iter().collect();
        let value_num: f64 = value.parse().unwrap();

        self.add_token(Type::Number, value, Some(Literal::Number(value_num)));
    }

    /// Handles an identifier or a keyword. The first character is already consumed.
    fn identifier(&mut self, first: char) {
        let mut value = vec![first];

        // is_alphanumeric does not include underscores.
        while matches!(self.peek(), c if c.is_alphanumeric() || c == '_') {
            value.push(self.advance());
        }

        let value = String::from_iter(value);
        let token_type = match value.as_str() {
            "and"    => Type::And,
            "class"  => Type::Class,
            "else"   => Type::Else,
            "false"  => Type::False,
            "for"    => Type::For,
            "fun"    => Type::Fun,
            "if"     => Type::If,
            "nil"    => Type::Nil,
            "or"     => Type::Or,
            "print"  => Type::Print,
            "return" => Type::Return,
            "super"  => Type::Super,
            "this"   => Type::This,
            "true"   => Type::True,
            "var"    => Type::Var,
            "while"  => Type::While,
            _        => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            // One character tokens
            '(' => self.add_token(Type::LeftParen, c.to_string(), None),
            ')' => self.add_token(Type::RightParen, c.to_string(), None),
            '{' => self.add_token(Type::LeftBrace, c.to_string(), None),
            '}' => self.add_token(Type::RightBrace, c.to_string(), None),
            ',' => self.add_token(Type::Comma, c.to_string(), None),
            '.' => self.add_token(Type::Dot, c.to_string(), None),
            '-' => self.add_token(Type::Minus, c.to_string(), None),
            '+' => self.add_token(Type::Plus, c.to_string(), None),
            ';' => self.add_token(Type::Semicolon, c.to_string(), None),
            '*' => self.add_token(Type::Star, c.to_string(), None),

            // One or two character tokens
            '!' => self.add_operator_token('!', Type::BangEqual, Type::Bang),
            '=' => self.add_operator_token('=', Type::EqualEqual, Type::Equal),
            '<' => self.add_operator_token('<', Type::LessEqual, Type::Less),
            '>' => self.add_operator_token('>', Type::GreaterEqual, Type::Greater),

            // Either a comment running to the end of the line or a slash
            '/' => {
                if self.advance_if('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, c.to_string(), None);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => (),

            // Update line counter
            '\n' => {
                self.line += 1;
                self.column_offset = self.current;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(c),

            // Identifiers
            c if c.is_alphabetic() || c == '_' => self.identifier(c),

            _ => {
                ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{c}'."),
                }.throw();
            },
        }
    }
}
