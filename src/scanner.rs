use crate::diagnostics::Diagnostics;
use crate::token::{Token, TokenType};
use phf::phf_map;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] Error: {message}")]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

// Note: current becomes self.iter.peek()?.0
struct Scanner<'a> {
    source: &'a str,
    iter: Peekable<CharIndices<'a>>,
    start: usize,
    line: usize,
}

/// The result always ends with an EOF token on the final line.
pub fn scan_tokens<'a>(source: &'a str, diagnostics: &mut Diagnostics) -> Vec<Token<'a>> {
    let mut scanner = Scanner {
        source,
        iter: source.char_indices().peekable(),
        start: 0,
        line: 1,
    };
    let mut tokens: Vec<Token<'a>> = Vec::new();

    while let Some((idx, _)) = scanner.iter.peek() {
        scanner.start = *idx;
        match scanner.scan_token() {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => {}
            Err(e) => diagnostics.scan_error(e),
        }
    }
    tokens.push(Token {
        tokentype: TokenType::EOF,
        lexeme: "",
        line: scanner.line,
    });
    tokens
}

impl<'a> Scanner<'a> {
    fn scan_token(&mut self) -> Result<Option<Token<'a>>, ScanError> {
        let c = match self.iter.next() {
            Some((_, c)) => c,
            None => return Ok(None),
        };
        match c {
            '(' => Ok(Some(self.token(TokenType::LeftParen))),
            ')' => Ok(Some(self.token(TokenType::RightParen))),
            '{' => Ok(Some(self.token(TokenType::LeftBrace))),
            '}' => Ok(Some(self.token(TokenType::RightBrace))),
            ',' => Ok(Some(self.token(TokenType::Comma))),
            '.' => Ok(Some(self.token(TokenType::Dot))),
            '-' => Ok(Some(self.token(TokenType::Minus))),
            '+' => Ok(Some(self.token(TokenType::Plus))),
            ';' => Ok(Some(self.token(TokenType::Semicolon))),
            '*' => Ok(Some(self.token(TokenType::Star))),
            '!' => Ok(Some(self.either('=', TokenType::BangEqual, TokenType::Bang))),
            '=' => Ok(Some(self.either('=', TokenType::EqualEqual, TokenType::Equal))),
            '<' => Ok(Some(self.either('=', TokenType::LessEqual, TokenType::Less))),
            '>' => Ok(Some(self.either('=', TokenType::GreaterEqual, TokenType::Greater))),
            '/' => {
                if self.next_if('/') {
                    while let Some((_, c)) = self.iter.peek() {
                        if *c == '\n' {
                            break;
                        }
                        self.iter.next();
                    }
                    Ok(None)
                } else {
                    Ok(Some(self.token(TokenType::Slash)))
                }
            }
            ' ' | '\r' | '\t' => Ok(None),
            '\n' => {
                self.line += 1;
                Ok(None)
            }
            '"' => self.string().map(Some),
            '0'..='9' => self.number().map(Some),
            'a'..='z' | 'A'..='Z' | '_' => Ok(Some(self.identifier())),
            _ => Err(self.error("Unexpected character.")),
        }
    }
    fn current(&mut self) -> usize {
        match self.iter.peek() {
            None => self.source.len(),
            Some((idx, _)) => *idx,
        }
    }
    fn token(&mut self, tokentype: TokenType<'a>) -> Token<'a> {
        let current = self.current();
        Token {
            tokentype,
            lexeme: &self.source[self.start..current],
            line: self.line,
        }
    }
    fn either(
        &mut self,
        expected: char,
        matched: TokenType<'a>,
        single: TokenType<'a>,
    ) -> Token<'a> {
        if self.next_if(expected) {
            self.token(matched)
        } else {
            self.token(single)
        }
    }
    fn next_if(&mut self, expected: char) -> bool {
        self.iter.next_if(|(_, c)| *c == expected).is_some()
    }
    fn next_if_digit(&mut self) -> bool {
        self.iter.next_if(|(_, c)| c.is_ascii_digit()).is_some()
    }
    fn error(&self, message: &str) -> ScanError {
        ScanError {
            line: self.line,
            message: message.to_string(),
        }
    }
    fn string(&mut self) -> Result<Token<'a>, ScanError> {
        loop {
            match self.iter.next() {
                None => return Err(self.error("Unterminated string.")),
                Some((_, '"')) => break,
                Some((_, '\n')) => self.line += 1,
                Some(_) => {}
            }
        }
        let current = self.current();
        let contents = &self.source[self.start + 1..current - 1];
        Ok(self.token(TokenType::String(contents)))
    }
    fn number(&mut self) -> Result<Token<'a>, ScanError> {
        while self.next_if_digit() {}

        // The dot belongs to the number only when a digit follows it.
        let mut lookahead = self.iter.clone();
        if let (Some((_, '.')), Some((_, c))) = (lookahead.next(), lookahead.next()) {
            if c.is_ascii_digit() {
                self.iter.next();
                while self.next_if_digit() {}
            }
        }

        let current = self.current();
        let value = self.source[self.start..current]
            .parse::<f64>()
            .map_err(|_| self.error("Invalid number."))?;
        Ok(self.token(TokenType::Number(value)))
    }
    fn identifier(&mut self) -> Token<'a> {
        while self
            .iter
            .next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
            .is_some()
        {}
        let current = self.current();
        let text = &self.source[self.start..current];
        match KEYWORDS.get(text) {
            None => self.token(TokenType::Identifier(text)),
            Some(x) => self.token(*x),
        }
    }
}

static KEYWORDS: phf::Map<&'static str, TokenType<'static>> = phf_map! {
    "and" => TokenType::And,
    "class" => TokenType::Class,
    "else" => TokenType::Else,
    "false" => TokenType::False,
    "for" => TokenType::For,
    "fun" => TokenType::Fun,
    "if" => TokenType::If,
    "nil" => TokenType::Nil,
    "or" => TokenType::Or,
    "print" => TokenType::Print,
    "return" => TokenType::Return,
    "super" => TokenType::Super,
    "this" => TokenType::This,
    "true" => TokenType::True,
    "var" => TokenType::Var,
    "while" => TokenType::While,
};
