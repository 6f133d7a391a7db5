use std::fmt;
use strum_macros::Display;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType<'a> {
    // Single-character tokens.
    LeftParen, RightParen, LeftBrace, RightBrace,
    Comma, Dot, Minus, Plus, Semicolon, Slash, Star,

    // One or two character tokens.
    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    // Literals.
    Identifier(&'a str), String(&'a str), Number(f64),

    // Keywords.
    And, Class, Else, False, Fun, For, If, Nil, Or,
    Print, Return, Super, This, True, Var, While,

    #[strum(serialize = "EOF")]
    EOF
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub tokentype: TokenType<'a>,
    pub lexeme: &'a str,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn is_eof(&self) -> bool {
        matches!(self.tokentype, TokenType::EOF)
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tokentype {
            TokenType::String(x) => write!(f, "{} {} {}", self.tokentype, self.lexeme, x),
            TokenType::Number(x) => write!(f, "{} {} {}", self.tokentype, self.lexeme, x),
            _ => write!(f, "{} {}", self.tokentype, self.lexeme),
        }
    }
}

#[cfg(test)]
mod token_tests {
    use super::{Token, TokenType};
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_render_in_upper_snake_case() {
        assert_eq!(TokenType::LeftParen.to_string(), "LEFT_PAREN");
        assert_eq!(TokenType::BangEqual.to_string(), "BANG_EQUAL");
        assert_eq!(TokenType::Identifier("x").to_string(), "IDENTIFIER");
        assert_eq!(TokenType::EOF.to_string(), "EOF");
    }

    #[test]
    fn literal_tokens_show_their_value() {
        let token = Token {
            tokentype: TokenType::Number(1.5),
            lexeme: "1.5",
            line: 1,
        };
        assert_eq!(token.to_string(), "NUMBER 1.5 1.5");
        let token = Token {
            tokentype: TokenType::Var,
            lexeme: "var",
            line: 1,
        };
        assert_eq!(token.to_string(), "VAR var");
    }
}
