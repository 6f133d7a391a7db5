use super::ast::{Expression, Statement, Value};
use super::diagnostics::Diagnostics;
use super::token::{Token, TokenType};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub location: String,
    pub message: String,
}

impl ParseError {
    fn at(token: &Token, message: &str) -> ParseError {
        let location = if token.is_eof() {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        ParseError {
            line: token.line,
            location,
            message: message.to_string(),
        }
    }
}

type ParseResult<T> = Result<T, ParseError>;

pub fn parse<'a>(
    tokens: &'a [Token<'a>],
    diagnostics: &mut Diagnostics,
) -> Vec<Option<Statement<'a>>> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut parser = Parser::new(tokens);
    let statements = parser.parse();
    debug!(
        "parsed {} declarations with {} errors",
        statements.len(),
        parser.errors.len()
    );
    for error in parser.errors {
        diagnostics.parse_error(error);
    }
    statements
}

struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with an EOF token.
    fn new(tokens: &'a [Token<'a>]) -> Parser<'a> {
        Parser {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }
    fn parse(&mut self) -> Vec<Option<Statement<'a>>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.declaration());
        }
        statements
    }
    fn declaration(&mut self) -> Option<Statement<'a>> {
        let result = match self.peek().tokentype {
            TokenType::Var => {
                self.advance();
                self.var_declaration()
            }
            _ => self.statement(),
        };
        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }
    fn var_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let name = match self.peek().tokentype {
            TokenType::Identifier(_) => self.advance(),
            _ => return Err(self.error("Expect variable name.")),
        };
        let initializer = match self.peek().tokentype {
            TokenType::Equal => {
                self.advance();
                Some(self.expression()?)
            }
            _ => None,
        };
        self.consume_semicolon("Expect ';' after variable declaration.")?;
        Ok(Statement::Var { name, initializer })
    }
    fn statement(&mut self) -> ParseResult<Statement<'a>> {
        match self.peek().tokentype {
            TokenType::If => {
                self.advance();
                self.if_statement()
            }
            TokenType::Print => {
                self.advance();
                self.print_statement()
            }
            TokenType::LeftBrace => {
                self.advance();
                Ok(Statement::Block(self.block()?))
            }
            TokenType::While => {
                self.advance();
                self.while_statement()
            }
            TokenType::For => {
                self.advance();
                self.for_statement()
            }
            _ => self.expression_statement(),
        }
    }
    fn for_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.consume_left_paren("Expect '(' after 'for'.")?;
        let initializer = match self.peek().tokentype {
            TokenType::Semicolon => {
                self.advance();
                None
            }
            TokenType::Var => {
                self.advance();
                Some(self.var_declaration()?)
            }
            _ => Some(self.expression_statement()?),
        };

        let condition = match self.peek().tokentype {
            TokenType::Semicolon => Expression::Literal(Value::Boolean(true)),
            _ => self.expression()?,
        };
        self.consume_semicolon("Expect ';' after loop condition.")?;

        let increment = match self.peek().tokentype {
            TokenType::RightParen => None,
            _ => Some(self.expression()?),
        };
        self.consume_right_paren("Expect ')' after for clauses.")?;

        let mut body = self.statement()?;
        if let Some(x) = increment {
            body = Statement::Block(vec![Some(body), Some(Statement::Expression(x))]);
        }
        body = Statement::While {
            condition,
            body: Box::new(body),
        };
        match initializer {
            None => Ok(body),
            Some(x) => Ok(Statement::Block(vec![Some(x), Some(body)])),
        }
    }
    fn while_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.consume_left_paren("Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume_right_paren("Expect ')' after condition.")?;
        let body = self.statement()?;
        Ok(Statement::While {
            condition,
            body: Box::new(body),
        })
    }
    fn if_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.consume_left_paren("Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume_right_paren("Expect ')' after if condition.")?;
        let then_branch = Box::new(self.statement()?);
        // An `else` binds to the nearest `if`.
        let else_branch = match self.peek().tokentype {
            TokenType::Else => {
                self.advance();
                Some(Box::new(self.statement()?))
            }
            _ => None,
        };
        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }
    fn block(&mut self) -> ParseResult<Vec<Option<Statement<'a>>>> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let TokenType::RightBrace = self.peek().tokentype {
                break;
            }
            statements.push(self.declaration());
        }
        match self.peek().tokentype {
            TokenType::RightBrace => {
                self.advance();
                Ok(statements)
            }
            _ => Err(self.error("Expect '}' after block.")),
        }
    }
    fn print_statement(&mut self) -> ParseResult<Statement<'a>> {
        let expr = self.expression()?;
        self.consume_semicolon("Expect ';' after value.")?;
        Ok(Statement::Print(expr))
    }
    fn expression_statement(&mut self) -> ParseResult<Statement<'a>> {
        let expr = self.expression()?;
        self.consume_semicolon("Expect ';' after expression.")?;
        Ok(Statement::Expression(expr))
    }
    fn expression(&mut self) -> ParseResult<Expression<'a>> {
        self.assignment()
    }
    fn assignment(&mut self) -> ParseResult<Expression<'a>> {
        let expr = self.or()?;
        match self.peek().tokentype {
            TokenType::Equal => {
                let equals = self.advance();
                let value = self.assignment()?;
                match expr {
                    Expression::Variable(name) => Ok(Expression::Assign {
                        name,
                        value: Box::new(value),
                    }),
                    // Reported, but the parser is not confused.
                    _ => {
                        self.errors
                            .push(ParseError::at(equals, "Invalid assignment target."));
                        Ok(expr)
                    }
                }
            }
            _ => Ok(expr),
        }
    }
    fn or(&mut self) -> ParseResult<Expression<'a>> {
        let mut expr = self.and()?;
        while let TokenType::Or = self.peek().tokentype {
            let operator = self.advance();
            let right = self.and()?;
            expr = Expression::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn and(&mut self) -> ParseResult<Expression<'a>> {
        let mut expr = self.equality()?;
        while let TokenType::And = self.peek().tokentype {
            let operator = self.advance();
            let right = self.equality()?;
            expr = Expression::Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }
    fn equality(&mut self) -> ParseResult<Expression<'a>> {
        let mut expr = self.comparison()?;
        loop {
            match self.peek().tokentype {
                TokenType::BangEqual | TokenType::EqualEqual => {
                    let operator = self.advance();
                    let right = self.comparison()?;
                    expr = Expression::Binary {
                        left: Box::new(expr),
                        operator,
                        right: Box::new(right),
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }
    fn comparison(&mut self) -> ParseResult<Expression<'a>> {
        let mut expr = self.term()?;
        loop {
            match self.peek().tokentype {
                TokenType::Greater
                | TokenType::GreaterEqual
                | TokenType::Less
                | TokenType::LessEqual => {
                    let operator = self.advance();
                    let right = self.term()?;
                    expr = Expression::Binary {
                        left: Box::new(expr),
                        operator,
                        right: Box::new(right),
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }
    fn term(&mut self) -> ParseResult<Expression<'a>> {
        let mut expr = self.factor()?;
        loop {
            match self.peek().tokentype {
                TokenType::Minus | TokenType::Plus => {
                    let operator = self.advance();
                    let right = self.factor()?;
                    expr = Expression::Binary {
                        left: Box::new(expr),
                        operator,
                        right: Box::new(right),
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }
    fn factor(&mut self) -> ParseResult<Expression<'a>> {
        let mut expr = self.unary()?;
        loop {
            match self.peek().tokentype {
                TokenType::Slash | TokenType::Star => {
                    let operator = self.advance();
                    let right = self.unary()?;
                    expr = Expression::Binary {
                        left: Box::new(expr),
                        operator,
                        right: Box::new(right),
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }
    fn unary(&mut self) -> ParseResult<Expression<'a>> {
        match self.peek().tokentype {
            TokenType::Bang | TokenType::Minus => {
                let operator = self.advance();
                let right = self.unary()?;
                Ok(Expression::Unary {
                    operator,
                    right: Box::new(right),
                })
            }
            _ => self.primary(),
        }
    }
    fn primary(&mut self) -> ParseResult<Expression<'a>> {
        let literal = match self.peek().tokentype {
            TokenType::False => Value::Boolean(false),
            TokenType::True => Value::Boolean(true),
            TokenType::Nil => Value::Nil,
            TokenType::Number(x) => Value::Number(x),
            TokenType::String(x) => Value::String(x.to_string()),
            TokenType::Identifier(_) => return Ok(Expression::Variable(self.advance())),
            TokenType::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume_right_paren("Expect ')' after expression.")?;
                return Ok(Expression::Grouping(Box::new(expr)));
            }
            _ => return Err(self.error("Expect expression.")),
        };
        self.advance();
        Ok(Expression::Literal(literal))
    }
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if let TokenType::Semicolon = self.previous().tokentype {
                return;
            }
            match self.peek().tokentype {
                TokenType::Class
                | TokenType::Fun
                | TokenType::Var
                | TokenType::For
                | TokenType::If
                | TokenType::While
                | TokenType::Print
                | TokenType::Return => return,
                _ => (),
            }
            self.advance();
        }
        debug!("resynchronized at line {}", self.peek().line);
    }
    fn consume_semicolon(&mut self, message: &str) -> ParseResult<&'a Token<'a>> {
        match self.peek().tokentype {
            TokenType::Semicolon => Ok(self.advance()),
            _ => Err(self.error(message)),
        }
    }
    fn consume_left_paren(&mut self, message: &str) -> ParseResult<&'a Token<'a>> {
        match self.peek().tokentype {
            TokenType::LeftParen => Ok(self.advance()),
            _ => Err(self.error(message)),
        }
    }
    fn consume_right_paren(&mut self, message: &str) -> ParseResult<&'a Token<'a>> {
        match self.peek().tokentype {
            TokenType::RightParen => Ok(self.advance()),
            _ => Err(self.error(message)),
        }
    }
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }
    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }
    fn peek(&self) -> &'a Token<'a> {
        // Never past the trailing EOF token.
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current.saturating_sub(1)]
    }
    fn error(&self, message: &str) -> ParseError {
        ParseError::at(self.peek(), message)
    }
}
