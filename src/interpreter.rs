use crate::ast::{Expression, Statement, Value, Visitor};
use crate::environment::Environment;
use crate::token::{Token, TokenType};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("[line {line}] {message}")]
    Evaluation { line: usize, message: String },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> RuntimeError {
        RuntimeError::Evaluation {
            line: token.line,
            message: message.into(),
        }
    }
}

type EvalResult<T> = Result<T, RuntimeError>;

pub struct Interpreter<W: Write = io::Stdout> {
    environment: Environment,
    output: W,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter::with_output(io::stdout())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl<'a, W: Write> Visitor<Expression<'a>, EvalResult<Value>> for Interpreter<W> {
    fn visit(&mut self, expr: &Expression<'a>) -> EvalResult<Value> {
        match expr {
            Expression::Literal(x) => Ok(x.clone()),
            Expression::Grouping(x) => self.evaluate(x),
            Expression::Unary { operator, right } => {
                let rv = self.evaluate(right)?;
                match operator.tokentype {
                    TokenType::Minus => match rv {
                        Value::Number(r) => Ok(Value::Number(-r)),
                        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
                    },
                    TokenType::Bang => Ok(Value::Boolean(!rv.is_truthy())),
                    _ => unreachable!("parser only builds unary '-' and '!'"),
                }
            }
            Expression::Binary {
                left,
                operator,
                right,
            } => {
                let lv = self.evaluate(left)?;
                let rv = self.evaluate(right)?;
                binary(operator, lv, rv)
            }
            Expression::Variable(token) => self.environment.get(token),
            Expression::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }
            Expression::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let short_circuit = match operator.tokentype {
                    TokenType::Or => left.is_truthy(),
                    _ => !left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
        }
    }
}

impl<'a, W: Write> Visitor<Statement<'a>, EvalResult<()>> for Interpreter<W> {
    fn visit(&mut self, stmt: &Statement<'a>) -> EvalResult<()> {
        match stmt {
            Statement::Print(e) => {
                let val = self.evaluate(e)?;
                writeln!(self.output, "{}", val)?;
            }
            Statement::Expression(e) => {
                self.evaluate(e)?;
            }
            Statement::Var { name, initializer } => {
                let val = match initializer {
                    Some(e) => self.evaluate(e)?,
                    None => Value::Nil,
                };
                self.environment.define(name.lexeme, val);
            }
            Statement::Block(stmts) => self.execute_block(stmts)?,
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
            }
            Statement::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(output: W) -> Interpreter<W> {
        Interpreter {
            environment: Environment::new(),
            output,
        }
    }
    pub fn output(&self) -> &W {
        &self.output
    }
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
    fn evaluate(&mut self, expr: &Expression) -> EvalResult<Value> {
        expr.accept(self)
    }
    pub fn execute(&mut self, stmt: &Statement) -> EvalResult<()> {
        stmt.accept(self)
    }
    /// Runs the statements in a fresh scope. The enclosing scope is restored
    /// whether or not a statement fails.
    fn execute_block(&mut self, statements: &[Option<Statement>]) -> EvalResult<()> {
        self.environment.start_block();
        let result = statements
            .iter()
            .flatten()
            .try_for_each(|stmt| self.execute(stmt));
        self.environment.end_block();
        result
    }
    pub fn interpret(&mut self, statements: &[Option<Statement>]) -> EvalResult<()> {
        for stmt in statements.iter().flatten() {
            self.execute(stmt)?;
        }
        self.output.flush()?;
        Ok(())
    }
}

fn binary(operator: &Token, lv: Value, rv: Value) -> EvalResult<Value> {
    match operator.tokentype {
        TokenType::EqualEqual => Ok(Value::Boolean(lv.equals(&rv))),
        TokenType::BangEqual => Ok(Value::Boolean(!lv.equals(&rv))),
        TokenType::Plus => match (lv, rv) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
            (Value::String(mut l), Value::String(r)) => {
                l.push_str(r.as_str());
                Ok(Value::String(l))
            }
            _ => Err(RuntimeError::new(
                operator,
                "Operands must be two numbers or two strings.",
            )),
        },
        _ => {
            let (l, r) = match (lv, rv) {
                (Value::Number(l), Value::Number(r)) => (l, r),
                _ => return Err(RuntimeError::new(operator, "Operands must be numbers.")),
            };
            match operator.tokentype {
                TokenType::Minus => Ok(Value::Number(l - r)),
                TokenType::Slash => Ok(Value::Number(l / r)),
                TokenType::Star => Ok(Value::Number(l * r)),
                TokenType::Greater => Ok(Value::Boolean(l > r)),
                TokenType::GreaterEqual => Ok(Value::Boolean(l >= r)),
                TokenType::Less => Ok(Value::Boolean(l < r)),
                TokenType::LessEqual => Ok(Value::Boolean(l <= r)),
                _ => unreachable!("parser only builds binary operators"),
            }
        }
    }
}
