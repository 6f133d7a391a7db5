use super::token::Token;
use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(x) => write!(f, "{}", x),
            // Integral values print without a fractional part.
            Value::Number(x) => write!(f, "{}", x),
            Value::String(x) => write!(f, "{}", x),
        }
    }
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(x) => *x,
            Value::Number(_) | Value::String(_) => true,
        }
    }
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    Assign {
        name: &'a Token<'a>,
        value: Box<Expression<'a>>,
    },
    Binary {
        left: Box<Expression<'a>>,
        operator: &'a Token<'a>,
        right: Box<Expression<'a>>,
    },
    Grouping(Box<Expression<'a>>),
    Literal(Value),
    Logical {
        left: Box<Expression<'a>>,
        operator: &'a Token<'a>,
        right: Box<Expression<'a>>,
    },
    Unary {
        operator: &'a Token<'a>,
        right: Box<Expression<'a>>,
    },
    Variable(&'a Token<'a>),
}

pub trait Visitor<T, Output> {
    fn visit(&mut self, n: &T) -> Output;
}

impl<'a> Expression<'a> {
    pub fn accept<T, V: Visitor<Expression<'a>, T>>(&self, v: &mut V) -> T {
        v.visit(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `None` entries are declarations that failed to parse.
    Block(Vec<Option<Statement<'a>>>),
    Expression(Expression<'a>),
    If {
        condition: Expression<'a>,
        then_branch: Box<Statement<'a>>,
        else_branch: Option<Box<Statement<'a>>>,
    },
    Print(Expression<'a>),
    Var {
        name: &'a Token<'a>,
        initializer: Option<Expression<'a>>,
    },
    While {
        condition: Expression<'a>,
        body: Box<Statement<'a>>,
    },
}

impl<'a> Statement<'a> {
    pub fn accept<T, V: Visitor<Statement<'a>, T>>(&self, v: &mut V) -> T {
        v.visit(self)
    }
}

pub struct AstPrinter {}

impl AstPrinter {
    pub fn print(&mut self, statements: &[Option<Statement>]) -> String {
        statements
            .iter()
            .map(|stmt| match stmt {
                Some(stmt) => stmt.accept(self),
                None => String::from("<error>"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
    fn parenthesize(&mut self, name: &str, args: &[&Expression]) -> String {
        let mut x = String::from("(");
        x.push_str(name);
        for arg in args {
            x.push(' ');
            x.push_str(arg.accept(self).as_str());
        }
        x.push(')');
        x
    }
}

impl<'a> Visitor<Expression<'a>, String> for AstPrinter {
    fn visit(&mut self, n: &Expression<'a>) -> String {
        match n {
            Expression::Assign { name, value } => {
                format!("(= {} {})", name.lexeme, value.accept(self))
            }
            Expression::Binary {
                left,
                operator,
                right,
            }
            | Expression::Logical {
                left,
                operator,
                right,
            } => self.parenthesize(operator.lexeme, &[left.as_ref(), right.as_ref()]),
            Expression::Grouping(x) => self.parenthesize("group", &[x.as_ref()]),
            Expression::Literal(x) => x.to_string(),
            Expression::Unary { operator, right } => {
                self.parenthesize(operator.lexeme, &[right.as_ref()])
            }
            Expression::Variable(x) => x.lexeme.to_string(),
        }
    }
}

impl<'a> Visitor<Statement<'a>, String> for AstPrinter {
    fn visit(&mut self, n: &Statement<'a>) -> String {
        match n {
            Statement::Block(stmts) => {
                let mut x = String::from("(block");
                for stmt in stmts {
                    x.push(' ');
                    match stmt {
                        Some(stmt) => x.push_str(stmt.accept(self).as_str()),
                        None => x.push_str("<error>"),
                    }
                }
                x.push(')');
                x
            }
            Statement::Expression(e) => self.parenthesize(";", &[e]),
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut x = format!("(if {} {}", condition.accept(self), then_branch.accept(self));
                if let Some(else_branch) = else_branch {
                    x.push(' ');
                    x.push_str(else_branch.accept(self).as_str());
                }
                x.push(')');
                x
            }
            Statement::Print(e) => self.parenthesize("print", &[e]),
            Statement::Var { name, initializer } => match initializer {
                Some(e) => format!("(var {} {})", name.lexeme, e.accept(self)),
                None => format!("(var {})", name.lexeme),
            },
            Statement::While { condition, body } => {
                format!("(while {} {})", condition.accept(self), body.accept(self))
            }
        }
    }
}
