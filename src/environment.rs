use super::ast::Value;
use super::interpreter::RuntimeError;
use super::token::Token;
use log::trace;

use std::collections::BTreeMap;

// Innermost scope last; the global scope is never popped.
#[derive(Debug)]
pub struct Environment {
    values: Vec<BTreeMap<String, Value>>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            values: vec![BTreeMap::new()],
        }
    }
    pub fn start_block(&mut self) {
        self.values.push(BTreeMap::new());
        trace!("entered scope, depth {}", self.values.len());
    }
    pub fn end_block(&mut self) {
        if self.values.len() > 1 {
            self.values.pop();
        }
        trace!("left scope, depth {}", self.values.len());
    }
    pub fn depth(&self) -> usize {
        self.values.len()
    }
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.values.last_mut() {
            scope.insert(name.to_string(), value);
        }
    }
    pub fn get(&self, token: &Token) -> Result<Value, RuntimeError> {
        for cur in self.values.iter().rev() {
            if let Some(x) = cur.get(token.lexeme) {
                return Ok(x.clone());
            }
        }
        Err(undefined(token))
    }
    pub fn assign(&mut self, token: &Token, value: Value) -> Result<(), RuntimeError> {
        for cur in self.values.iter_mut().rev() {
            if let Some(x) = cur.get_mut(token.lexeme) {
                *x = value;
                return Ok(());
            }
        }
        Err(undefined(token))
    }
}

fn undefined(token: &Token) -> RuntimeError {
    RuntimeError::new(token, format!("Undefined variable '{}'.", token.lexeme))
}
