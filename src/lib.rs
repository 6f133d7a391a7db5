pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod interpreter;
pub mod parser;
pub mod runner;
pub mod scanner;
pub mod token;

pub use diagnostics::{Diagnostics, ErrorPolicy};
pub use runner::{Lox, Options, Outcome};
