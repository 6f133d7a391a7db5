use crate::interpreter::RuntimeError;
use crate::parser::ParseError;
use crate::scanner::ScanError;
use log::debug;

/// Whether error flags survive from one run to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    ResetPerRun,
    Sticky,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::ResetPerRun
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    messages: Vec<String>,
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }
    pub fn scan_error(&mut self, error: ScanError) {
        debug!("scan error: {:?}", error);
        self.messages.push(error.to_string());
        self.had_error = true;
    }
    pub fn parse_error(&mut self, error: ParseError) {
        debug!("parse error: {:?}", error);
        self.messages.push(error.to_string());
        self.had_error = true;
    }
    pub fn runtime_error(&mut self, error: RuntimeError) {
        debug!("runtime error: {:?}", error);
        self.messages.push(error.to_string());
        self.had_runtime_error = true;
    }
    pub fn had_error(&self) -> bool {
        self.had_error
    }
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
    /// Takes the pending messages, leaving the flags untouched.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
    pub fn reset(&mut self) {
        self.messages.clear();
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use super::Diagnostics;
    use crate::interpreter::RuntimeError;
    use crate::scanner::ScanError;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_are_independent() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.scan_error(ScanError {
            line: 3,
            message: "Unexpected character.".to_string(),
        });
        assert!(diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());
        diagnostics.runtime_error(RuntimeError::Evaluation {
            line: 4,
            message: "Operand must be a number.".to_string(),
        });
        assert!(diagnostics.had_runtime_error());
        assert_eq!(
            diagnostics.messages(),
            &[
                "[line 3] Error: Unexpected character.".to_string(),
                "[line 4] Operand must be a number.".to_string(),
            ]
        );
    }

    #[test]
    fn drain_keeps_flags_and_reset_clears_them() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.scan_error(ScanError {
            line: 1,
            message: "Unterminated string.".to_string(),
        });
        assert_eq!(diagnostics.drain().len(), 1);
        assert!(diagnostics.messages().is_empty());
        assert!(diagnostics.had_error());
        diagnostics.reset();
        assert!(!diagnostics.had_error());
    }
}
