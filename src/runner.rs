use crate::ast::AstPrinter;
use crate::diagnostics::{Diagnostics, ErrorPolicy};
use crate::interpreter::Interpreter;
use crate::parser;
use crate::scanner;
use log::debug;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    StaticError,
    RuntimeError,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::StaticError => 65,
            Outcome::RuntimeError => 70,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub print_tokens: bool,
    pub print_ast: bool,
    pub error_policy: ErrorPolicy,
}

pub struct Lox<W: Write = io::Stdout> {
    interpreter: Interpreter<W>,
    diagnostics: Diagnostics,
    options: Options,
}

impl Lox {
    pub fn new(options: Options) -> Lox {
        Lox::with_output(io::stdout(), options)
    }
}

impl<W: Write> Lox<W> {
    pub fn with_output(output: W, options: Options) -> Lox<W> {
        Lox {
            interpreter: Interpreter::with_output(output),
            diagnostics: Diagnostics::new(),
            options,
        }
    }
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
    pub fn output(&self) -> &W {
        self.interpreter.output()
    }
    pub fn run(&mut self, source: &str) -> Outcome {
        if self.options.error_policy == ErrorPolicy::ResetPerRun {
            self.diagnostics.reset();
        }

        let tokens = scanner::scan_tokens(source, &mut self.diagnostics);
        debug!("scanned {} tokens", tokens.len());
        if self.options.print_tokens {
            for token in &tokens {
                self.dump(token);
            }
        }

        let statements = parser::parse(&tokens, &mut self.diagnostics);
        if self.options.print_ast {
            let printed = AstPrinter {}.print(&statements);
            self.dump(&printed);
        }

        if self.diagnostics.had_error() {
            return Outcome::StaticError;
        }
        if let Err(err) = self.interpreter.interpret(&statements) {
            self.diagnostics.runtime_error(err);
        }
        if self.diagnostics.had_runtime_error() {
            Outcome::RuntimeError
        } else {
            Outcome::Success
        }
    }
    fn dump(&mut self, item: &dyn std::fmt::Display) {
        if let Err(e) = writeln!(self.interpreter.output_mut(), "{}", item) {
            debug!("failed to write dump: {}", e);
        }
    }
}

#[cfg(test)]
mod runner_tests {
    use super::{Lox, Options, Outcome};
    use crate::diagnostics::ErrorPolicy;
    use pretty_assertions::assert_eq;
    use std::io::{self, Write};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn session(options: Options) -> Lox<Vec<u8>> {
        Lox::with_output(Vec::new(), options)
    }

    fn output(lox: &Lox<Vec<u8>>) -> String {
        String::from_utf8(lox.output().clone()).unwrap()
    }

    #[test]
    fn static_errors_skip_interpretation() {
        let mut lox = session(Options::default());
        assert_eq!(lox.run("print 1; print 2 +;"), Outcome::StaticError);
        assert_eq!(output(&lox), "");
        assert_eq!(Outcome::StaticError.exit_code(), 65);
    }

    #[test]
    fn globals_survive_between_runs() {
        let mut lox = session(Options::default());
        assert_eq!(lox.run("var a = 40;"), Outcome::Success);
        assert_eq!(lox.run("print a + 2;"), Outcome::Success);
        assert_eq!(output(&lox), "42\n");
    }

    #[test]
    fn reset_policy_forgets_earlier_errors() {
        let mut lox = session(Options::default());
        assert_eq!(lox.run("print -nil;"), Outcome::RuntimeError);
        assert_eq!(lox.run("@"), Outcome::StaticError);
        assert_eq!(lox.run("print 1;"), Outcome::Success);
        assert_eq!(output(&lox), "1\n");
    }

    #[test]
    fn sticky_policy_keeps_errors() {
        let mut lox = session(Options {
            error_policy: ErrorPolicy::Sticky,
            ..Options::default()
        });
        assert_eq!(lox.run("print -nil;"), Outcome::RuntimeError);
        assert_eq!(lox.run("print 1;"), Outcome::RuntimeError);
        assert_eq!(lox.run("@"), Outcome::StaticError);
        assert_eq!(lox.run("print 2;"), Outcome::StaticError);
        assert_eq!(output(&lox), "1\n");
        assert_eq!(lox.diagnostics().messages().len(), 2);
    }

    #[test]
    fn failed_print_is_a_runtime_error() {
        let mut lox = Lox::with_output(BrokenPipe, Options::default());
        assert_eq!(lox.run("print 1;"), Outcome::RuntimeError);
        assert_eq!(
            lox.diagnostics().messages(),
            &["Failed to write output: closed".to_string()]
        );
        assert_eq!(lox.run("var a = 1;"), Outcome::Success);
    }

    #[test]
    fn dumps_go_to_the_output() {
        let mut lox = session(Options {
            print_tokens: true,
            print_ast: true,
            ..Options::default()
        });
        assert_eq!(lox.run("print 1;"), Outcome::Success);
        assert_eq!(
            output(&lox),
            "PRINT print\nNUMBER 1 1\nSEMICOLON ;\nEOF \n(print 1)\n1\n"
        );
    }
}
