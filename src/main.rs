use clap::{App, Arg, ErrorKind};
use log::{debug, error};
use rlox::{ErrorPolicy, Lox, Options, Outcome};
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

fn main() {
    env_logger::init();

    let matches = App::new("rlox")
        .about("Tree-walking interpreter for Lox")
        .arg(
            Arg::with_name("script")
                .help("Script to run; starts a prompt when absent")
                .index(1),
        )
        .arg(
            Arg::with_name("tokens")
                .long("tokens")
                .help("Print the scanned tokens before running"),
        )
        .arg(
            Arg::with_name("ast")
                .long("ast")
                .help("Print the parsed syntax tree before running"),
        )
        .arg(
            Arg::with_name("sticky-errors")
                .long("sticky-errors")
                .help("Keep error flags set for the rest of the session"),
        )
        .get_matches_safe()
        .unwrap_or_else(|e| match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                eprintln!("{}", e.message);
                process::exit(64);
            }
        });

    let options = Options {
        print_tokens: matches.is_present("tokens"),
        print_ast: matches.is_present("ast"),
        error_policy: if matches.is_present("sticky-errors") {
            ErrorPolicy::Sticky
        } else {
            ErrorPolicy::ResetPerRun
        },
    };
    debug!("{:?}", options);

    match matches.value_of("script") {
        Some(script) => run_file(script, options),
        None => run_prompt(options),
    }
}

fn run_file(file: &str, options: Options) {
    let contents = match fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(e) => {
            error!("could not read {}: {}", file, e);
            eprintln!("Could not read '{}': {}", file, e);
            process::exit(66);
        }
    };
    let mut lox = Lox::new(options);
    let outcome = lox.run(&contents);
    report(&mut lox);
    if outcome != Outcome::Success {
        process::exit(outcome.exit_code());
    }
}

fn run_prompt(options: Options) {
    let mut lox = Lox::new(options);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                lox.run(&line);
                report(&mut lox);
            }
            Err(e) => {
                error!("failed to read line: {}", e);
                break;
            }
        }
    }
}

fn report(lox: &mut Lox) {
    for message in lox.diagnostics_mut().drain() {
        eprintln!("{}", message);
    }
}
