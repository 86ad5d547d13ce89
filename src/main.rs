use clap::{App, Arg};
use dpll::formula::dimacs::{parse, DimacsParseError};
use dpll::formula::Formula;
use dpll::*;
use std::fs::File;
use std::io::Write;

// Any input that cannot be read or parsed
const EXIT_BAD_INPUT: i32 = 47;

fn main() {
    env_logger::init();

    let matches = App::new("dpll")
        .about("Decides satisfiability of a DIMACS CNF formula")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .get_matches();

    let f = if let Some(path) = matches.value_of("INPUT") {
        log::info!("reading {}", path);
        match File::open(path) {
            Ok(file) => parse(file),
            Err(e) => {
                eprintln!("cannot open {}: {}", path, e);
                std::process::exit(EXIT_BAD_INPUT);
            }
        }
    } else {
        log::info!("reading standard input");
        parse(std::io::stdin())
    };

    match f {
        Ok(f) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = solve(f, &mut out) {
                eprintln!("cannot write result: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}", describe(&e));
            std::process::exit(EXIT_BAD_INPUT);
        }
    }
}

fn solve<W: Write>(f: Formula, out: &mut W) -> std::io::Result<()> {
    let mut solver = Solver::new(f);
    let result = solver.solve();
    write_result(out, &result)?;
    out.flush()
}

fn describe(e: &DimacsParseError) -> String {
    match e {
        DimacsParseError::Io(_) => format!("cannot read input: {}", e),
        _ => format!("parse error: {}", e),
    }
}
