use crate::SatResult;
use std::io::{self, Write};

/// Writes the verdict: `NOT SATISFIABLE`, or `SATISFIABLE` followed by one signed literal per
/// variable in increasing order.
pub fn write_result<W: Write>(out: &mut W, result: &SatResult) -> io::Result<()> {
    match result {
        SatResult::Unsatisfiable => writeln!(out, "NOT SATISFIABLE"),
        SatResult::Satisfiable(model) => {
            writeln!(out, "SATISFIABLE")?;
            let literals: Vec<String> = model.literals().map(|l| l.to_string()).collect();
            writeln!(out, "{}", literals.join(" "))
        }
    }
}
