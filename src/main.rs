use anyhow::Context;
use calculate::{calculate, init_tracing, EvalError};
use std::env;
use std::io::{self, Write};
use std::process::exit;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        let program = args.first().map_or("calculate", String::as_str);
        writeln!(
            io::stderr(),
            "Usage: {} <operand1> <operand2> <operator>",
            program
        )
        .context("writing usage")?;
        exit(1);
    }

    match calculate(&args[1], &args[2], &args[3], io::stdout().lock()) {
        Ok(_) => Ok(()),
        Err(EvalError::UnknownOperator(token)) => {
            writeln!(io::stderr(), "Unknown operator: {}", token).context("writing error")?;
            exit(1);
        }
        Err(error @ EvalError::Io(_)) => Err(error).context("writing to stdout"),
    }
}
