//! Command line front end for inspecting and lowering argument literals.
//!
//! ```text
//! lambda-arg describe eu8:5 u32[2x3]:1,2,3,4,5,6
//! lambda-arg lower --signature "eint<8>, tensor<2x3xint<32>>" eu8:5 u32[2x3]:1,2,3,4,5,6
//! ```

use bumpalo::Bump;
use clap::{Parser, Subcommand};
use lambda_args::literal::{parse_argument, parse_signature};
use lambda_args::x64::{lower_arguments, lower_call, CallFrame};
use lambda_args::{ArgResult, LambdaArgument};

#[derive(Parser, Debug)]
#[command(name = "lambda-arg", version, about = "Inspect and lower compiled-function arguments")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG is used otherwise.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the type of each argument.
    Describe {
        /// Argument literals, e.g. `eu8:5` or `u32[2x3]:1,2,3,4,5,6`.
        #[arg(required = true)]
        args: Vec<String>,
    },
    /// Lower arguments onto the System V calling convention.
    Lower {
        /// Check the arguments against this signature first, e.g. `eint<8>, int<8>`.
        #[arg(short, long)]
        signature: Option<String>,

        /// Argument literals.
        args: Vec<String>,
    },
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
        }
    }
    builder.init();
}

fn parse_all(literals: &[String]) -> ArgResult<Vec<LambdaArgument>> {
    literals.iter().map(|text| parse_argument(text)).collect()
}

/// One line describing argument `index`.
fn describe_line(index: usize, arg: &LambdaArgument) -> ArgResult<String> {
    Ok(match arg {
        LambdaArgument::Int(scalar) | LambdaArgument::EInt(scalar) => format!(
            "#{index}: {} = {} (precision {})",
            arg.type_name(),
            scalar,
            scalar.precision()
        ),
        LambdaArgument::Tensor(tensor) | LambdaArgument::ETensor(tensor) => format!(
            "#{index}: {}{} ({} elements)",
            arg.type_name(),
            tensor,
            tensor.num_elements()?
        ),
    })
}

/// One line per lowered word, followed by the stack size.
fn frame_lines(frame: &CallFrame<'_>) -> Vec<String> {
    let mut lines: Vec<_> = frame
        .words()
        .iter()
        .map(|word| {
            format!(
                "#{} {:<10} {:#018x} -> {}",
                word.arg_index,
                word.kind.to_string(),
                word.value,
                word.location()
            )
        })
        .collect();
    lines.push(format!("stack: {} bytes", frame.stack_size()));
    lines
}

fn run(cli: Cli) -> ArgResult<()> {
    match cli.command {
        Command::Describe { args } => {
            for (index, arg) in parse_all(&args)?.iter().enumerate() {
                println!("{}", describe_line(index, arg)?);
            }
            Ok(())
        }
        Command::Lower { signature, args } => {
            let args = parse_all(&args)?;
            let arena = Bump::new();
            let frame = match signature {
                Some(text) => lower_call(&arena, &parse_signature(&text)?, &args)?,
                None => lower_arguments(&arena, &args)?,
            };
            for line in frame_lines(&frame) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
