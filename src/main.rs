//! kbcomplete CLI - interactive Knuth-Bendix completion.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kbcomplete::completion::CompletionResult;
use kbcomplete::repl::Repl;

#[derive(Parser)]
#[command(name = "kbcomplete")]
#[command(about = "Unification and interactive Knuth-Bendix completion")]
#[command(version)]
struct Cli {
    /// Equation files to load before starting
    files: Vec<String>,

    /// Run automatic completion and exit instead of prompting
    #[arg(long)]
    auto: bool,

    /// Step limit for automatic completion
    #[arg(long)]
    max_steps: Option<usize>,

    /// Print the performed steps as JSON on exit
    #[arg(long)]
    trace_json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut repl = Repl::new();
    if let Some(max) = cli.max_steps {
        repl.session_mut().config_mut().max_steps = Some(max);
    }

    for file in &cli.files {
        match repl.load_file(file) {
            Ok(msg) => {
                if !cli.auto {
                    println!("{}", msg);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let mut status = 0;
    if cli.auto {
        match repl.session_mut().run() {
            Ok(result) => {
                print!("{}", repl.session().render_state());
                match result {
                    CompletionResult::Complete { steps } => {
                        println!("Completed after {} steps.", steps)
                    }
                    CompletionResult::Stuck { steps, pending } => {
                        println!("Stuck after {} steps with {} equations.", steps, pending);
                        status = 2;
                    }
                    CompletionResult::StepLimit { steps } => {
                        println!("Stopped at the step limit ({} steps).", steps);
                        status = 2;
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("kbcomplete - Knuth-Bendix completion");
        println!("Type :help for help, :quit to exit.\n");
        if let Err(e) = repl.run() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.trace_json {
        match repl.session().snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
    std::process::exit(status);
}
