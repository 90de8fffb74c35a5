use clap::Parser;
use driftlog::cli::Cli;
use driftlog::prompt::PromptError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    driftlog::init_logging();
    let cli = Cli::parse();

    tokio::select! {
        result = driftlog::run(cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) if is_cancelled(&err) => {
                println!("\nCancelled.");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nCancelled by user.");
            // A blocked stdin read would otherwise hold the runtime open.
            std::process::exit(0);
        }
    }
}

/// End of input during a prompt.
fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::Cancelled)
    )
}
