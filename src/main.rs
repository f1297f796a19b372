use anyhow::Result;
use mdmerge::{RunOutcome, cli::parse_args, logging::setup_logger, run_mdmerge};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = parse_args()?;
    setup_logger(config.verbosity)?;

    match run_mdmerge(&config).await? {
        RunOutcome::Written { path, files } => {
            println!("Merged {files} files into {}", path.display());
        }
        RunOutcome::NothingToDo => {
            println!("No files left after filtering; nothing to do.");
        }
    }
    Ok(())
}
