use anyhow::Result;
use clap::Parser;
use qpanel::environment;
use qpanel::errors::display_user_error;
use qpanel::panel::Panel;
use qpanel::repl::Repl;
use qpanel_history::{HistoryLog, STORAGE_SLOT};
use qpanel_types::{Context, ExitStatus};
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Evaluate one line (an expression or a tool invocation) and exit
    #[arg(short, long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing() {
        // logging is best effort; the panel works without it
        eprintln!("Failed to initialize tracing: {err}");
    }
    run_panel(cli)
}

fn init_tracing() -> Result<()> {
    let log_path = environment::get_state_file("qp.log")?;
    let log_file = std::sync::Arc::new(std::fs::File::create(log_path)?);
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qpanel=info".into()),
        )
        .with_writer(log_file)
        .init();
    Ok(())
}

fn load_history() -> HistoryLog {
    let mut history = match environment::get_data_file(STORAGE_SLOT) {
        Ok(path) => HistoryLog::with_path(path),
        Err(err) => {
            // degrade to in-memory only operation
            warn!("history storage unavailable: {err:#}");
            HistoryLog::new()
        }
    };
    let loaded = history.load_from_storage();
    debug!("loaded {} history records", loaded);
    history
}

fn run_panel(cli: Cli) -> ExitCode {
    let mut panel = Panel::new(load_history());
    let ctx = Context::new();

    if let Some(line) = cli.command.as_deref() {
        return match panel.eval_line(&ctx, line) {
            ExitStatus::ExitedWith(code) => ExitCode::from(code.clamp(0, 255) as u8),
            ExitStatus::Break => ExitCode::SUCCESS,
        };
    }

    let mut repl = Repl::new(&mut panel);
    let result = if ctx.interactive {
        debug!("running in interactive mode");
        repl.run_interactive(&ctx)
    } else {
        debug!("running in pipe mode");
        repl.run_pipe(&ctx)
    };
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            display_user_error(&err);
            ExitCode::FAILURE
        }
    }
}
