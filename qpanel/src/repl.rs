use crate::panel::Panel;
use anyhow::Result;
use console::style;
use qpanel_types::{Context, ExitStatus};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Line-oriented read-eval loop over a panel.
pub struct Repl<'a> {
    panel: &'a mut Panel,
}

impl<'a> Repl<'a> {
    pub fn new(panel: &'a mut Panel) -> Self {
        Repl { panel }
    }

    /// Interactive mode: prompt, read a line, dispatch, repeat.
    pub fn run_interactive(&mut self, ctx: &Context) -> Result<()> {
        let greeting = format!(
            "{} — type an expression, or help for the tool list",
            style("qpanel").cyan().bold()
        );
        println!("{greeting}");
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            write!(stdout, "{} ", style("qp>").cyan().bold())?;
            stdout.flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }
            let status = self.panel.eval_line(ctx, &line);
            debug!("eval status: {:?}", status);
            if self.panel.should_exit() || status == ExitStatus::Break {
                break;
            }
        }
        Ok(())
    }

    /// Pipe mode: same dispatch over piped lines, no prompt.
    pub fn run_pipe(&mut self, ctx: &Context) -> Result<()> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let status = self.panel.eval_line(ctx, &line);
            debug!("eval status: {:?}", status);
            if self.panel.should_exit() || status == ExitStatus::Break {
                break;
            }
        }
        Ok(())
    }
}
