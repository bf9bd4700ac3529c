use super::PanelProxy;
use qpanel_types::{Context, ExitStatus};

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Load a history entry back into the calculator input (evaluate it with =)"
}

/// Tool entry point
///
/// Usage:
///   replay <entry-number>     (numbers as shown by history)
pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn PanelProxy) -> ExitStatus {
    let Some(raw) = argv.get(1) else {
        ctx.write_stderr("Usage: replay <entry-number>").ok();
        return ExitStatus::ExitedWith(1);
    };
    let Ok(index) = raw.parse::<usize>() else {
        ctx.write_stderr(&format!("replay: not an entry number: {raw}"))
            .ok();
        return ExitStatus::ExitedWith(1);
    };
    match proxy.replay(index) {
        Some(expression) => {
            proxy.set_input(&expression);
            match ctx.write_stdout(&format!("loaded: {expression}")) {
                Ok(_) => ExitStatus::ExitedWith(0),
                Err(err) => {
                    ctx.write_stderr(&format!("replay: {err}")).ok();
                    ExitStatus::ExitedWith(1)
                }
            }
        }
        None => {
            ctx.write_stderr(&format!("replay: no history entry {index}"))
                .ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
