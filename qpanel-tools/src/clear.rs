use super::PanelProxy;
use qpanel_types::{Context, ExitStatus};

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Clear the calculation history and its saved state"
}

/// Tool entry point
/// Clearing is delegated to the panel, which owns the history log
pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn PanelProxy) -> ExitStatus {
    match proxy.dispatch(ctx, "clear", argv) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            ctx.write_stderr(&format!("clear: {err}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
