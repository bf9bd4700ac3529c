use super::PanelProxy;
use qpanel_types::{Context, ExitStatus};

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Show past calculations, newest first"
}

/// Tool entry point
/// Rendering is delegated to the panel, which owns the history log
pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn PanelProxy) -> ExitStatus {
    match proxy.dispatch(ctx, "history", argv) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            ctx.write_stderr(&format!("history: {err}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
