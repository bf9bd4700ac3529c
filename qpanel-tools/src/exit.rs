use super::PanelProxy;
use qpanel_types::{Context, ExitStatus};

/// Tool description for the help listing
pub fn description() -> &'static str {
    "Leave the panel"
}

/// Tool entry point
pub fn command(_ctx: &Context, _argv: Vec<String>, proxy: &mut dyn PanelProxy) -> ExitStatus {
    proxy.exit_panel();
    ExitStatus::Break
}
