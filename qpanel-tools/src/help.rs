use super::PanelProxy;
use qpanel_types::{Context, ExitStatus};

/// Tool description for the help listing
pub fn description() -> &'static str {
    "List the available tools"
}

/// Tool entry point
pub fn command(ctx: &Context, _argv: Vec<String>, _proxy: &mut dyn PanelProxy) -> ExitStatus {
    let mut lines = vec![
        "Type an arithmetic expression to calculate it, or one of:".to_string(),
    ];
    for (name, desc) in super::list_tools() {
        lines.push(format!("  {name:<8} {desc}"));
    }
    lines.push("  =        evaluate the pending input (after replay)".to_string());
    match ctx.write_stdout(&lines.join("\n")) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            ctx.write_stderr(&format!("help: {err}")).ok();
            ExitStatus::ExitedWith(1)
        }
    }
}
