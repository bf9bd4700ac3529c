use anyhow::Result;
use once_cell::sync::Lazy;
use qpanel_types::{Context, ExitStatus};
use std::collections::HashMap;

// Tool command modules
pub mod age;
mod clear;
pub mod convert;
pub mod date;
mod exit;
mod help;
mod history;
mod replay;

/// Trait that provides an interface for tools to interact with the panel
/// This allows tools to reach panel-owned state (the history log and the
/// pending calculator input) without direct coupling
pub trait PanelProxy {
    /// Initiates panel exit process
    fn exit_panel(&mut self);

    /// Dispatches a command to the panel's own handlers
    /// Used for commands that operate on panel-owned state
    fn dispatch(&mut self, ctx: &Context, cmd: &str, argv: Vec<String>) -> Result<()>;

    /// Loads an expression into the panel's pending calculator input
    fn set_input(&mut self, expr: &str);

    /// Returns the stored expression of a history entry by its 1-based
    /// number as shown by `history`, without re-evaluating it
    fn replay(&mut self, index: usize) -> Option<String>;
}

/// Type alias for tool command function signature
/// All tool commands must conform to this signature
pub type ToolCommand =
    fn(ctx: &Context, argv: Vec<String>, proxy: &mut dyn PanelProxy) -> ExitStatus;

/// Global registry of all tool commands
static TOOL_COMMAND: Lazy<HashMap<&'static str, ToolCommand>> = Lazy::new(|| {
    let mut tools: HashMap<&'static str, ToolCommand> = HashMap::new();
    tools.insert("convert", convert::command);
    tools.insert("age", age::command);
    tools.insert("date", date::command);
    tools.insert("history", history::command);
    tools.insert("clear", clear::command);
    tools.insert("replay", replay::command);
    tools.insert("help", help::command);
    tools.insert("exit", exit::command);
    tools.insert("quit", exit::command);
    tools
});

/// Look up a tool command by its leading word
pub fn get_command(name: &str) -> Option<ToolCommand> {
    TOOL_COMMAND.get(name).copied()
}

/// Names and one-line descriptions of all registered tools, sorted by name
pub fn list_tools() -> Vec<(&'static str, &'static str)> {
    let mut tools = vec![
        ("convert", convert::description()),
        ("age", age::description()),
        ("date", date::description()),
        ("history", history::description()),
        ("clear", clear::description()),
        ("replay", replay::description()),
        ("help", help::description()),
        ("exit", exit::description()),
    ];
    tools.sort_by_key(|(name, _)| *name);
    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert!(get_command("convert").is_some());
        assert!(get_command("age").is_some());
        assert!(get_command("date").is_some());
        assert!(get_command("history").is_some());
        assert!(get_command("quit").is_some());
        assert!(get_command("2+3").is_none());
        assert!(get_command("").is_none());
    }

    #[test]
    fn test_list_tools_sorted() {
        let tools = list_tools();
        let names: Vec<&str> = tools.iter().map(|(name, _)| *name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(tools.iter().all(|(_, desc)| !desc.is_empty()));
    }
}
