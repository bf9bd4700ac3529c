use crate::calculator::{self, EvalError};
use anyhow::{Result, bail};
use chrono::{Local, TimeZone};
use qpanel_history::HistoryLog;
use qpanel_tools::PanelProxy;
use qpanel_types::{Context, ExitStatus};
use tabled::{Table, Tabled};
use tracing::debug;

/// The pending calculator input.
///
/// No semantic structure until evaluation; mutated only by append,
/// truncate-last-character, reset, or wholesale replacement.
#[derive(Debug, Default, Clone)]
pub struct Expression {
    buf: String,
}

impl Expression {
    pub fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn backspace(&mut self) {
        self.buf.pop();
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn replace(&mut self, s: &str) {
        self.buf.clear();
        self.buf.push_str(s);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    expression: String,
    result: String,
    time: String,
}

/// The utility panel: owns the history log and the pending calculator
/// input, and dispatches one line of user input at a time.
///
/// Constructed once at startup and passed by reference; nothing here is
/// ambient or shared.
pub struct Panel {
    history: HistoryLog,
    input: Expression,
    exit: bool,
}

impl Panel {
    pub fn new(history: HistoryLog) -> Self {
        Panel {
            history,
            input: Expression::default(),
            exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    /// Dispatch one line of user input.
    ///
    /// A leading word naming a registered tool runs that tool; `=`
    /// evaluates the pending input; everything else is calculator input.
    pub fn eval_line(&mut self, ctx: &Context, line: &str) -> ExitStatus {
        let line = line.trim();
        debug!("eval line: {:?}", line);
        if line.is_empty() {
            return ExitStatus::ExitedWith(0);
        }
        if line == "=" {
            return self.eval_pending(ctx);
        }
        let argv: Vec<String> = line.split_whitespace().map(|s| s.to_string()).collect();
        if let Some(cmd) = qpanel_tools::get_command(&argv[0]) {
            return cmd(ctx, argv, self);
        }
        self.eval_expression(ctx, line)
    }

    fn eval_expression(&mut self, ctx: &Context, raw: &str) -> ExitStatus {
        if !calculator::validate(raw) {
            // disallowed characters never reach the evaluator and the
            // pending input stays as it was
            ctx.write_stderr("invalid characters in expression (unknown tool? try help)")
                .ok();
            return ExitStatus::ExitedWith(1);
        }
        // a line starting with a binary operator continues the previous
        // result, mirroring chained calculation on the keypad
        if raw.starts_with(['+', '*', '/']) && !self.input.is_empty() {
            self.input.push_str(raw);
        } else {
            self.input.replace(raw);
        }
        self.eval_pending(ctx)
    }

    fn eval_pending(&mut self, ctx: &Context) -> ExitStatus {
        if self.input.is_empty() {
            return ExitStatus::ExitedWith(0);
        }
        match calculator::evaluate(self.input.as_str()) {
            Ok(value) => {
                let result = calculator::format_result(value);
                ctx.write_stdout(&result).ok();
                self.history.append(self.input.as_str(), &result);
                // the result becomes the next pending input so the user
                // can keep operating on it
                self.input.replace(&result);
                ExitStatus::ExitedWith(0)
            }
            Err(EvalError::Syntax(msg)) => {
                debug!("syntax error in {:?}: {}", self.input.as_str(), msg);
                ctx.write_stdout("Error").ok();
                self.input.reset();
                ExitStatus::ExitedWith(1)
            }
        }
    }

    fn render_history(&self, ctx: &Context) -> Result<()> {
        if self.history.is_empty() {
            return ctx.write_stdout("history is empty");
        }
        // newest first is a display concern; the log itself stays
        // chronological
        let rows: Vec<HistoryRow> = self
            .history
            .records()
            .iter()
            .enumerate()
            .rev()
            .map(|(index, record)| HistoryRow {
                index: index + 1,
                expression: record.expression.clone(),
                result: record.result.clone(),
                time: format_timestamp(record.timestamp),
            })
            .collect();
        let table = Table::new(rows).to_string();
        ctx.write_stdout(&table)
    }
}

impl PanelProxy for Panel {
    fn exit_panel(&mut self) {
        debug!("exit panel");
        self.exit = true;
    }

    fn dispatch(&mut self, ctx: &Context, cmd: &str, _argv: Vec<String>) -> Result<()> {
        match cmd {
            "history" => self.render_history(ctx),
            "clear" => {
                self.history.clear();
                ctx.write_stdout("history cleared")
            }
            _ => bail!("unknown panel command: {cmd}"),
        }
    }

    fn set_input(&mut self, expr: &str) {
        self.input.replace(expr);
    }

    fn replay(&mut self, index: usize) -> Option<String> {
        index
            .checked_sub(1)
            .and_then(|i| self.history.replay(i))
            .map(|expr| expr.to_string())
    }
}

fn format_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Panel {
        Panel::new(HistoryLog::new())
    }

    fn ctx() -> Context {
        Context::new()
    }

    #[test]
    fn test_expression_editing() {
        let mut expr = Expression::default();
        expr.push_str("12");
        expr.push_str("+3");
        assert_eq!(expr.as_str(), "12+3");
        expr.backspace();
        assert_eq!(expr.as_str(), "12+");
        expr.reset();
        assert!(expr.is_empty());
        expr.backspace(); // harmless on empty input
        assert!(expr.is_empty());
    }

    #[test]
    fn test_arithmetic_line_appends_history() {
        let mut panel = panel();
        let status = panel.eval_line(&ctx(), "2+3*4");
        assert_eq!(status, ExitStatus::ExitedWith(0));
        assert_eq!(panel.history().len(), 1);
        let record = &panel.history().records()[0];
        assert_eq!(record.expression, "2+3*4");
        assert_eq!(record.result, "14");
        // result becomes the pending input
        assert_eq!(panel.input(), "14");
    }

    #[test]
    fn test_chained_calculation() {
        let mut panel = panel();
        panel.eval_line(&ctx(), "2+3");
        let status = panel.eval_line(&ctx(), "*4");
        assert_eq!(status, ExitStatus::ExitedWith(0));
        let record = panel.history().records().last().unwrap();
        assert_eq!(record.expression, "5*4");
        assert_eq!(record.result, "20");
    }

    #[test]
    fn test_syntax_error_resets_pending_input() {
        let mut panel = panel();
        let status = panel.eval_line(&ctx(), "2+");
        assert_eq!(status, ExitStatus::ExitedWith(1));
        assert!(panel.input().is_empty());
        assert!(panel.history().is_empty());
    }

    #[test]
    fn test_invalid_characters_leave_pending_input() {
        let mut panel = panel();
        panel.eval_line(&ctx(), "2+3");
        let status = panel.eval_line(&ctx(), "2+x~");
        assert_eq!(status, ExitStatus::ExitedWith(1));
        assert_eq!(panel.input(), "5");
        assert_eq!(panel.history().len(), 1);
    }

    #[test]
    fn test_division_by_zero_is_recorded() {
        let mut panel = panel();
        let status = panel.eval_line(&ctx(), "1/0");
        assert_eq!(status, ExitStatus::ExitedWith(0));
        let record = panel.history().records().last().unwrap();
        assert_eq!(record.result, "Infinity");
    }

    #[test]
    fn test_replay_loads_without_reevaluating() {
        let mut panel = panel();
        panel.eval_line(&ctx(), "12/4");
        panel.eval_line(&ctx(), "5*5");
        assert_eq!(panel.history().len(), 2);

        let status = panel.eval_line(&ctx(), "replay 1");
        assert_eq!(status, ExitStatus::ExitedWith(0));
        assert_eq!(panel.input(), "12/4");
        // nothing was appended by the replay itself
        assert_eq!(panel.history().len(), 2);

        let status = panel.eval_line(&ctx(), "=");
        assert_eq!(status, ExitStatus::ExitedWith(0));
        assert_eq!(panel.history().len(), 3);
        let record = panel.history().records().last().unwrap();
        assert_eq!(record.expression, "12/4");
        assert_eq!(record.result, "3");
    }

    #[test]
    fn test_replay_out_of_range() {
        let mut panel = panel();
        panel.eval_line(&ctx(), "1+1");
        assert_eq!(panel.eval_line(&ctx(), "replay 0"), ExitStatus::ExitedWith(1));
        assert_eq!(panel.eval_line(&ctx(), "replay 2"), ExitStatus::ExitedWith(1));
    }

    #[test]
    fn test_clear_tool_empties_history() {
        let mut panel = panel();
        panel.eval_line(&ctx(), "1+1");
        let status = panel.eval_line(&ctx(), "clear");
        assert_eq!(status, ExitStatus::ExitedWith(0));
        assert!(panel.history().is_empty());
    }

    #[test]
    fn test_exit_tool_sets_flag() {
        let mut panel = panel();
        let status = panel.eval_line(&ctx(), "exit");
        assert_eq!(status, ExitStatus::Break);
        assert!(panel.should_exit());
    }

    #[test]
    fn test_results_survive_a_restart() {
        let dir = tempfile::TempDir::new().unwrap();
        let slot = dir.path().join(qpanel_history::STORAGE_SLOT);

        let mut panel = Panel::new(HistoryLog::with_path(slot.clone()));
        panel.eval_line(&ctx(), "12/4");
        panel.eval_line(&ctx(), "5*5");
        drop(panel);

        let mut history = HistoryLog::with_path(slot);
        assert_eq!(history.load_from_storage(), 2);
        let panel = Panel::new(history);
        let exprs: Vec<&str> = panel
            .history()
            .records()
            .iter()
            .map(|r| r.expression.as_str())
            .collect();
        assert_eq!(exprs, vec!["12/4", "5*5"]);
    }

    #[test]
    fn test_empty_line_is_a_no_op() {
        let mut panel = panel();
        assert_eq!(panel.eval_line(&ctx(), "   "), ExitStatus::ExitedWith(0));
        assert!(panel.history().is_empty());
        assert!(panel.input().is_empty());
    }
}
