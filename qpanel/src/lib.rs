pub mod calculator;
pub mod environment;
pub mod errors;
pub mod panel;
pub mod repl;

pub use panel::{Expression, Panel};
