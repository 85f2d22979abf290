//! Terminal page: input boxes, details regions, move list and results

pub mod event_loop;
pub mod state;
pub mod terminal;
pub mod widgets;

pub use event_loop::run;
pub use state::{Focus, LogCategory, LogEntry, PageUI, UiCommand};
pub use terminal::{TerminalGuard, Tui};
