//! Text output for plans outside the interactive viewer.

mod print;

pub use print::{render_plan, should_use_color, PrintReporter};
