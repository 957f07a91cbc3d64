pub mod format;
pub mod render;
pub mod summary;

pub use render::{render_html, render_table};
pub use summary::{summarize, InsufficientDataError, SummaryReport};
