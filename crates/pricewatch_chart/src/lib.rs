pub mod figure;
pub mod font;
pub mod render;

pub use figure::{Figure, Marker};
pub use render::{render_png, ChartError, ChartOptions};
