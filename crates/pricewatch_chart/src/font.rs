use plotters::style::{register_font, FontStyle};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Family name every chart text element is drawn with.
pub const FAMILY: &str = "sans-serif";

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Loads the TrueType font at `path` as [`FAMILY`] the first time it is
/// called; later calls report the outcome of that first attempt.
pub fn ensure_registered(path: &Path) -> bool {
    *REGISTERED.get_or_init(|| register(path))
}

fn register(path: &Path) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(path = %path.display(), %error, "chart font unavailable");
            return false;
        }
    };

    // The font registry keeps the bytes for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font(FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => {
            debug!(path = %path.display(), "chart font registered");
            true
        }
        Err(_) => {
            warn!(path = %path.display(), "chart font is not a valid TrueType font");
            false
        }
    }
}
