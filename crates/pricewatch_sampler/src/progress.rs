use std::time::Duration;

/// Observer for the human-facing side of a sampling run.
pub trait Progress {
    /// Called before every tick with the time left in the window.
    fn tick(&self, remaining: Duration);

    fn finished(&self, collected: usize);
}

impl Progress for () {
    fn tick(&self, _remaining: Duration) {}

    fn finished(&self, _collected: usize) {}
}
