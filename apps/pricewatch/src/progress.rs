use pricewatch_report::format::fixed_amount;
use pricewatch_sampler::Progress;
use std::io::{stdout, Write};
use std::time::Duration;

/// Overwrites a single stdout line with the time left in the window.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn tick(&self, remaining: Duration) {
        print!(
            "\rTime remaining for scan: {} minutes",
            fixed_amount(remaining.as_secs_f64() / 60.0)
        );
        stdout().flush().ok();
    }

    fn finished(&self, collected: usize) {
        println!();
        println!("Collection completed with {collected} samples. Finalizing data...");
    }
}
