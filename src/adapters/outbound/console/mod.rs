/// Console adapters for user-facing output on stderr
mod progress_reporter;

pub use progress_reporter::{SilentProgressReporter, StderrProgressReporter};
