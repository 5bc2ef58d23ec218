/// ProgressReporter port for user-facing progress during discovery
///
/// Implementations must be shareable across concurrently running collectors.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted step
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Items expected
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a recovered problem (collector degraded, item skipped)
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for std::sync::Arc<T> {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        (**self).report_progress(current, total, message)
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
