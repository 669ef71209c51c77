// src/progress.rs
/// Lightweight progress reporting used by the snapshot build.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of teams to aggregate.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one team's season record is complete.
    fn item_done(&mut self, _abbreviation: &str) {}

    /// Called when a team's aggregation failed (the build will fail too).
    fn item_failed(&mut self, _abbreviation: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
