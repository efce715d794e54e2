use tracing::info;

/// Receives `(current unit, total units, label)` progress updates while a
/// restore runs. The caller owns the post-restore summary.
pub trait RestoreNotifier: Send + Sync {
    fn progress(&self, current: u32, total: u32, label: &str);
}

/// Default notifier that logs progress through `tracing`.
pub struct TracingNotifier;

impl RestoreNotifier for TracingNotifier {
    fn progress(&self, current: u32, total: u32, label: &str) {
        info!("Restore progress {current}/{total}: {label}");
    }
}

/// Notifier that discards progress updates.
pub struct NullNotifier;

impl RestoreNotifier for NullNotifier {
    fn progress(&self, _current: u32, _total: u32, _label: &str) {}
}
