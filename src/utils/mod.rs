//! Small shared helpers: wall-clock timestamps and logger installation.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// Returns the current time in milliseconds since UNIX epoch.
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// Install a formatted `tracing` subscriber honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn setup_logger() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::current_time_millis;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn test_current_time_millis_increases() {
        let time1 = current_time_millis();
        thread::sleep(Duration::from_millis(5));
        let time2 = current_time_millis();
        assert!(time2 > time1, "Time should increase between calls");
    }

    #[test]
    fn test_current_time_millis_is_reasonably_current() {
        let time_from_function = current_time_millis();
        let time_direct = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;

        // Allow a small difference for execution time between the two calls.
        let difference = time_direct.abs_diff(time_from_function);
        assert!(
            difference <= 10,
            "Time difference should be small, but got {difference}ms"
        );
    }
}
