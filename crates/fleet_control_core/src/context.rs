use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

/// Execution metadata supplied by the hosting platform. Used only for
/// diagnostic logging; it never changes what the operation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub log_stream_name: String,
    pub log_group_name: String,
    pub request_id: String,
    pub memory_limit_mb: i32,
    /// Invocation deadline in milliseconds since the Unix epoch.
    pub deadline_ms: u64,
}

impl InvocationContext {
    pub fn remaining_time_ms_at(&self, now: SystemTime) -> u64 {
        let now_ms = now
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        self.deadline_ms.saturating_sub(now_ms)
    }

    pub fn remaining_time_ms(&self) -> u64 {
        self.remaining_time_ms_at(SystemTime::now())
    }

    pub fn log_diagnostics(&self) {
        info!("log stream name: {}", self.log_stream_name);
        info!("log group name: {}", self.log_group_name);
        info!("request id: {}", self.request_id);
        info!("memory limit (MB): {}", self.memory_limit_mb);
        info!("time remaining (ms): {}", self.remaining_time_ms());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_helpers::invocation_context;

    #[test]
    fn remaining_time_counts_down_to_deadline() {
        let mut context = invocation_context();
        context.deadline_ms = 10_000;

        let now = UNIX_EPOCH + Duration::from_millis(7_500);
        assert_eq!(context.remaining_time_ms_at(now), 2_500);
    }

    #[test]
    fn remaining_time_saturates_after_deadline() {
        let mut context = invocation_context();
        context.deadline_ms = 10_000;

        let now = UNIX_EPOCH + Duration::from_millis(12_000);
        assert_eq!(context.remaining_time_ms_at(now), 0);
    }
}
