//! Artificial delays that emulate a remote backend.

use std::time::Duration;

/// Store call being delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch every task.
    ListTasks,
    /// Fetch one task.
    GetTask,
    /// Insert a task.
    CreateTask,
    /// Patch, archive or restore a task.
    UpdateTask,
    /// Remove a task.
    DeleteTask,
    /// Filtered task snapshot (by category or status).
    QueryTasks,
    /// Fetch every category.
    ListCategories,
    /// Fetch one category.
    GetCategory,
    /// Insert a category.
    CreateCategory,
    /// Patch a category.
    UpdateCategory,
    /// Remove a category.
    DeleteCategory,
}

impl Operation {
    /// Delay used by [`Latency::Simulated`].
    #[must_use]
    pub const fn simulated_delay(self) -> Duration {
        let millis = match self {
            Self::CreateTask => 400,
            Self::ListTasks | Self::UpdateTask | Self::CreateCategory => 300,
            Self::QueryTasks | Self::UpdateCategory => 250,
            Self::GetTask | Self::DeleteTask | Self::ListCategories | Self::DeleteCategory => 200,
            Self::GetCategory => 150,
        };
        Duration::from_millis(millis)
    }
}

/// Delay strategy applied before every store operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Latency {
    /// Resolve immediately.
    None,
    /// Same delay for every operation.
    Fixed(Duration),
    /// Per-operation delays mimicking network I/O.
    #[default]
    Simulated,
}

impl Latency {
    /// No delay.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Uniform delay.
    #[must_use]
    pub const fn fixed(delay: Duration) -> Self {
        Self::Fixed(delay)
    }

    /// Per-operation defaults.
    #[must_use]
    pub const fn simulated() -> Self {
        Self::Simulated
    }

    /// Delay applied to `op`.
    #[must_use]
    pub const fn delay_for(self, op: Operation) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => delay,
            Self::Simulated => op.simulated_delay(),
        }
    }

    /// Sleep for the delay of `op`. Always resolves.
    pub async fn wait(self, op: Operation) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_delays_stay_in_network_range() {
        let ops = [
            Operation::ListTasks,
            Operation::GetTask,
            Operation::CreateTask,
            Operation::UpdateTask,
            Operation::DeleteTask,
            Operation::QueryTasks,
            Operation::ListCategories,
            Operation::GetCategory,
            Operation::CreateCategory,
            Operation::UpdateCategory,
            Operation::DeleteCategory,
        ];
        for op in ops {
            let delay = Latency::simulated().delay_for(op);
            assert!(delay >= Duration::from_millis(150), "{op:?}");
            assert!(delay <= Duration::from_millis(400), "{op:?}");
        }
        assert_eq!(
            Latency::simulated().delay_for(Operation::CreateTask),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn none_and_fixed_override_per_operation_delays() {
        assert_eq!(Latency::none().delay_for(Operation::CreateTask), Duration::ZERO);
        let fixed = Latency::fixed(Duration::from_millis(5));
        assert_eq!(fixed.delay_for(Operation::ListTasks), Duration::from_millis(5));
        assert_eq!(fixed.delay_for(Operation::GetCategory), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_the_operation_delay() {
        let start = tokio::time::Instant::now();
        Latency::simulated().wait(Operation::UpdateTask).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
