//! Simulated I/O latency
//!
//! Every service call awaits a delay before touching the store, so callers
//! see the same asynchronous timing they would against a remote API.

use std::time::Duration;

use crate::config::LatencySettings;

/// The kind of service call being delayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    List,
    Fetch,
    Create,
    Update,
    Delete,
    Aggregate,
}

/// Per-call delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    list: Duration,
    fetch: Duration,
    create: Duration,
    update: Duration,
    delete: Duration,
    aggregate: Duration,
}

impl Latency {
    /// No delay at all
    pub const fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// The same delay for every call
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            fetch: delay,
            create: delay,
            update: delay,
            delete: delay,
            aggregate: delay,
        }
    }

    pub fn from_settings(settings: &LatencySettings) -> Self {
        if !settings.enabled {
            return Self::none();
        }
        Self {
            list: Duration::from_millis(settings.list_ms),
            fetch: Duration::from_millis(settings.fetch_ms),
            create: Duration::from_millis(settings.create_ms),
            update: Duration::from_millis(settings.update_ms),
            delete: Duration::from_millis(settings.delete_ms),
            aggregate: Duration::from_millis(settings.aggregate_ms),
        }
    }

    pub fn delay(&self, kind: CallKind) -> Duration {
        match kind {
            CallKind::List => self.list,
            CallKind::Fetch => self.fetch,
            CallKind::Create => self.create,
            CallKind::Update => self.update,
            CallKind::Delete => self.delete,
            CallKind::Aggregate => self.aggregate,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }

    /// Wait for the delay configured for `kind`
    pub async fn simulate(&self, kind: CallKind) {
        let delay = self.delay(kind);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    #[cfg(not(test))]
    fn default() -> Self {
        Self::from_settings(&LatencySettings::default())
    }

    #[cfg(test)]
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero_in_tests() {
        assert!(Latency::default().is_none());
    }

    #[test]
    fn test_from_settings() {
        let latency = Latency::from_settings(&LatencySettings::default());
        assert_eq!(latency.delay(CallKind::List), Duration::from_millis(300));
        assert_eq!(latency.delay(CallKind::Fetch), Duration::from_millis(200));
        assert_eq!(latency.delay(CallKind::Create), Duration::from_millis(400));
        assert_eq!(latency.delay(CallKind::Delete), Duration::from_millis(250));
    }

    #[test]
    fn test_disabled_settings() {
        let settings = LatencySettings {
            enabled: false,
            ..LatencySettings::default()
        };
        assert!(Latency::from_settings(&settings).is_none());
    }

    #[tokio::test]
    async fn test_simulate_waits() {
        let latency = Latency::uniform(Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        latency.simulate(CallKind::List).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
