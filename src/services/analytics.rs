//! Fire-and-forget analytics events

use std::collections::BTreeMap;

/// A named event with a flat property bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub properties: BTreeMap<String, String>,
}

impl AnalyticsEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Destination for analytics events
///
/// Emitting never fails and never changes behavior.
pub trait AnalyticsSink {
    fn emit(&mut self, event: &AnalyticsEvent);
}

/// Writes events to the log
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn emit(&mut self, event: &AnalyticsEvent) {
        tracing::info!(target: "shelf::analytics", event = event.name, properties = ?event.properties);
    }
}

/// Discards every event
#[derive(Debug, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn emit(&mut self, _event: &AnalyticsEvent) {}
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Keeps every emitted event
    #[derive(Debug, Default)]
    pub struct RecordingAnalytics {
        pub events: Vec<AnalyticsEvent>,
    }

    impl AnalyticsSink for RecordingAnalytics {
        fn emit(&mut self, event: &AnalyticsEvent) {
            self.events.push(event.clone());
        }
    }

    /// Lets a test keep a handle on a sink it hands over
    impl<T: AnalyticsSink> AnalyticsSink for Rc<RefCell<T>> {
        fn emit(&mut self, event: &AnalyticsEvent) {
            self.borrow_mut().emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_properties() {
        let event = AnalyticsEvent::new("install_command_copied")
            .with("package_manager", "pnpm")
            .with("slug", "button");
        assert_eq!(event.properties.len(), 2);
        assert_eq!(event.properties["package_manager"], "pnpm");
    }
}
