//! Services used by the UI
//!
//! - Catalog loading and validation
//! - Background content loading for the preview modal
//! - Install command synthesis
//! - Clipboard access and analytics events

pub mod analytics;
pub mod catalog;
pub mod clipboard;
pub mod install;
pub mod loader;

pub use analytics::{AnalyticsEvent, AnalyticsSink, NoopAnalytics, TracingAnalytics};
pub use catalog::{builtin_catalog, load_catalog};
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use loader::ContentLoader;
