//! Model layer - catalog data and presentation state
//!
//! - `catalog` - items, files and preview descriptions
//! - `session` - the open preview modal and its load lifecycle
//! - `ui` / `modal` - modes, surfaces and the overlay stack

pub mod catalog;
pub mod device;
pub mod modal;
pub mod package_manager;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogItem};
pub use package_manager::PackageManager;
pub use session::ModalHost;
