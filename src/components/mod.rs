//! UI Components
//!
//! Components own their view state and turn key events into Actions; the App
//! applies those Actions to the catalog and the open modal session.

pub mod code_highlight;
pub mod full_page;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod preview_modal;
pub mod previews;
pub mod quit_dialog;
pub mod splash;

pub use full_page::FullPageView;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use preview_modal::PreviewModal;
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
