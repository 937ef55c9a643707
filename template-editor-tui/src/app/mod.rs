use thiserror::Error;

// Declare the modules within the app directory
pub mod actions;
pub mod modals;
pub mod navigation_helpers;
pub mod state;

// Re-export the main App struct and other necessary types for convenience
pub use state::{ActiveModal, App, EditTemplateField, TemplateTarget};

// Input errors that go to the status bar rather than the editor's own slot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppInputError {
    #[error("Invalid number format: {0}")]
    InvalidNumber(String),
    #[error("Select an exercise row first.")]
    SelectionRequired,
}
