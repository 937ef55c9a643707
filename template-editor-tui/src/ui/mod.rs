mod layout;
mod modals;
mod status_bar;
mod templates_tab;

// Re-export the main render function
pub use layout::render_ui;
