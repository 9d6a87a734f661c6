mod auth_modal;
mod level_modal;

pub use auth_modal::AuthModal;
pub use level_modal::LevelSelectionModal;
