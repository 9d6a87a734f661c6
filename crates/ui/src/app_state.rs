use dioxus::prelude::*;

use flow_core::model::{Level, User};
use flow_core::validation::AuthMode;

/// Signed-in learner plus which onboarding modal is open.
///
/// Provided once at the app root; every view reads it from context.
#[derive(Clone, Copy, PartialEq)]
pub struct AppState {
    user: Signal<Option<User>>,
    auth_modal: Signal<Option<AuthMode>>,
    level_modal: Signal<bool>,
}

impl AppState {
    /// Must be called from inside a component.
    #[must_use]
    pub fn new(user: Option<User>) -> Self {
        Self {
            user: Signal::new(user),
            auth_modal: Signal::new(None),
            level_modal: Signal::new(false),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.user.read().clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.read().is_some()
    }

    #[must_use]
    pub fn auth_modal(&self) -> Option<AuthMode> {
        *self.auth_modal.read()
    }

    #[must_use]
    pub fn level_modal_open(&self) -> bool {
        *self.level_modal.read()
    }

    pub fn open_auth(&mut self, mode: AuthMode) {
        self.auth_modal.set(Some(mode));
    }

    pub fn close_auth(&mut self) {
        self.auth_modal.set(None);
    }

    /// Stores the new account and moves on to level selection.
    pub fn signed_in(&mut self, user: User) {
        self.user.set(Some(user));
        self.auth_modal.set(None);
        self.level_modal.set(true);
    }

    pub fn open_level_selection(&mut self) {
        self.level_modal.set(true);
    }

    pub fn set_level(&mut self, level: Level) {
        if let Some(user) = self.user.write().as_mut() {
            user.set_level(level);
        }
        self.level_modal.set(false);
    }

    pub fn close_level_selection(&mut self) {
        self.level_modal.set(false);
    }

    pub fn sign_out(&mut self) {
        self.user.set(None);
        self.auth_modal.set(None);
        self.level_modal.set(false);
    }
}
