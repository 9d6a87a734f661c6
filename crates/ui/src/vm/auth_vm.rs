use flow_core::validation::{AuthMode, Credentials, Field, ValidationErrors};

/// State of the sign-in / registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFormVm {
    mode: AuthMode,
    credentials: Credentials,
    errors: ValidationErrors,
}

impl AuthFormVm {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            credentials: Credentials::default(),
            errors: ValidationErrors::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn is_register(&self) -> bool {
        self.mode == AuthMode::Register
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Create account",
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Sign up",
        }
    }

    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "No account yet? Sign up",
            AuthMode::Register => "Already have an account? Sign in",
        }
    }

    /// Switches between sign-in and registration, dropping stale errors.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.errors = ValidationErrors::default();
    }

    /// Stores an edit and clears that field's error.
    pub fn set_field(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.credentials.name,
            Field::Email => &mut self.credentials.email,
            Field::Password => &mut self.credentials.password,
            Field::ConfirmPassword => &mut self.credentials.confirm_password,
        };
        *slot = value;
        self.errors.clear(field);
    }

    /// Validates locally; on failure keeps every field error for display.
    pub fn validate(&mut self) -> bool {
        match self.credentials.validate(self.mode) {
            Ok(()) => {
                self.errors = ValidationErrors::default();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    /// Replaces the shown errors, e.g. with those reported by the service.
    pub fn show_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field).map(|e| e.message(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(mode: AuthMode, email: &str, password: &str, confirm: &str) -> AuthFormVm {
        let mut vm = AuthFormVm::new(mode);
        vm.set_field(Field::Name, "Anna".into());
        vm.set_field(Field::Email, email.into());
        vm.set_field(Field::Password, password.into());
        vm.set_field(Field::ConfirmPassword, confirm.into());
        vm
    }

    #[test]
    fn bad_email_shows_one_message() {
        let mut vm = filled(AuthMode::Register, "bad-email", "abcdef", "abcdef");
        assert!(!vm.validate());
        assert_eq!(vm.error_for(Field::Email), Some("Invalid email format"));
        assert_eq!(vm.error_for(Field::Password), None);
    }

    #[test]
    fn short_password_is_reported() {
        let mut vm = filled(AuthMode::Register, "user@example.com", "abc", "abc");
        assert!(!vm.validate());
        assert_eq!(
            vm.error_for(Field::Password),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn editing_clears_the_field_error() {
        let mut vm = filled(AuthMode::Register, "bad-email", "abc", "abd");
        assert!(!vm.validate());
        vm.set_field(Field::Email, "user@example.com".into());
        assert_eq!(vm.error_for(Field::Email), None);
        assert!(vm.error_for(Field::Password).is_some());
        assert_eq!(vm.error_for(Field::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn toggling_mode_resets_errors() {
        let mut vm = AuthFormVm::new(AuthMode::Login);
        assert!(!vm.validate());
        vm.toggle_mode();
        assert!(vm.is_register());
        assert_eq!(vm.error_for(Field::Email), None);
        assert_eq!(vm.submit_label(), "Sign up");
    }

    #[test]
    fn valid_form_passes() {
        let mut vm = filled(AuthMode::Register, "user@example.com", "abcdef", "abcdef");
        assert!(vm.validate());
    }
}
