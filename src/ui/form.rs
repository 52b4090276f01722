use crate::service::NewRegistration;

/// Registration form fields plus the pristine/dirty flag the host form binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    username: String,
    password: String,
    email: String,
    pristine: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            email: String::new(),
            pristine: true,
        }
    }
}

impl RegistrationForm {
    pub fn fill(&mut self, username: &str, password: &str, email: &str) {
        self.set_username(username);
        self.set_password(password);
        self.set_email(email);
    }

    pub fn set_username(&mut self, value: &str) {
        self.username = value.to_string();
        self.pristine = false;
    }

    pub fn set_password(&mut self, value: &str) {
        self.password = value.to_string();
        self.pristine = false;
    }

    pub fn set_email(&mut self, value: &str) {
        self.email = value.to_string();
        self.pristine = false;
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty() && self.email.is_empty()
    }

    pub fn to_registration(&self) -> NewRegistration {
        NewRegistration {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
        }
    }

    /// Clear every field and mark the form pristine.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
