/// Lookup keys for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    RegistrationSuccess,
    AlreadyRegistered,
    PendingExists,
    ServerError,
    ApproveConfirmTitle,
    ApproveConfirmMessage,
    RejectConfirmTitle,
    RejectConfirmMessage,
    Cancel,
    Ok,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::RegistrationSuccess => "registration.success",
            MessageKey::AlreadyRegistered => "registration.error.already_registered",
            MessageKey::PendingExists => "registration.error.pending_exists",
            MessageKey::ServerError => "registration.error.server_error",
            MessageKey::ApproveConfirmTitle => "settings.registration.approve_confirm_title",
            MessageKey::ApproveConfirmMessage => "settings.registration.approve_confirm_message",
            MessageKey::RejectConfirmTitle => "settings.registration.reject_confirm_title",
            MessageKey::RejectConfirmMessage => "settings.registration.reject_confirm_message",
            MessageKey::Cancel => "cancel",
            MessageKey::Ok => "ok",
        }
    }
}

pub trait Translator: Send + Sync {
    fn translate(&self, key: MessageKey, params: &[(&str, &str)]) -> String;
}

/// Returns the raw key, with parameters appended. Handy when the host
/// renders keys itself, and in tests.
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: MessageKey, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return key.as_str().to_string();
        }
        let args: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}({})", key.as_str(), args.join(", "))
    }
}

/// Built-in English wording used by the terminal front end.
pub struct English;

impl Translator for English {
    fn translate(&self, key: MessageKey, params: &[(&str, &str)]) -> String {
        let template = match key {
            MessageKey::RegistrationSuccess => {
                "Your registration request has been submitted. An administrator will review it shortly."
            }
            MessageKey::AlreadyRegistered => "This username is already taken.",
            MessageKey::PendingExists => {
                "A registration request for this username is already awaiting review."
            }
            MessageKey::ServerError => "The registration request could not be submitted.",
            MessageKey::ApproveConfirmTitle => "Approve registration",
            MessageKey::ApproveConfirmMessage => {
                "Approve the registration of {username}? An account will be created."
            }
            MessageKey::RejectConfirmTitle => "Reject registration",
            MessageKey::RejectConfirmMessage => "Reject the registration of {username}?",
            MessageKey::Cancel => "Cancel",
            MessageKey::Ok => "OK",
        };
        interpolate(template, params)
    }
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
