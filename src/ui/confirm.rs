use async_trait::async_trait;

use super::i18n::{MessageKey, Translator};
use crate::service::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Cancel,
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Danger,
}

impl ButtonStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => "btn-primary",
            ButtonStyle::Danger => "btn-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptButton {
    pub result: ConfirmChoice,
    pub label: String,
    pub style: Option<ButtonStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub buttons: Vec<PromptButton>,
}

impl ConfirmationPrompt {
    /// Prompt shown before resolving the request of `username`.
    ///
    /// Approval gets an affirmative `ok` button, rejection a destructive one.
    pub fn for_resolution(
        resolution: Resolution,
        username: &str,
        translator: &dyn Translator,
    ) -> Self {
        let (title, message, style) = match resolution {
            Resolution::Approve => (
                MessageKey::ApproveConfirmTitle,
                MessageKey::ApproveConfirmMessage,
                ButtonStyle::Primary,
            ),
            Resolution::Reject => (
                MessageKey::RejectConfirmTitle,
                MessageKey::RejectConfirmMessage,
                ButtonStyle::Danger,
            ),
        };

        Self {
            title: translator.translate(title, &[]),
            message: translator.translate(message, &[("username", username)]),
            buttons: vec![
                PromptButton {
                    result: ConfirmChoice::Cancel,
                    label: translator.translate(MessageKey::Cancel, &[]),
                    style: None,
                },
                PromptButton {
                    result: ConfirmChoice::Ok,
                    label: translator.translate(MessageKey::Ok, &[]),
                    style: Some(style),
                },
            ],
        }
    }
}

/// Modal confirmation collaborator. Resolves once the operator picks a button.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> ConfirmChoice;
}

/// Confirms everything without asking.
pub struct AlwaysConfirm;

#[async_trait]
impl Confirmer for AlwaysConfirm {
    async fn confirm(&self, _prompt: &ConfirmationPrompt) -> ConfirmChoice {
        ConfirmChoice::Ok
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ConfirmChoice, ConfirmationPrompt, Confirmer};

    /// Answers every prompt with a fixed choice and keeps the prompts it saw.
    pub struct FixedConfirmer {
        choice: ConfirmChoice,
        seen: Mutex<Vec<ConfirmationPrompt>>,
    }

    impl FixedConfirmer {
        pub fn new(choice: ConfirmChoice) -> Self {
            Self {
                choice,
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Confirmer for FixedConfirmer {
        async fn confirm(&self, prompt: &ConfirmationPrompt) -> ConfirmChoice {
            self.seen.lock().unwrap().push(prompt.clone());
            self.choice
        }
    }
}
