use std::io::Write;

use async_trait::async_trait;

use crate::ui::confirm::{ButtonStyle, ConfirmChoice, ConfirmationPrompt, Confirmer};
use crate::ui::navigation::{Navigator, View};

/// Asks for confirmation on stdin.
pub struct TerminalConfirmer;

#[async_trait]
impl Confirmer for TerminalConfirmer {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> ConfirmChoice {
        println!("{}", prompt.title);
        println!("{}", prompt.message);
        print!("{} ", button_hint(prompt));
        let _ = std::io::stdout().flush();

        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => parse_answer(prompt, &line),
            Ok(Err(e)) => {
                tracing::warn!("Could not read answer: {e}");
                ConfirmChoice::Cancel
            }
            Err(e) => {
                tracing::warn!("Prompt task failed: {e}");
                ConfirmChoice::Cancel
            }
        }
    }
}

/// `[Cancel / OK!]`, with `!` marking a destructive button.
fn button_hint(prompt: &ConfirmationPrompt) -> String {
    let labels: Vec<String> = prompt
        .buttons
        .iter()
        .map(|b| match b.style {
            Some(ButtonStyle::Danger) => format!("{}!", b.label),
            _ => b.label.clone(),
        })
        .collect();
    format!("[{}]", labels.join(" / "))
}

/// Anything other than a yes or the OK label counts as cancel.
fn parse_answer(prompt: &ConfirmationPrompt, line: &str) -> ConfirmChoice {
    let answer = line.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        return ConfirmChoice::Ok;
    }
    prompt
        .buttons
        .iter()
        .find(|b| b.label.eq_ignore_ascii_case(answer))
        .map(|b| b.result)
        .unwrap_or(ConfirmChoice::Cancel)
}

/// Announces view changes; the terminal has no router.
pub struct TerminalNavigator {
    pub server: Option<String>,
}

impl Navigator for TerminalNavigator {
    fn go(&self, view: View) {
        match &self.server {
            Some(server) => println!("You can sign in at {server} once your account is approved."),
            None => println!("Continue to the {} page once your account is approved.", view.name()),
        }
    }
}
