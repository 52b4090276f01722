use std::sync::Arc;

use crate::service::RegistrationService;
use crate::ui::alerts::Severity;
use crate::ui::i18n::English;
use crate::ui::navigation::Navigator;
use crate::ui::submitter::{RegistrationSubmitter, SubmitOutcome};

pub async fn register(
    service: Arc<dyn RegistrationService>,
    navigator: Arc<dyn Navigator>,
    username: &str,
    password: &str,
    email: &str,
) -> anyhow::Result<()> {
    let mut submitter = RegistrationSubmitter::new(service, navigator, Arc::new(English));
    submitter.form_mut().fill(username, password, email);

    println!("Submitting registration request for {username}...");
    let outcome = submitter.submit().await;

    for alert in submitter.alerts().iter() {
        let marker = match alert.severity {
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Danger => "error",
        };
        println!("  [{marker}] {}", alert.message);
    }

    if outcome != SubmitOutcome::Submitted {
        anyhow::bail!("Registration request was not accepted");
    }

    submitter.wait_for_redirect().await;
    Ok(())
}
