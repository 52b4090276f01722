use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::alerts::{Alert, AlertList, Severity};
use super::form::RegistrationForm;
use super::i18n::{MessageKey, Translator};
use super::navigation::{Navigator, View};
use crate::error::{ErrorTag, ServiceError};
use crate::service::RegistrationService;

/// Pause between a successful submission and the move to the login view.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    AlreadyRegistered,
    PendingExists,
    ServerError,
}

impl SubmitOutcome {
    fn from_error(err: &ServiceError) -> Self {
        match err.tag() {
            Some(ErrorTag::AlreadyExistingUsername) => SubmitOutcome::AlreadyRegistered,
            Some(ErrorTag::PendingRegistrationExists) => SubmitOutcome::PendingExists,
            _ => SubmitOutcome::ServerError,
        }
    }

    fn alert(&self) -> (Severity, MessageKey) {
        match self {
            SubmitOutcome::Submitted => (Severity::Success, MessageKey::RegistrationSuccess),
            SubmitOutcome::AlreadyRegistered => (Severity::Danger, MessageKey::AlreadyRegistered),
            SubmitOutcome::PendingExists => (Severity::Warning, MessageKey::PendingExists),
            SubmitOutcome::ServerError => (Severity::Danger, MessageKey::ServerError),
        }
    }
}

/// Self-service registration: submits the form and reports the outcome as
/// alerts.
///
/// A successful submission schedules navigation to the login view after
/// [`REDIRECT_DELAY`]. The scheduled redirect belongs to the submitter and is
/// cancelled if the submitter is dropped first.
pub struct RegistrationSubmitter {
    service: Arc<dyn RegistrationService>,
    navigator: Arc<dyn Navigator>,
    translator: Arc<dyn Translator>,
    form: RegistrationForm,
    alerts: AlertList,
    redirects: Vec<JoinHandle<()>>,
}

impl RegistrationSubmitter {
    pub fn new(
        service: Arc<dyn RegistrationService>,
        navigator: Arc<dyn Navigator>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            service,
            navigator,
            translator,
            form: RegistrationForm::default(),
            alerts: AlertList::default(),
            redirects: Vec::new(),
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn alerts(&self) -> &AlertList {
        &self.alerts
    }

    pub fn close_alert(&mut self, index: usize) -> Option<Alert> {
        self.alerts.close(index)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let registration = self.form.to_registration();
        tracing::info!(
            "Submitting registration request for {} via {}",
            registration.username,
            self.service.name()
        );

        let outcome = match self.service.submit(&registration).await {
            Ok(()) => SubmitOutcome::Submitted,
            Err(e) => {
                tracing::warn!("Registration for {} failed: {}", registration.username, e);
                SubmitOutcome::from_error(&e)
            }
        };

        let (severity, key) = outcome.alert();
        self.alerts.push(Alert {
            severity,
            key,
            message: self.translator.translate(key, &[]),
        });

        if outcome == SubmitOutcome::Submitted {
            self.form.reset();
            self.schedule_redirect();
        }

        outcome
    }

    fn schedule_redirect(&mut self) {
        self.redirects.retain(|h| !h.is_finished());
        let navigator = Arc::clone(&self.navigator);
        self.redirects.push(tokio::spawn(async move {
            tokio::time::sleep(REDIRECT_DELAY).await;
            tracing::debug!("Redirecting to {}", View::Login.name());
            navigator.go(View::Login);
        }));
    }

    /// Redirect tasks still held, finished or not.
    pub fn tracked_redirects(&self) -> usize {
        self.redirects.len()
    }

    pub fn redirect_scheduled(&self) -> bool {
        self.redirects.iter().any(|h| !h.is_finished())
    }

    /// Wait until every scheduled redirect has fired.
    pub async fn wait_for_redirect(&mut self) {
        for handle in self.redirects.drain(..) {
            if let Err(e) = handle.await {
                tracing::debug!("Redirect task ended early: {e}");
            }
        }
    }
}

impl Drop for RegistrationSubmitter {
    fn drop(&mut self) {
        for handle in &self.redirects {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::scripted::{Call, Failure, ScriptedService};
    use crate::ui::i18n::KeyTranslator;
    use crate::ui::navigation::testing::RecordingNavigator;

    fn submitter(
        service: Arc<ScriptedService>,
    ) -> (Arc<RecordingNavigator>, RegistrationSubmitter) {
        let navigator = Arc::new(RecordingNavigator::default());
        let submitter =
            RegistrationSubmitter::new(service, navigator.clone(), Arc::new(KeyTranslator));
        (navigator, submitter)
    }

    async fn submit_alice(submitter: &mut RegistrationSubmitter) -> SubmitOutcome {
        submitter.form_mut().fill("alice", "p", "a@x.com");
        submitter.submit().await
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submission_redirects_after_delay() {
        let service = Arc::new(ScriptedService::default());
        let (navigator, mut submitter) = submitter(service.clone());

        let outcome = submit_alice(&mut submitter).await;
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(service.calls(), vec![Call::Submit("alice".into())]);

        assert!(submitter.form().is_empty());
        assert!(submitter.form().is_pristine());
        assert_eq!(submitter.alerts().len(), 1);
        let alert = submitter.alerts().iter().next().unwrap();
        assert_eq!(alert.severity, Severity::Success);
        assert_eq!(alert.message, "registration.success");

        tokio::time::sleep(REDIRECT_DELAY - Duration::from_millis(1)).await;
        assert!(navigator.visits().is_empty());
        assert!(submitter.redirect_scheduled());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(navigator.visits(), vec![View::Login]);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(navigator.visits().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_existing_username() {
        let service = Arc::new(ScriptedService::default());
        service.fail_submit(Failure::Tag(ErrorTag::AlreadyExistingUsername));
        let (navigator, mut submitter) = submitter(service);

        assert_eq!(
            submit_alice(&mut submitter).await,
            SubmitOutcome::AlreadyRegistered
        );
        let alerts: Vec<_> = submitter.alerts().iter().cloned().collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Danger);
        assert_eq!(alerts[0].message, "registration.error.already_registered");

        // Form stays populated for correction.
        assert_eq!(submitter.form().username(), "alice");
        assert!(submitter.form().has_password());
        assert!(!submitter.form().is_pristine());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn test_pending_registration_exists_is_a_warning() {
        let service = Arc::new(ScriptedService::default());
        service.fail_submit(Failure::Tag(ErrorTag::PendingRegistrationExists));
        let (_navigator, mut submitter) = submitter(service);

        assert_eq!(submit_alice(&mut submitter).await, SubmitOutcome::PendingExists);
        let alerts: Vec<_> = submitter.alerts().iter().cloned().collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert_eq!(alerts[0].key, MessageKey::PendingExists);
        assert_eq!(submitter.form().email(), "a@x.com");
    }

    #[tokio::test]
    async fn test_unknown_tag_and_transport_failures_are_server_errors() {
        let service = Arc::new(ScriptedService::default());
        service.fail_submit(Failure::Tag(ErrorTag::Other("RegistrationError".into())));
        let (_navigator, mut submitter) = submitter(service.clone());

        assert_eq!(submit_alice(&mut submitter).await, SubmitOutcome::ServerError);

        service.fail_submit(Failure::Status(502));
        assert_eq!(submitter.submit().await, SubmitOutcome::ServerError);

        let alerts: Vec<_> = submitter.alerts().iter().cloned().collect();
        assert_eq!(alerts.len(), 2);
        for alert in &alerts {
            assert_eq!(alert.severity, Severity::Danger);
            assert_eq!(alert.message, "registration.error.server_error");
        }
    }

    #[tokio::test]
    async fn test_closing_alert_by_index() {
        let service = Arc::new(ScriptedService::default());
        service.fail_submit(Failure::Tag(ErrorTag::PendingRegistrationExists));
        let (_navigator, mut submitter) = submitter(service.clone());

        submit_alice(&mut submitter).await;
        service.fail_submit(Failure::Tag(ErrorTag::AlreadyExistingUsername));
        submitter.submit().await;
        service.fail_submit(Failure::Status(500));
        submitter.submit().await;

        let removed = submitter.close_alert(1).unwrap();
        assert_eq!(removed.key, MessageKey::AlreadyRegistered);
        let keys: Vec<_> = submitter.alerts().iter().map(|a| a.key).collect();
        assert_eq!(keys, [MessageKey::PendingExists, MessageKey::ServerError]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_submitter_cancels_redirect() {
        let service = Arc::new(ScriptedService::default());
        let (navigator, mut submitter) = submitter(service);

        submit_alice(&mut submitter).await;
        tokio::time::sleep(Duration::from_millis(1000)).await;
        drop(submitter);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_redirects_are_released() {
        let service = Arc::new(ScriptedService::default());
        let (navigator, mut submitter) = submitter(service);

        for round in 1..=3 {
            submit_alice(&mut submitter).await;
            tokio::time::sleep(REDIRECT_DELAY + Duration::from_millis(1)).await;
            assert_eq!(navigator.visits().len(), round);
            assert!(!submitter.redirect_scheduled());
        }
        // Only the most recent handle is still held.
        assert_eq!(submitter.tracked_redirects(), 1);

        // Overlapping submissions keep both pending redirects.
        submit_alice(&mut submitter).await;
        submit_alice(&mut submitter).await;
        assert_eq!(submitter.tracked_redirects(), 2);
        submitter.wait_for_redirect().await;
        assert_eq!(navigator.visits().len(), 5);
        assert_eq!(submitter.tracked_redirects(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_redirect() {
        let service = Arc::new(ScriptedService::default());
        let (navigator, mut submitter) = submitter(service);

        let start = tokio::time::Instant::now();
        submit_alice(&mut submitter).await;
        submitter.wait_for_redirect().await;

        assert_eq!(navigator.visits(), vec![View::Login]);
        assert!(start.elapsed() >= REDIRECT_DELAY);
        assert!(!submitter.redirect_scheduled());
    }
}
