use std::sync::Arc;

use serde::Serialize;

use super::confirm::{ConfirmChoice, ConfirmationPrompt, Confirmer};
use super::i18n::Translator;
use crate::error::ServiceError;
use crate::service::{RegistrationRequest, RegistrationService, Resolution};

/// What the settings page renders: the pending set and the per-action flags.
///
/// Flags are sticky; once set they stay set for the life of the manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PendingView {
    pub requests: Vec<RegistrationRequest>,
    pub success_approval: bool,
    pub error_approval: bool,
    pub success_rejection: bool,
    pub error_rejection: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Operator dismissed the confirmation; nothing was sent.
    Cancelled,
    Resolved,
    Failed,
}

pub struct PendingRequestManager {
    service: Arc<dyn RegistrationService>,
    confirmer: Arc<dyn Confirmer>,
    translator: Arc<dyn Translator>,
    view: PendingView,
}

impl PendingRequestManager {
    pub fn new(
        service: Arc<dyn RegistrationService>,
        confirmer: Arc<dyn Confirmer>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            service,
            confirmer,
            translator,
            view: PendingView::default(),
        }
    }

    /// Build a manager and load the pending set once.
    pub async fn open(
        service: Arc<dyn RegistrationService>,
        confirmer: Arc<dyn Confirmer>,
        translator: Arc<dyn Translator>,
    ) -> Result<Self, ServiceError> {
        let mut manager = Self::new(service, confirmer, translator);
        manager.load_pending().await?;
        Ok(manager)
    }

    pub fn view(&self) -> &PendingView {
        &self.view
    }

    pub fn find(&self, id: &str) -> Option<&RegistrationRequest> {
        self.view.requests.iter().find(|r| r.id == id)
    }

    /// Replace the local pending set with the service's current one.
    /// On failure the previous set is kept.
    pub async fn load_pending(&mut self) -> Result<usize, ServiceError> {
        let requests = self.service.list_pending().await?;
        tracing::debug!("Loaded {} pending request(s)", requests.len());
        self.view.requests = requests;
        Ok(self.view.requests.len())
    }

    pub async fn approve(&mut self, request: &RegistrationRequest) -> ResolutionOutcome {
        self.resolve(request, Resolution::Approve).await
    }

    pub async fn reject(&mut self, request: &RegistrationRequest) -> ResolutionOutcome {
        self.resolve(request, Resolution::Reject).await
    }

    async fn resolve(
        &mut self,
        request: &RegistrationRequest,
        resolution: Resolution,
    ) -> ResolutionOutcome {
        let prompt =
            ConfirmationPrompt::for_resolution(resolution, &request.username, &*self.translator);
        if self.confirmer.confirm(&prompt).await != ConfirmChoice::Ok {
            tracing::debug!("{} of {} cancelled", resolution.verb(), request.username);
            return ResolutionOutcome::Cancelled;
        }

        match self.service.resolve(&request.id, resolution).await {
            Ok(()) => {
                tracing::info!(
                    "Request {} ({}) -> {}",
                    request.id,
                    request.username,
                    resolution.resulting_status().as_str()
                );
                self.set_flag(resolution, true);
                if let Err(e) = self.load_pending().await {
                    tracing::warn!("Could not refresh pending requests: {e}");
                }
                ResolutionOutcome::Resolved
            }
            Err(e) => {
                tracing::warn!(
                    "Could not {} request {} ({}): {}",
                    resolution.verb(),
                    request.id,
                    request.username,
                    e
                );
                self.set_flag(resolution, false);
                ResolutionOutcome::Failed
            }
        }
    }

    fn set_flag(&mut self, resolution: Resolution, success: bool) {
        let flag = match (resolution, success) {
            (Resolution::Approve, true) => &mut self.view.success_approval,
            (Resolution::Approve, false) => &mut self.view.error_approval,
            (Resolution::Reject, true) => &mut self.view.success_rejection,
            (Resolution::Reject, false) => &mut self.view.error_rejection,
        };
        *flag = true;
    }
}
