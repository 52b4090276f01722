use std::sync::Arc;

use crate::report::{PendingReport, ReportFormat};
use crate::service::{RegistrationService, Resolution};
use crate::ui::confirm::{AlwaysConfirm, Confirmer};
use crate::ui::i18n::English;
use crate::ui::pending::{PendingRequestManager, ResolutionOutcome};

pub async fn list(service: Arc<dyn RegistrationService>, format: &str) -> anyhow::Result<()> {
    let source = service.name().to_string();
    // Listing resolves nothing; the confirmer is never asked.
    let manager =
        PendingRequestManager::open(service, Arc::new(AlwaysConfirm), Arc::new(English)).await?;

    let rendered =
        PendingReport::build(&source, manager.view()).render(ReportFormat::parse(format))?;
    println!("{rendered}");
    Ok(())
}

pub async fn resolve(
    service: Arc<dyn RegistrationService>,
    confirmer: Arc<dyn Confirmer>,
    id: &str,
    resolution: Resolution,
) -> anyhow::Result<()> {
    let mut manager = PendingRequestManager::open(service, confirmer, Arc::new(English)).await?;

    let request = manager
        .find(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No pending registration request with id '{}'", id))?;

    let outcome = match resolution {
        Resolution::Approve => manager.approve(&request).await,
        Resolution::Reject => manager.reject(&request).await,
    };

    match outcome {
        ResolutionOutcome::Cancelled => println!("Cancelled, nothing was changed."),
        ResolutionOutcome::Resolved => {
            let done = match resolution {
                Resolution::Approve => "Approved",
                Resolution::Reject => "Rejected",
            };
            println!("{done} {} <{}>.", request.username, request.email);
            println!("{} request(s) still pending.", manager.view().requests.len());
        }
        ResolutionOutcome::Failed => {
            anyhow::bail!("Could not {} request '{}'", resolution.verb(), id)
        }
    }
    Ok(())
}
