use super::PendingReport;

pub fn render(report: &PendingReport<'_>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
