pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::ui::pending::PendingView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Terminal,
    Json,
}

impl ReportFormat {
    pub fn parse(format: &str) -> Self {
        match format {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Terminal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PendingReport<'a> {
    pub generated_at: String,
    pub source: &'a str,
    pub total_pending: usize,
    #[serde(flatten)]
    pub view: &'a PendingView,
}

impl<'a> PendingReport<'a> {
    pub fn build(source: &'a str, view: &'a PendingView) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source,
            total_pending: view.requests.len(),
            view,
        }
    }

    pub fn render(&self, format: ReportFormat) -> anyhow::Result<String> {
        match format {
            ReportFormat::Terminal => terminal::render(self),
            ReportFormat::Json => json::render(self),
        }
    }
}
