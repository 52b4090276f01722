use comfy_table::{Cell, Table};

use super::PendingReport;

pub fn render(report: &PendingReport<'_>) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!(
        "=== Registration Requests ({}, {}) ===\n\n",
        report.source, report.generated_at
    ));

    output.push_str(&format!(
        "Pending requests:   {}\n",
        report.total_pending
    ));

    // Only mention outcomes that actually happened in this session.
    let view = report.view;
    for (set, label) in [
        (view.success_approval, "Approval succeeded"),
        (view.error_approval, "Approval failed"),
        (view.success_rejection, "Rejection succeeded"),
        (view.error_rejection, "Rejection failed"),
    ] {
        if set {
            output.push_str(&format!("{label}\n"));
        }
    }

    if view.requests.is_empty() {
        output.push_str("\nNo pending registration requests.\n");
        return Ok(output);
    }

    output.push('\n');
    let mut table = Table::new();
    table.set_header(vec!["ID", "Username", "Email", "Requested"]);
    for req in &view.requests {
        table.add_row(vec![
            Cell::new(&req.id),
            Cell::new(&req.username),
            Cell::new(&req.email),
            Cell::new(
                req.created_at()
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ]);
    }
    output.push_str(&table.to_string());
    output.push('\n');

    Ok(output)
}
