use anyhow::Result;

use crate::commands::CommandReport;
use crate::content::cache::load_dataset;
use crate::error::ContentError;

/// Content gate: forces a full rescan and fails on the first violation.
pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("validate");

    let dataset = match load_dataset(true) {
        Ok(dataset) => dataset,
        Err(err) => {
            let code = err.downcast_ref::<ContentError>().map(ContentError::code);
            return Err(match code {
                Some(code) => err.context(format!("content validation failed [{code}]")),
                None => err.context("content validation failed"),
            });
        }
    };

    report.detail(format!("published={}", dataset.published.len()));
    report.detail(format!("archived={}", dataset.archived.len()));
    report.detail(format!("drafts={}", dataset.drafts.len()));
    report.detail(format!("redirects={}", dataset.redirects.len()));
    report.detail(format!("fingerprint={}", dataset.fingerprint));

    Ok(report)
}
