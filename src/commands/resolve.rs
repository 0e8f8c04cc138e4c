use anyhow::Result;

use crate::commands::CommandReport;
use crate::content::cache::load_dataset;
use crate::content::route::{Resolution, resolve};

pub fn run(slug: &str) -> Result<CommandReport> {
    let dataset = load_dataset(false)?;
    let mut report = CommandReport::new("resolve");

    let resolution = resolve(&dataset, slug);
    match &resolution {
        Resolution::Found(project) => report.detail(format!("found {}", project.slug)),
        Resolution::Redirect { to } => report.detail(format!(
            "redirect {} {slug} -> {to}",
            resolution.status_code()
        )),
        Resolution::NotFound => report.issue(format!("not found: {slug}")),
    }

    Ok(report)
}
