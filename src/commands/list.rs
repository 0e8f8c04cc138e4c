use anyhow::Result;

use crate::commands::CommandReport;
use crate::content::cache::load_dataset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListScope {
    #[default]
    Published,
    Archived,
    Drafts,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub scope: ListScope,
}

pub fn run(opts: &ListOptions) -> Result<CommandReport> {
    let dataset = load_dataset(false)?;
    let mut report = CommandReport::new("list");

    let rows = match opts.scope {
        ListScope::Published => dataset
            .published
            .iter()
            .map(|p| (p.slug.as_str(), p.title.as_str()))
            .collect::<Vec<_>>(),
        ListScope::Archived => dataset
            .archived
            .iter()
            .map(|p| (p.slug.as_str(), p.title.as_str()))
            .collect(),
        ListScope::Drafts => dataset
            .drafts
            .iter()
            .map(|b| (b.slug.as_str(), b.public.title.as_str()))
            .collect(),
    };

    for (slug, title) in rows {
        report.detail(format!("{slug}\t{title}"));
    }

    Ok(report)
}
