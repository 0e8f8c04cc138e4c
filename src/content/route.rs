use crate::content::model::{Dataset, ProjectPublic};

pub const PERMANENT_REDIRECT: u16 = 301;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a ProjectPublic),
    /// Permanent redirect to the canonical slug.
    Redirect { to: &'a str },
    NotFound,
}

impl Resolution<'_> {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Found(_) => 200,
            Self::Redirect { .. } => PERMANENT_REDIRECT,
            Self::NotFound => 404,
        }
    }
}

/// Maps a requested slug to a routable project.
///
/// Canonical slugs of published and archived projects win. Only on a miss is
/// the redirect table consulted. Drafts are never routable.
pub fn resolve<'a>(dataset: &'a Dataset, slug: &str) -> Resolution<'a> {
    if let Some(project) = dataset.public_project(slug) {
        return Resolution::Found(project);
    }
    match dataset.redirects.get(slug) {
        Some(target) => Resolution::Redirect { to: target },
        None => Resolution::NotFound,
    }
}
