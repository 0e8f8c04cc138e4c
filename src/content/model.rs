use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const PUBLIC_FIELDS: &[&str] = &[
    "slug",
    "title",
    "summary",
    "intro",
    "body",
    "heroImage",
    "gallery",
    "tags",
    "tech",
    "category",
    "featured",
    "weight",
    "sortDate",
    "timeframe",
    "role",
    "collaborators",
    "clientPublicName",
    "liveUrl",
    "repoUrl",
    "canonical",
    "seo",
];

pub const INTERNAL_FIELDS: &[&str] = &[
    "id",
    "status",
    "createdAt",
    "updatedAt",
    "contentUri",
    "aliases",
    "internalNotes",
    "metadata",
];

pub const REQUIRED_FIELDS: &[&str] = &[
    "id",
    "slug",
    "title",
    "summary",
    "status",
    "createdAt",
    "updatedAt",
    "contentUri",
];

pub fn is_known_field(name: &str) -> bool {
    PUBLIC_FIELDS.contains(&name) || INTERNAL_FIELDS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Published,
    Archived,
}

impl ProjectStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Image references accept a bare URL string as shorthand.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImageInput {
    Url(String),
    Full(ImageRef),
}

impl From<ImageInput> for ImageRef {
    fn from(input: ImageInput) -> Self {
        match input {
            ImageInput::Url(url) => ImageRef {
                url,
                alt: None,
                caption: None,
            },
            ImageInput::Full(image) => image,
        }
    }
}

/// Fields safe to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPublic {
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<ImageRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_public_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<Value>,
}

/// Editorial and operational fields. Never rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInternal {
    pub id: String,
    pub status: ProjectStatus,
    pub created_at: String,
    pub updated_at: String,
    pub content_uri: String,
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBundle {
    pub slug: String,
    pub public: ProjectPublic,
    pub internal: ProjectInternal,
}

impl ProjectBundle {
    pub fn status(&self) -> ProjectStatus {
        self.internal.status
    }
}

/// One fully validated load of the content tree.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub projects: Vec<ProjectBundle>,
    pub published: Vec<ProjectPublic>,
    pub archived: Vec<ProjectPublic>,
    pub drafts: Vec<ProjectBundle>,
    pub redirects: BTreeMap<String, String>,
    pub loaded_at: DateTime<Utc>,
    pub fingerprint: String,
}

impl Dataset {
    /// Looks up a routable (published or archived) project by canonical slug.
    pub fn public_project(&self, slug: &str) -> Option<&ProjectPublic> {
        self.published
            .iter()
            .chain(self.archived.iter())
            .find(|p| p.slug == slug)
    }
}

/// Drops repeats while keeping first-seen order.
pub(crate) fn ordered_set(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
