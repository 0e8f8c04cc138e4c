use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::content::model::{
    ImageInput, ImageRef, ProjectBundle, ProjectInternal, ProjectPublic, ProjectStatus,
    ordered_set,
};
use crate::content::validate::{json_type, validate};
use crate::error::ContentError;

/// An untyped `project.json` object. Only lives long enough to be validated and
/// projected into a [`ProjectBundle`].
#[derive(Debug, Clone)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn parse(origin: &str, text: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(text).map_err(|err| ContentError::Malformed {
            origin: origin.to_string(),
            err,
        })?;
        Self::from_value(origin, value)
    }

    pub fn from_value(origin: &str, value: Value) -> Result<Self, ContentError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ContentError::InvalidRecord {
                origin: origin.to_string(),
            }),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Validates the record against `origin` and splits it into typed views.
    ///
    /// `markdown` is the contents of the sibling `content.md`; it becomes the
    /// public `body` only when the record carries no inline body.
    pub fn into_bundle(self, origin: &str, markdown: &str) -> Result<ProjectBundle, ContentError> {
        validate(&self, origin)?;

        let mut fields = Fields {
            origin,
            map: self.fields,
        };

        let slug = fields.required_string("slug")?;
        let inline_body = fields.take::<String>("body")?;
        let body = match inline_body {
            Some(body) => Some(body),
            None if !markdown.is_empty() => Some(markdown.to_string()),
            None => None,
        };

        let public = ProjectPublic {
            slug: slug.clone(),
            title: fields.required_string("title")?,
            summary: fields.required_string("summary")?,
            intro: fields.take("intro")?,
            body,
            hero_image: fields.image("heroImage")?,
            gallery: fields.gallery("gallery")?,
            tags: fields.take::<Vec<String>>("tags")?.map(ordered_set),
            tech: fields.take::<Vec<String>>("tech")?.map(ordered_set),
            category: fields.take("category")?,
            featured: fields.take("featured")?,
            weight: fields.take("weight")?,
            sort_date: fields.take("sortDate")?,
            timeframe: fields.take("timeframe")?,
            role: fields.take("role")?,
            collaborators: fields.take("collaborators")?,
            client_public_name: fields.take("clientPublicName")?,
            live_url: fields.take("liveUrl")?,
            repo_url: fields.take("repoUrl")?,
            canonical: fields.take("canonical")?,
            seo: fields.object("seo")?,
        };

        let status_raw = fields.required_string("status")?;
        let status = ProjectStatus::parse(&status_raw).ok_or_else(|| ContentError::InvalidStatus {
            origin: origin.to_string(),
            status: status_raw.clone(),
        })?;

        let internal = ProjectInternal {
            id: fields.required_string("id")?,
            status,
            created_at: fields.required_string("createdAt")?,
            updated_at: fields.required_string("updatedAt")?,
            content_uri: fields.required_string("contentUri")?,
            aliases: fields.aliases()?,
            internal_notes: fields.take("internalNotes")?,
            metadata: fields.take("metadata")?,
        };

        Ok(ProjectBundle {
            slug,
            public,
            internal,
        })
    }
}

struct Fields<'a> {
    origin: &'a str,
    map: Map<String, Value>,
}

impl Fields<'_> {
    /// Removes `field` and decodes it. Absent and `null` both read as `None`.
    fn take<T: DeserializeOwned>(&mut self, field: &str) -> Result<Option<T>, ContentError> {
        match self.map.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| ContentError::invalid(self.origin, field, err.to_string())),
        }
    }

    fn required_string(&mut self, field: &str) -> Result<String, ContentError> {
        self.take::<String>(field)?
            .ok_or_else(|| ContentError::MissingField {
                origin: self.origin.to_string(),
                field: field.to_string(),
            })
    }

    fn object(&mut self, field: &str) -> Result<Option<Value>, ContentError> {
        match self.take::<Value>(field)? {
            Some(value) if value.is_object() => Ok(Some(value)),
            Some(other) => Err(ContentError::invalid(
                self.origin,
                field,
                format!("expected an object, got {}", json_type(&other)),
            )),
            None => Ok(None),
        }
    }

    fn image(&mut self, field: &str) -> Result<Option<ImageRef>, ContentError> {
        let Some(input) = self.take::<ImageInput>(field)? else {
            return Ok(None);
        };
        let image = ImageRef::from(input);
        check_image_url(self.origin, field, &image)?;
        Ok(Some(image))
    }

    fn gallery(&mut self, field: &str) -> Result<Option<Vec<ImageRef>>, ContentError> {
        let Some(inputs) = self.take::<Vec<ImageInput>>(field)? else {
            return Ok(None);
        };
        let images = inputs.into_iter().map(ImageRef::from).collect::<Vec<_>>();
        for image in &images {
            check_image_url(self.origin, field, image)?;
        }
        Ok(Some(images))
    }

    fn aliases(&mut self) -> Result<Vec<String>, ContentError> {
        let aliases = self.take::<Vec<String>>("aliases")?.unwrap_or_default();
        if aliases.iter().any(|alias| alias.trim().is_empty()) {
            return Err(ContentError::invalid(
                self.origin,
                "aliases",
                "aliases must be non-empty strings",
            ));
        }
        Ok(ordered_set(aliases))
    }
}

fn check_image_url(origin: &str, field: &str, image: &ImageRef) -> Result<(), ContentError> {
    if image.url.trim().is_empty() {
        return Err(ContentError::invalid(origin, field, "image url must not be empty"));
    }
    Ok(())
}
