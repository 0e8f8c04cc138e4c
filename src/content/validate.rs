use serde_json::Value;

use crate::content::model::{REQUIRED_FIELDS, ProjectStatus, is_known_field};
use crate::content::paths::expected_content_uri;
use crate::content::record::RawRecord;
use crate::error::ContentError;

/// Runs the schema checks in order and stops at the first violation.
pub fn validate(raw: &RawRecord, origin: &str) -> Result<(), ContentError> {
    let fields = raw.fields();

    // Keys iterate sorted, so the reported field is deterministic.
    if let Some(field) = fields.keys().find(|key| !is_known_field(key)) {
        return Err(ContentError::UnknownField {
            origin: origin.to_string(),
            field: field.clone(),
        });
    }

    for field in REQUIRED_FIELDS {
        if fields.get(*field).is_none_or(Value::is_null) {
            return Err(ContentError::MissingField {
                origin: origin.to_string(),
                field: (*field).to_string(),
            });
        }
    }

    non_empty_str(raw, origin, "id")?;
    let slug = non_empty_str(raw, origin, "slug")?;

    if slug != origin {
        return Err(ContentError::SlugMismatch {
            origin: origin.to_string(),
            slug: slug.to_string(),
        });
    }

    let status = &fields["status"];
    if status.as_str().and_then(ProjectStatus::parse).is_none() {
        return Err(ContentError::InvalidStatus {
            origin: origin.to_string(),
            status: display_value(status),
        });
    }

    let expected = expected_content_uri(origin);
    let content_uri = &fields["contentUri"];
    match content_uri.as_str() {
        Some(uri) if !uri.trim().is_empty() && uri == expected => {}
        _ => {
            return Err(ContentError::ContentUriMismatch {
                origin: origin.to_string(),
                expected,
                actual: display_value(content_uri),
            });
        }
    }

    non_empty_str(raw, origin, "createdAt")?;
    non_empty_str(raw, origin, "updatedAt")?;

    non_empty_str(raw, origin, "title")?;
    non_empty_str(raw, origin, "summary")?;

    Ok(())
}

fn non_empty_str<'a>(
    raw: &'a RawRecord,
    origin: &str,
    field: &str,
) -> Result<&'a str, ContentError> {
    match raw.fields().get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.as_str()),
        Some(Value::String(_)) => Err(ContentError::invalid(origin, field, "must not be empty")),
        Some(other) => Err(ContentError::invalid(
            origin,
            field,
            format!("expected a string, got {}", json_type(other)),
        )),
        None => Err(ContentError::MissingField {
            origin: origin.to_string(),
            field: field.to_string(),
        }),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value("test", value).expect("object")
    }

    fn valid(slug: &str) -> Value {
        json!({
            "id": format!("prj-{slug}"),
            "slug": slug,
            "title": "Tide Clock",
            "summary": "A wall clock that tracks the tide.",
            "status": "published",
            "createdAt": "2024-01-01",
            "updatedAt": "2024-02-01",
            "contentUri": format!("content/projects/{slug}/content.md"),
        })
    }

    fn with(slug: &str, key: &str, value: Value) -> RawRecord {
        let mut base = valid(slug);
        base[key] = value;
        record(base)
    }

    fn without(slug: &str, key: &str) -> RawRecord {
        let mut base = valid(slug);
        base.as_object_mut().expect("object").remove(key);
        record(base)
    }

    #[test]
    fn accepts_minimal_valid_record() {
        validate(&record(valid("alpha")), "alpha").expect("valid");
    }

    #[test]
    fn rejects_unknown_field_even_when_otherwise_valid() {
        let err = validate(&with("alpha", "unexpectedField", json!(true)), "alpha")
            .expect_err("unknown field");
        match err {
            ContentError::UnknownField { origin, field } => {
                assert_eq!(origin, "alpha");
                assert_eq!(field, "unexpectedField");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_field_is_reported_before_missing_fields() {
        let raw = record(json!({ "bogus": 1 }));
        let err = validate(&raw, "alpha").expect_err("unknown");
        assert_eq!(err.code(), "UNKNOWN_FIELD");
    }

    #[test]
    fn rejects_each_missing_required_field() {
        for field in REQUIRED_FIELDS {
            let err = validate(&without("alpha", field), "alpha").expect_err("missing");
            match err {
                ContentError::MissingField { field: got, .. } => assert_eq!(got, *field),
                other => panic!("{field}: unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn null_required_field_counts_as_missing() {
        let err = validate(&with("alpha", "updatedAt", Value::Null), "alpha").expect_err("null");
        assert_eq!(err.code(), "MISSING_FIELD");
    }

    #[test]
    fn rejects_blank_id_and_slug() {
        let err = validate(&with("alpha", "id", json!("   ")), "alpha").expect_err("blank id");
        assert_eq!(err.code(), "INVALID_FIELD");

        let err = validate(&with("alpha", "slug", json!(42)), "alpha").expect_err("numeric slug");
        assert_eq!(err.code(), "INVALID_FIELD");
    }

    #[test]
    fn rejects_slug_that_disagrees_with_folder() {
        let err = validate(&record(valid("beta")), "alpha").expect_err("mismatch");
        match err {
            ContentError::SlugMismatch { origin, slug } => {
                assert_eq!(origin, "alpha");
                assert_eq!(slug, "beta");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_status_outside_enum() {
        let err = validate(&with("alpha", "status", json!("live")), "alpha").expect_err("status");
        assert_eq!(err.code(), "INVALID_STATUS");

        let err = validate(&with("alpha", "status", json!(1)), "alpha").expect_err("status");
        assert_eq!(err.code(), "INVALID_STATUS");
    }

    #[test]
    fn rejects_content_uri_for_other_folder() {
        let raw = with(
            "foo",
            "contentUri",
            json!("content/projects/bar/content.md"),
        );
        let err = validate(&raw, "foo").expect_err("uri");
        match err {
            ContentError::ContentUriMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, "content/projects/foo/content.md");
                assert_eq!(actual, "content/projects/bar/content.md");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn content_uri_is_not_normalized() {
        let raw = with(
            "foo",
            "contentUri",
            json!("./content/projects/foo/content.md"),
        );
        assert_eq!(
            validate(&raw, "foo").expect_err("uri").code(),
            "CONTENT_URI_MISMATCH"
        );
    }

    #[test]
    fn dates_are_opaque_but_non_empty() {
        validate(&with("alpha", "createdAt", json!("sometime in spring")), "alpha")
            .expect("lenient date");
        let err = validate(&with("alpha", "createdAt", json!("")), "alpha").expect_err("empty");
        assert_eq!(err.code(), "INVALID_FIELD");
    }

    #[test]
    fn rejects_empty_title() {
        let err = validate(&with("alpha", "title", json!("")), "alpha").expect_err("title");
        match err {
            ContentError::InvalidField { field, .. } => assert_eq!(field, "title"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
