//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use postboard_core::Post;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Request to create a post.
///
/// Required fields are optional here so that a missing one reaches the
/// presence check instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

impl CreatePostRequest {
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>, InvalidTimestamp> {
        parse_timestamp(self.updated_at.as_ref())
    }
}

/// Request to update a post. Every field is optional; `null` counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

impl UpdatePostRequest {
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>, InvalidTimestamp> {
        parse_timestamp(self.updated_at.as_ref())
    }
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid updatedAt value: {0}")]
pub struct InvalidTimestamp(pub String);

/// Interpret a client-supplied `updatedAt`.
///
/// Falsy values (`null`, `false`, `0`, `""`) yield `None`, same as an absent
/// field, so the caller falls back to the current time. Numbers are
/// milliseconds since the Unix epoch; strings are RFC 3339 or a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: Option<&Value>) -> Result<Option<DateTime<Utc>>, InvalidTimestamp> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            })
            .map(Some)
            .map_err(|_| InvalidTimestamp(s.clone())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(n)) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .ok_or_else(|| InvalidTimestamp(n.to_string()))?;
            DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| InvalidTimestamp(n.to_string()))
        }
        Some(other) => Err(InvalidTimestamp(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use postboard_core::PostId;
    use serde_json::json;

    #[test]
    fn falsy_timestamps_count_as_absent() {
        for value in [json!(null), json!(false), json!(0), json!("")] {
            assert_eq!(parse_timestamp(Some(&value)).unwrap(), None, "{value}");
        }
        assert_eq!(parse_timestamp(None).unwrap(), None);
    }

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
        let parsed = parse_timestamp(Some(&json!("2024-03-09T12:30:00+02:00"))).unwrap();
        assert_eq!(parsed, Some(expected));

        let midnight = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp(Some(&json!("2024-03-09"))).unwrap(), Some(midnight));
    }

    #[test]
    fn parses_epoch_millis() {
        let parsed = parse_timestamp(Some(&json!(1_700_000_000_000i64))).unwrap();
        assert_eq!(parsed, DateTime::from_timestamp_millis(1_700_000_000_000));
    }

    #[test]
    fn fractional_millis_near_zero_are_not_falsy() {
        let parsed = parse_timestamp(Some(&json!(0.5))).unwrap();
        assert_eq!(parsed, DateTime::from_timestamp_millis(0));

        let parsed = parse_timestamp(Some(&json!(1.9))).unwrap();
        assert_eq!(parsed, DateTime::from_timestamp_millis(1));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp(Some(&json!("yesterday"))).is_err());
        assert!(parse_timestamp(Some(&json!(true))).is_err());
        assert!(parse_timestamp(Some(&json!({"at": 1}))).is_err());
    }

    #[test]
    fn requests_use_camel_case() {
        let req: UpdatePostRequest =
            serde_json::from_value(json!({"content": "x", "updatedAt": "2024-01-01"})).unwrap();
        assert_eq!(req.title, None);
        assert_eq!(req.content.as_deref(), Some("x"));
        assert!(req.updated_at().unwrap().is_some());
    }

    #[test]
    fn response_shape() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let body = serde_json::to_value(PostResponse::from(Post {
            id: PostId::new("abc"),
            title: "A".into(),
            content: "B".into(),
            updated_at: at,
        }))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "id": "abc",
                "title": "A",
                "content": "B",
                "updatedAt": "2024-01-02T03:04:05Z",
            })
        );
    }
}
