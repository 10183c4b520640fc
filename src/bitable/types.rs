use crate::utils::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Response of `auth/v3/tenant_access_token/internal`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub tenant_access_token: Option<String>,
    pub expire: Option<u64>,
}

impl TokenResponse {
    pub fn into_token(self) -> Result<TenantToken, ApiError> {
        if self.code != 0 {
            return Err(ApiError::CodeError {
                code: self.code,
                msg: self.msg,
            });
        }

        let value = self
            .tenant_access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::MalformedResponse("missing tenant_access_token".to_string())
            })?;

        Ok(match self.expire {
            Some(secs) => TenantToken::new(value, Duration::from_secs(secs)),
            None => TenantToken::without_expiry(value),
        })
    }
}

/// Response of `bitable/v1/apps/:app_token/tables/:table_id/records`.
#[derive(Debug, Deserialize)]
pub struct RecordsResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<RecordsData>,
}

#[derive(Debug, Deserialize)]
pub struct RecordsData {
    pub has_more: Option<bool>,
    pub total: Option<u64>,
    pub page_token: Option<String>,
    pub items: Option<Vec<RecordRow>>,
}

impl RecordsResponse {
    pub fn into_page(self) -> Result<RecordPage, ApiError> {
        if self.code != 0 {
            return Err(ApiError::CodeError {
                code: self.code,
                msg: self.msg,
            });
        }

        let data = self
            .data
            .ok_or_else(|| ApiError::MalformedResponse("missing data".to_string()))?;

        Ok(RecordPage {
            rows: data.items.unwrap_or_default(),
            next_cursor: data.page_token.filter(|t| !t.is_empty()),
            has_more: data.has_more,
            total: data.total,
        })
    }
}

/// Bearer credential obtained once per run.
#[derive(Clone)]
pub struct TenantToken {
    value: String,
    expires_in: Option<Duration>,
    acquired_at: Instant,
}

impl TenantToken {
    pub fn new(value: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            value: value.into(),
            expires_in: Some(expires_in),
            acquired_at: Instant::now(),
        }
    }

    /// A token whose response declared no `expire`; it never reports expiry.
    pub fn without_expiry(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_in: None,
            acquired_at: Instant::now(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }

    pub fn is_expired(&self) -> bool {
        self.expires_in
            .is_some_and(|expires_in| self.acquired_at.elapsed() >= expires_in)
    }
}

impl fmt::Debug for TenantToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantToken")
            .field("value", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// One row of the translation table. Cells that were empty in the table are
/// simply missing from `fields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(default)]
    pub record_id: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, JsonValue>,
}

impl RecordRow {
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            record_id: None,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), JsonValue::String(v.into())))
                .collect(),
        }
    }

    /// Text of `column`, or `None` when the cell is absent or empty.
    ///
    /// Text cells come back either as a plain string or as rich text, an array
    /// of `{"type": "text", "text": "..."}` segments.
    pub fn text(&self, column: &str) -> Option<String> {
        let text: String = match self.fields.get(column)? {
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(segments) => segments
                .iter()
                .filter_map(|segment| segment.get("text").and_then(JsonValue::as_str))
                .collect(),
            _ => return None,
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub rows: Vec<RecordRow>,
    /// Opaque `page_token`; `None` on the last page.
    pub next_cursor: Option<String>,
    /// `None` when the response left `has_more` out.
    pub has_more: Option<bool>,
    pub total: Option<u64>,
}
