//! Shared query parameter types for API handlers.

use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    5
}

/// Deserialize an `i64` that may arrive as a string.
///
/// `PaginationParams` is embedded in handler param structs via
/// `#[serde(flatten)]`, and flattened fields reach us from
/// `axum::extract::Query` as buffered strings rather than parsed numbers.
fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct I64Visitor;

    impl serde::de::Visitor<'_> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an integer or integer string")
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i64, E> {
            v.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// Generic pagination parameters (`?page=&limit=`).
///
/// Page numbering is 1-based; limit is capped at 100 items per page.
#[derive(Debug, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde(default = "default_page", deserialize_with = "i64_from_string_or_number")]
    #[validate(range(min = 1))]
    pub page: i64,
    #[serde(default = "default_limit", deserialize_with = "i64_from_string_or_number")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

impl PaginationParams {
    /// Row offset corresponding to the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Validate bounds, mapping violations to a 400 response.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
