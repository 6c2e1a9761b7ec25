//! Typed access to the settings table

use griot_common::Result;
use sqlx::SqlitePool;
use tracing::warn;

/// Read an integer setting, falling back to a default on missing or
/// unparseable values
pub async fn get_setting_i64(pool: &SqlitePool, key: &str, default: i64) -> Result<i64> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match value {
        Some(s) => match s.parse::<i64>() {
            Ok(v) => Ok(v),
            Err(_) => {
                warn!("Setting '{}' has non-integer value '{}', using default {}", key, s, default);
                Ok(default)
            }
        },
        None => Ok(default),
    }
}

/// Listing limits for public read endpoints, loaded once at startup
#[derive(Debug, Clone, Copy)]
pub struct ListingLimits {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl ListingLimits {
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let default_limit = get_setting_i64(pool, "list_default_limit", 20).await?;
        let max_limit = get_setting_i64(pool, "list_max_limit", 100).await?;
        Ok(Self {
            default_limit,
            max_limit,
        })
    }

    /// Clamp a caller-requested limit to [1, max_limit], defaulting when absent
    pub fn clamp(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(self.default_limit).clamp(1, self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ListingLimits {
        ListingLimits {
            default_limit: 20,
            max_limit: 100,
        }
    }

    #[test]
    fn test_clamp_default() {
        assert_eq!(limits().clamp(None), 20);
    }

    #[test]
    fn test_clamp_in_range() {
        assert_eq!(limits().clamp(Some(50)), 50);
    }

    #[test]
    fn test_clamp_too_large() {
        assert_eq!(limits().clamp(Some(5000)), 100);
    }

    #[test]
    fn test_clamp_non_positive() {
        assert_eq!(limits().clamp(Some(0)), 1);
        assert_eq!(limits().clamp(Some(-5)), 1);
    }
}
