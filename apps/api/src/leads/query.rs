use serde::Deserialize;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::lead::LeadStatus;
use crate::store::LeadFilter;

/// Query parameters accepted by `GET /api/v1/leads`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

/// The list query after validation: conjunctive filters plus a
/// limit/offset window derived from 1-indexed pagination.
#[derive(Debug)]
pub struct ListQuery {
    pub filter: LeadFilter,
    pub page: i64,
    pub page_size: i64,
    pub limit: i64,
    pub offset: i64,
}

impl ListParams {
    /// Validates pagination and filters. `page_size` above the configured
    /// maximum is clamped rather than rejected; non-positive values and
    /// unknown status names are errors.
    pub fn validate(self, config: &Config) -> Result<ListQuery, AppError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::InvalidQuery("page must be >= 1".to_string()));
        }

        let requested = self.page_size.unwrap_or(config.default_page_size as i64);
        if requested < 1 {
            return Err(AppError::InvalidQuery("page_size must be >= 1".to_string()));
        }
        let page_size = requested.min(config.max_page_size as i64);

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(LeadStatus::parse(raw).ok_or_else(|| {
                AppError::InvalidQuery(format!(
                    "unknown status '{raw}'; expected 'pending' or 'reached_out'"
                ))
            })?),
        };

        let filter = LeadFilter {
            name: non_empty(self.name),
            email: non_empty(self.email),
            status,
        };

        // Absurdly large page numbers must not overflow; a saturated offset
        // just yields an empty page.
        let offset = (page - 1).saturating_mul(page_size);

        Ok(ListQuery {
            filter,
            page,
            page_size,
            limit: page_size,
            offset,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            jwt_secret: "secret".to_string(),
            token_ttl_hours: 24,
            upload_dir: "uploads".into(),
            max_upload_bytes: 5 * 1024 * 1024,
            max_page_size: 100,
            default_page_size: 20,
            admin_email: None,
            admin_password: None,
            sendgrid_api_key: None,
            notify_from: None,
            notify_inbox: None,
            notify_timeout_secs: 10,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn defaults_to_first_page_with_default_size() {
        let q = ListParams::default().validate(&test_config()).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 20);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn oversized_page_size_is_clamped_to_max() {
        let q = ListParams {
            page_size: Some(5000),
            ..Default::default()
        }
        .validate(&test_config())
        .unwrap();
        assert_eq!(q.page_size, 100);
    }

    #[test]
    fn non_positive_pagination_is_rejected() {
        for params in [
            ListParams {
                page: Some(0),
                ..Default::default()
            },
            ListParams {
                page: Some(-3),
                ..Default::default()
            },
            ListParams {
                page_size: Some(0),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                params.validate(&test_config()),
                Err(AppError::InvalidQuery(_))
            ));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let params = ListParams {
            status: Some("contacted".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(&test_config()),
            Err(AppError::InvalidQuery(_))
        ));
    }

    #[test]
    fn offset_follows_one_indexed_pages() {
        let q = ListParams {
            page: Some(3),
            page_size: Some(10),
            ..Default::default()
        }
        .validate(&test_config())
        .unwrap();
        assert_eq!(q.offset, 20);
        assert_eq!(q.limit, 10);
    }

    #[test]
    fn huge_page_number_saturates_instead_of_overflowing() {
        let q = ListParams {
            page: Some(i64::MAX),
            page_size: Some(50),
            ..Default::default()
        }
        .validate(&test_config())
        .unwrap();
        assert_eq!(q.offset, i64::MAX);
        assert_eq!(q.limit, 50);
    }

    #[test]
    fn blank_filters_are_dropped() {
        let q = ListParams {
            name: Some("  ".to_string()),
            email: Some(String::new()),
            status: Some(String::new()),
            ..Default::default()
        }
        .validate(&test_config())
        .unwrap();
        assert!(q.filter.name.is_none());
        assert!(q.filter.email.is_none());
        assert!(q.filter.status.is_none());
    }
}
