use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub page: u64,
    pub limit: u64,
    pub total_records: u64,
    pub total_pages: u64,
}

impl Meta {
    /// `total_pages` is `ceil(total / limit)`, or 1 when either is zero.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if total > 0 && limit > 0 {
            total.div_ceil(limit)
        } else {
            1
        };

        Self {
            page,
            limit,
            total_records: total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Meta::new(21, 1, 10).total_pages, 3);
        assert_eq!(Meta::new(20, 1, 10).total_pages, 2);
        assert_eq!(Meta::new(1, 1, 10).total_pages, 1);
    }

    #[test]
    fn test_total_pages_is_one_when_nothing_to_divide() {
        assert_eq!(Meta::new(0, 1, 10).total_pages, 1);
        assert_eq!(Meta::new(35, 1, 0).total_pages, 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Meta::new(25, 2, 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "limit": 10, "totalRecords": 25, "totalPages": 3})
        );
    }
}
