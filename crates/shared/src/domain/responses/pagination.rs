use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i32,
    pub limit: i32,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn new(page: i32, limit: i32, total_count: i64) -> Self {
        let limit_i64 = limit.max(1) as i64;
        let total_pages = (total_count + limit_i64 - 1) / limit_i64;

        Self {
            page,
            limit,
            total_count,
            total_pages,
            has_prev: page > 1,
            has_next: (page as i64) * limit_i64 < total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_set() {
        let meta = Pagination::new(1, 20, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn exact_multiple_of_limit() {
        let meta = Pagination::new(2, 10, 20);
        assert_eq!(meta.total_pages, 2);
        assert!(meta.has_prev);
        assert!(!meta.has_next);
    }

    #[test]
    fn partial_last_page() {
        let meta = Pagination::new(1, 20, 41);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn middle_page_has_both_directions() {
        let meta = Pagination::new(2, 10, 35);
        assert!(meta.has_prev);
        assert!(meta.has_next);
        assert_eq!(meta.total_pages, 4);
    }
}
