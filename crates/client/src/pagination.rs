//! Pagination types.
//!
//! The backend returns two incompatible page shapes: `{total, rows}` from
//! most resources and `{total, pageNum, pageSize, list}` from the category
//! listing. Both decode through [`RawPage`] and are converted into the one
//! internal [`Page`] at the client boundary.

use serde::{Deserialize, Serialize};

/// Default page size used by list screens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Requested slice of a listing. `page_num` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Builds a request, clamping both values to at least 1.
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num: page_num.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Zero-based index of the first row on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_num.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Number of rows this page should hold given `total` rows overall.
    pub fn expected_len(&self, total: u64) -> u64 {
        total
            .saturating_sub(self.offset())
            .min(u64::from(self.page_size))
    }

    /// Query parameters as the backend names them.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("pageNum".to_string(), self.page_num.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ]
    }
}

/// Both wire shapes of a paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPage<T> {
    /// `{total, pageNum, pageSize, list}`.
    Numbered {
        total: u64,
        #[serde(rename = "pageNum")]
        page_num: Option<u32>,
        #[serde(rename = "pageSize")]
        page_size: Option<u32>,
        list: Vec<T>,
    },
    /// `{total, rows}`.
    Rows { total: u64, rows: Vec<T> },
}

impl<T> RawPage<T> {
    /// Convert into a [`Page`], filling in whatever the wire shape omits
    /// from the request that produced it.
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        match self {
            RawPage::Rows { total, rows } => Page {
                total,
                page_num: request.page_num,
                page_size: request.page_size,
                items: rows,
            },
            RawPage::Numbered {
                total,
                page_num,
                page_size,
                list,
            } => Page {
                total,
                page_num: page_num.unwrap_or(request.page_num),
                page_size: page_size.unwrap_or(request.page_size),
                items: list,
            },
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Server-reported count across all pages.
    pub total: u64,
    pub page_num: u32,
    pub page_size: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` rows (at least 1).
    pub fn page_count(&self) -> u64 {
        let size = u64::from(self.page_size.max(1));
        self.total.div_ceil(size).max(1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total: self.total,
            page_num: self.page_num,
            page_size: self.page_size,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_shape_takes_request_numbers() {
        let raw: RawPage<i32> = serde_json::from_value(json!({"total": 3, "rows": [1, 2, 3]})).unwrap();
        let page = raw.into_page(PageRequest::new(2, 3));
        assert_eq!(page.page_num, 2);
        assert_eq!(page.items, vec![1, 2, 3]);
    }

    #[test]
    fn list_shape_keeps_server_numbers() {
        let raw: RawPage<i32> = serde_json::from_value(json!({
            "total": 11, "pageNum": 2, "pageSize": 5, "list": [6, 7]
        }))
        .unwrap();
        let page = raw.into_page(PageRequest::new(1, 10));
        assert_eq!((page.page_num, page.page_size, page.total), (2, 5, 11));
        assert_eq!(page.page_count(), 3);
    }

    #[test]
    fn last_partial_page_length() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 20);
        assert_eq!(request.expected_len(25), 5);
        assert_eq!(PageRequest::new(4, 10).expected_len(25), 0);
    }

    #[test]
    fn request_clamps_to_one() {
        assert_eq!(PageRequest::new(0, 0), PageRequest::new(1, 1));
    }
}
