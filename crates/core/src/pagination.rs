//! Offset-based pagination shared by every list endpoint.

use crate::error::CoreError;

/// A validated page window. `from` is the number of rows to skip and `size`
/// the number of rows to return; the defaults are 0 and 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

pub const DEFAULT_FROM: i64 = 0;
pub const DEFAULT_SIZE: i64 = 10;

impl Page {
    /// Build a window from the raw `from`/`size` parameters. `from` must not
    /// be negative and `size` must be positive.
    pub fn new(from: Option<i64>, size: Option<i64>) -> Result<Self, CoreError> {
        let offset = from.unwrap_or(DEFAULT_FROM);
        let limit = size.unwrap_or(DEFAULT_SIZE);
        if offset < 0 {
            return Err(CoreError::Validation(format!(
                "from must not be negative: {offset}"
            )));
        }
        if limit <= 0 {
            return Err(CoreError::Validation(format!(
                "size must be positive: {limit}"
            )));
        }
        Ok(Page { offset, limit })
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: DEFAULT_FROM,
            limit: DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_to_first_ten_rows() {
        let page = Page::new(None, None).unwrap();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 10);
        assert_eq!(page, Page::default());
    }

    #[test]
    fn takes_explicit_window() {
        let page = Page::new(Some(20), Some(5)).unwrap();
        assert_eq!(page.offset, 20);
        assert_eq!(page.limit, 5);
    }

    #[test]
    fn rejects_negative_from() {
        assert_matches!(Page::new(Some(-1), None), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_non_positive_size() {
        assert_matches!(Page::new(None, Some(0)), Err(CoreError::Validation(_)));
        assert_matches!(Page::new(None, Some(-5)), Err(CoreError::Validation(_)));
    }
}
