//! "First N" pagination over an already-ordered list.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
}

/// A full result list plus the caller's optional page size. The list is kept
/// whole so `total_count` always reflects every item.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    items: Vec<T>,
    first: Option<usize>,
}

impl<T> Connection<T> {
    pub fn new(items: Vec<T>, first: Option<usize>) -> Self {
        Self { items, first }
    }

    /// At most `first` items from the front of the list
    pub fn nodes(&self) -> &[T] {
        match self.first {
            Some(first) if first < self.items.len() => &self.items[..first],
            _ => &self.items,
        }
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            has_next_page: self.first.is_some_and(|first| first < self.items.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_first_and_reports_more() {
        let conn = Connection::new(vec![1, 2, 3], Some(2));
        assert_eq!(conn.nodes(), &[1, 2]);
        assert_eq!(conn.total_count(), 3);
        assert!(conn.page_info().has_next_page);
    }

    #[test]
    fn page_size_bounds() {
        for n in 0..5usize {
            let items: Vec<usize> = (0..n).collect();
            for k in 0..7usize {
                let conn = Connection::new(items.clone(), Some(k));
                assert_eq!(conn.nodes().len(), n.min(k));
                assert_eq!(conn.total_count(), n);
                assert_eq!(conn.page_info().has_next_page, k < n);
            }
        }
    }

    #[test]
    fn no_limit_returns_everything() {
        let conn = Connection::new(vec!["a", "b"], None);
        assert_eq!(conn.nodes(), &["a", "b"]);
        assert!(!conn.page_info().has_next_page);
    }

    #[test]
    fn exact_fit_has_no_next_page() {
        let conn = Connection::new(vec![1, 2], Some(2));
        assert_eq!(conn.nodes(), &[1, 2]);
        assert!(!conn.page_info().has_next_page);
    }
}
