//! Page slicing for recipe lists.

use serde::Serialize;

/// One page of a larger list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// "21 - 30 / 47", or "No results" for an empty list.
    pub fn summary(&self) -> String {
        if self.total_items == 0 {
            return "No results".to_string();
        }
        let first = (self.page - 1) * self.per_page + 1;
        let last = first + self.items.len() - 1;
        format!("{} - {} / {}", first, last, self.total_items)
    }
}

/// Slice `items` into the requested page. Out-of-range pages are clamped to
/// the nearest valid one; an empty list yields a single empty page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = paginate((1..=25).collect::<Vec<i32>>(), 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<i32>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_prev());
        assert_eq!(page.summary(), "11 - 20 / 25");
    }

    #[test]
    fn test_page_is_clamped() {
        let last = paginate((1..=25).collect::<Vec<_>>(), 99, 10);
        assert_eq!(last.page, 3);
        assert_eq!(last.items, vec![21, 22, 23, 24, 25]);
        assert!(!last.has_next());

        let first = paginate((1..=25).collect::<Vec<_>>(), 0, 10);
        assert_eq!(first.page, 1);
        assert!(!first.has_prev());
    }

    #[test]
    fn test_empty_list() {
        let page = paginate(Vec::<u8>::new(), 3, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.summary(), "No results");
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let page = paginate(vec!['a', 'b'], 2, 0);
        assert_eq!(page.items, vec!['b']);
        assert_eq!(page.total_pages, 2);
    }
}
