//! Page-number strip: at most five numbered buttons, always showing the
//! first and last page and the neighbourhood of the current one.

/// One slot in the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

const MAX_BUTTONS: usize = 5;

/// Empty when there are no pages (the control is hidden).
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total == 0 {
        return Vec::new();
    }
    if total <= MAX_BUTTONS {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        let mut items: Vec<PageItem> = (1..=4).map(Page).collect();
        items.extend([Ellipsis, Page(total)]);
        items
    } else if current >= total - 2 {
        let mut items = vec![Page(1), Ellipsis];
        items.extend((total - 3..=total).map(Page));
        items
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_no_pages_hides_control() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_small_totals_show_everything() {
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(3, 5), (1..=5).map(Page).collect::<Vec<_>>());
    }

    #[test]
    fn test_near_start() {
        let expected = vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)];
        assert_eq!(page_window(1, 10), expected);
        assert_eq!(page_window(3, 10), expected);
    }

    #[test]
    fn test_near_end() {
        let expected = vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)];
        assert_eq!(page_window(8, 10), expected);
        assert_eq!(page_window(10, 10), expected);
    }

    #[test]
    fn test_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_six_pages_boundary() {
        // current 4 == total - 2 takes the tail branch
        assert_eq!(
            page_window(4, 6),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }
}
