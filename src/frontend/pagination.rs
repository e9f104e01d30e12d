//! Page-number controls for a paginated listing.

/// Number of consecutive page buttons shown around the current page.
pub const WINDOW_SIZE: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Prev { target: u64, disabled: bool },
    Page { number: u64, active: bool },
    /// Placeholder for skipped page numbers.
    Ellipsis,
    Next { target: u64, disabled: bool },
}

impl PageControl {
    pub fn label(&self) -> String {
        match self {
            PageControl::Prev { .. } => "Prev".to_string(),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "…".to_string(),
            PageControl::Next { .. } => "Next".to_string(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            PageControl::Prev { disabled, .. } | PageControl::Next { disabled, .. } => *disabled,
            PageControl::Ellipsis => true,
            PageControl::Page { .. } => false,
        }
    }

    /// The page a click navigates to. Disabled controls, the ellipsis and the current page
    /// are no-ops.
    pub fn click(&self, current_page: u64) -> Option<u64> {
        let target = match *self {
            PageControl::Prev { target, disabled } | PageControl::Next { target, disabled } => {
                if disabled {
                    return None;
                }
                target
            }
            PageControl::Page { number, .. } => number,
            PageControl::Ellipsis => return None,
        };
        (target != current_page).then_some(target)
    }
}

/// `ceil(nb_hits / page_size)`, never less than one page.
pub fn total_pages(nb_hits: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    nb_hits.div_ceil(page_size).max(1)
}

/// Builds Prev, the page window (with the first and last page pinned), and Next.
///
/// Returns no controls when everything fits on one page.
pub fn render_pagination(total_pages: u64, current_page: u64) -> Vec<PageControl> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current_page.clamp(1, total_pages);

    let half = WINDOW_SIZE / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + WINDOW_SIZE - 1).min(total_pages);
    if end - start < WINDOW_SIZE - 1 {
        start = end.saturating_sub(WINDOW_SIZE - 1).max(1);
    }

    let page = |number: u64| PageControl::Page {
        number,
        active: number == current,
    };

    let mut controls = Vec::with_capacity(WINDOW_SIZE as usize + 6);
    controls.push(PageControl::Prev {
        target: current.saturating_sub(1).max(1),
        disabled: current == 1,
    });

    if start > 1 {
        controls.push(page(1));
        if start > 2 {
            controls.push(PageControl::Ellipsis);
        }
    }
    controls.extend((start..=end).map(page));
    if end < total_pages {
        if end < total_pages - 1 {
            controls.push(PageControl::Ellipsis);
        }
        controls.push(page(total_pages));
    }

    controls.push(PageControl::Next {
        target: (current + 1).min(total_pages),
        disabled: current == total_pages,
    });
    controls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(controls: &[PageControl]) -> Vec<String> {
        controls.iter().map(PageControl::label).collect()
    }

    #[test]
    fn test_middle_of_twenty_pages() {
        let controls = render_pagination(20, 10);
        assert_eq!(
            pages(&controls),
            vec!["Prev", "1", "…", "7", "8", "9", "10", "11", "12", "13", "…", "20", "Next"]
        );
        assert_eq!(controls[0], PageControl::Prev { target: 9, disabled: false });
        assert_eq!(controls[12], PageControl::Next { target: 11, disabled: false });
        assert!(controls.contains(&PageControl::Page { number: 10, active: true }));
    }

    #[test]
    fn test_boundaries_disable_prev_and_next() {
        let first = render_pagination(5, 1);
        assert_eq!(first[0], PageControl::Prev { target: 1, disabled: true });
        assert_eq!(pages(&first), vec!["Prev", "1", "2", "3", "4", "5", "Next"]);

        let last = render_pagination(5, 5);
        assert_eq!(
            *last.last().unwrap(),
            PageControl::Next { target: 5, disabled: true }
        );
    }

    #[test]
    fn test_window_clamps_near_edges() {
        assert_eq!(
            pages(&render_pagination(20, 2)),
            vec!["Prev", "1", "2", "3", "4", "5", "6", "7", "…", "20", "Next"]
        );
        assert_eq!(
            pages(&render_pagination(20, 19)),
            vec!["Prev", "1", "…", "14", "15", "16", "17", "18", "19", "20", "Next"]
        );
        // window reaches page 2: page 1 without an ellipsis
        assert_eq!(
            pages(&render_pagination(9, 5)),
            vec!["Prev", "1", "2", "3", "4", "5", "6", "7", "8", "9", "Next"]
        );
    }

    #[test]
    fn test_single_page_has_no_controls() {
        assert!(render_pagination(1, 1).is_empty());
        assert!(render_pagination(0, 1).is_empty());
    }

    #[test]
    fn test_click_semantics() {
        let controls = render_pagination(20, 10);
        assert_eq!(controls[0].click(10), Some(9));
        assert_eq!(PageControl::Page { number: 10, active: true }.click(10), None);
        assert_eq!(PageControl::Page { number: 20, active: false }.click(10), Some(20));
        assert_eq!(PageControl::Ellipsis.click(10), None);
        assert_eq!(PageControl::Prev { target: 1, disabled: true }.click(1), None);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 4), 1);
        assert_eq!(total_pages(4, 4), 1);
        assert_eq!(total_pages(5, 4), 2);
        assert_eq!(total_pages(23, 10), 3);
    }
}
