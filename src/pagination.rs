use serde::Serialize;

/// Page size used when the configuration does not provide one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Builds the page-button window: edge pages, pages around the current one,
/// and `None` where a run of pages is elided.
pub fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// `max(1, ceil(len / page_size))`. A zero page size is treated as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// One page of the derived view plus the page count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice<T> {
    pub slice: Vec<T>,
    pub total_pages: usize,
}

/// Cuts page `page` (1-based) out of `view`.
///
/// Out-of-range pages yield an empty slice; the caller owns clamping.
pub fn paginate<T: Clone>(view: &[T], page_size: usize, page: usize) -> PageSlice<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(view.len(), page_size);

    let slice = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size).min(view.len());
            let end = start.saturating_add(page_size).min(view.len());
            view[start..end].to_vec()
        }
        None => Vec::new(),
    };

    PageSlice { slice, total_pages }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
        }
    }
}

/// Current page of a browsing session.
///
/// `current` is reset to 1 whenever an upstream parameter changes and clamped
/// into `[1, total_pages]` whenever the view shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    page_size: usize,
    total_pages: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total_pages: 1,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page count observed at the last [`PageState::sync`].
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Records the page count of a freshly derived view and pulls the current
    /// page back into range.
    pub fn sync(&mut self, view_len: usize) {
        self.total_pages = total_pages(view_len, self.page_size);
        self.current = self.current.clamp(1, self.total_pages);
    }

    /// Moves to `page` when it is within `[1, total_pages]`; otherwise leaves
    /// the state untouched and returns `false`.
    pub fn set(&mut self, page: usize) -> bool {
        if (1..=self.total_pages).contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.set(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.set(self.current.saturating_sub(1))
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_elides_far_pages() {
        let pages = get_pages(20, 10, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn window_without_gaps_for_few_pages() {
        assert_eq!(get_pages(3, 1, 2, 2, 4, 2), vec![Some(1), Some(2), Some(3)]);
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn second_page_holds_remainder() {
        let page = paginate(&["Apple", "Banana", "Chair"], 2, 2);
        assert_eq!(page.slice, vec!["Chair"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let view = ["a", "b", "c"];
        assert!(paginate(&view, 2, 3).slice.is_empty());
        assert!(paginate(&view, 2, 0).slice.is_empty());
        assert!(paginate(&view, 2, usize::MAX).slice.is_empty());
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let page = paginate::<u8>(&[], 4, 1);
        assert!(page.slice.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_state_clamps_when_view_shrinks() {
        let mut state = PageState::new(10);
        state.sync(45);
        assert!(state.set(5));
        state.sync(12);
        assert_eq!(state.current(), 2);
        state.sync(0);
        assert_eq!(state.current(), 1);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn page_state_ignores_out_of_range_navigation() {
        let mut state = PageState::new(10);
        state.sync(25);
        assert!(!state.set(0));
        assert!(!state.set(4));
        assert!(!state.prev());
        assert!(state.next());
        assert!(state.next());
        assert!(!state.next());
        assert_eq!(state.current(), 3);
        assert!(state.has_prev());
        assert!(!state.has_next());
    }
}
