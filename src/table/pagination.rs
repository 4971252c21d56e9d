//! Page state with silent clamping

/// Current page and page count, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    total_pages: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

impl PageState {
    pub fn new(page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
        }
    }

    /// Page count for `count` items at `per_page` items per page
    pub fn pages_for(count: usize, per_page: usize) -> usize {
        if per_page == 0 {
            return 1;
        }
        count.div_ceil(per_page).max(1)
    }

    /// Keep the current page, re-derive the total from an item count
    pub fn from_count(mut self, count: usize, per_page: usize) -> Self {
        self.set_total(Self::pages_for(count, per_page));
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// The pager is only shown when there is somewhere to go
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Returns true when the page changed
    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    /// Returns true when the page changed
    pub fn previous(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Jump to `page`, clamped into `[1, total_pages]`
    pub fn go_to(&mut self, page: usize) -> bool {
        let clamped = page.clamp(1, self.total_pages);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// New page count; the current page is pulled back inside it
    pub fn set_total(&mut self, total_pages: usize) {
        self.total_pages = total_pages.max(1);
        self.page = self.page.min(self.total_pages);
    }
}
