//! Zero-based offset windows.

/// Page size used when callers do not configure one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Window of at most `limit` rows starting at `offset`.
///
/// ## Invariants
/// - `limit` is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request from a client-supplied offset, clamping negative
    /// offsets to zero and zero limits to one.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(-3, 0);
    /// assert_eq!((page.offset(), page.limit()), (0, 1));
    /// ```
    #[must_use]
    pub fn new(offset: i64, limit: u64) -> Self {
        Self::starting_at(u64::try_from(offset).unwrap_or(0), limit)
    }

    /// Build a request from an already non-negative offset.
    #[must_use]
    pub fn starting_at(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit: limit.max(1),
        }
    }

    /// First page with the default size.
    #[must_use]
    pub fn first() -> Self {
        Self::starting_at(0, DEFAULT_PAGE_SIZE)
    }

    /// Zero-based index of the first row in the window.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of rows in the window.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Index of the last row in the window, inclusive.
    #[must_use]
    pub const fn last_index(&self) -> u64 {
        self.offset.saturating_add(self.limit - 1)
    }

    /// The window immediately following this one, if `returned` rows filled
    /// the current window.
    ///
    /// A short page means the result set is exhausted, so no successor is
    /// offered.
    #[must_use]
    pub fn next_after(&self, returned: usize) -> Option<Self> {
        let returned = u64::try_from(returned).ok()?;
        if returned < self.limit {
            return None;
        }
        self.offset
            .checked_add(self.limit)
            .map(|offset| Self::starting_at(offset, self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    //! Offset arithmetic coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(-1, 0)]
    #[case(i64::MIN, 0)]
    #[case(40, 40)]
    fn new_clamps_negative_offsets(#[case] raw: i64, #[case] expected: u64) {
        assert_eq!(PageRequest::new(raw, DEFAULT_PAGE_SIZE).offset(), expected);
    }

    #[rstest]
    fn consecutive_pages_do_not_overlap() {
        let first = PageRequest::first();
        let second = first.next_after(20).expect("full page");
        assert_eq!(first.last_index() + 1, second.offset());
        assert_eq!(second.limit(), first.limit());
    }

    #[rstest]
    #[case(0)]
    #[case(19)]
    fn short_pages_have_no_successor(#[case] returned: usize) {
        assert!(PageRequest::first().next_after(returned).is_none());
    }

    #[rstest]
    fn successor_is_none_on_offset_overflow() {
        let page = PageRequest::starting_at(u64::MAX, 2);
        assert!(page.next_after(2).is_none());
    }
}
