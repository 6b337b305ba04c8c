// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page/size parameters shared by the list endpoints.

/// Default page size when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Resolved pagination parameters.
///
/// Pages are 1-based; a missing or zero page is treated as page 1 and an
/// out-of-range size is clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// The 1-based page number.
    pub page: u64,
    /// Records per page.
    pub page_size: u32,
}

impl PageParams {
    /// Resolves raw query values into usable parameters.
    #[must_use]
    pub fn resolve(page: Option<u64>, page_size: Option<u32>) -> Self {
        let page: u64 = match page {
            Some(p) if p >= 1 => p,
            _ => 1,
        };
        let page_size: u32 = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, page_size }
    }

    /// The number of records to skip for this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(u64::from(self.page_size))
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
