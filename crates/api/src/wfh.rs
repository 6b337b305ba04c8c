// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Work-from-home record queries.

use std::sync::Arc;

use staffdesk_domain::WfhRecord;
use staffdesk_persistence::{WfhFilter, WfhStore};

use crate::error::{ApiError, translate_persistence_error};
use crate::pagination::PageParams;
use crate::request_response::WfhQuery;

/// Read-only service over work-from-home records.
pub struct WfhService {
    store: Arc<dyn WfhStore>,
}

impl WfhService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn WfhStore>) -> Self {
        Self { store }
    }

    /// Lists records matching the query, sorted by date.
    ///
    /// # Errors
    ///
    /// Returns an error when the store query fails.
    pub async fn fetch(&self, query: &WfhQuery) -> Result<Vec<WfhRecord>, ApiError> {
        let filter: WfhFilter = build_filter(query);
        let params: PageParams = PageParams::resolve(query.page, query.page_size);
        self.store
            .fetch(&filter, params.offset(), params.page_size)
            .await
            .map_err(translate_persistence_error)
    }

    /// Counts records matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error when the store query fails.
    pub async fn count(&self, query: &WfhQuery) -> Result<u64, ApiError> {
        let filter: WfhFilter = build_filter(query);
        self.store
            .count(&filter)
            .await
            .map_err(translate_persistence_error)
    }
}

const fn build_filter(query: &WfhQuery) -> WfhFilter {
    WfhFilter {
        date: query.date,
        start_date: query.start_date,
        end_date: query.end_date,
        user_id: query.user_id,
    }
}
