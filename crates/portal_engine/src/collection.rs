use std::sync::{Arc, Mutex};

use portal_core::ScopeHeader;
use portal_logging::{portal_debug, portal_info, portal_warn};

use crate::{ApiError, Resource, Transport};

/// Upper bound on follow-up page requests for one fetch.
const MAX_PAGES: usize = 100;

/// Loading, error and data state of one collection query.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSnapshot<T> {
    /// Full unfiltered collection from the last successful query.
    pub data: Option<Arc<[T]>>,
    /// Scope details from the first page of the last successful query.
    pub header: Option<ScopeHeader>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            header: None,
            loading: false,
            error: None,
        }
    }
}

/// Remote collection fetcher: owns the query for one scope and the state of
/// its latest run.
///
/// Overlapping `refetch` calls each issue a request; the last one to resolve
/// wins.
pub struct RemoteCollection<R: Resource> {
    transport: Arc<dyn Transport>,
    scope_id: String,
    state: Mutex<FetchSnapshot<R::Item>>,
}

impl<R: Resource> RemoteCollection<R> {
    pub fn new(transport: Arc<dyn Transport>, scope_id: impl Into<String>) -> Self {
        Self {
            transport,
            scope_id: scope_id.into(),
            state: Mutex::new(FetchSnapshot::default()),
        }
    }

    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }

    pub fn snapshot(&self) -> FetchSnapshot<R::Item> {
        self.lock_state().clone()
    }

    pub fn header(&self) -> Option<ScopeHeader> {
        self.lock_state().header.clone()
    }

    pub async fn fetch(&self) -> Result<Arc<[R::Item]>, ApiError> {
        portal_info!("Fetching {} scope={}", R::NAME, self.scope_id);
        self.run().await
    }

    /// Re-issues the same query.
    pub async fn refetch(&self) -> Result<Arc<[R::Item]>, ApiError> {
        portal_info!("Refetching {} scope={}", R::NAME, self.scope_id);
        self.run().await
    }

    async fn run(&self) -> Result<Arc<[R::Item]>, ApiError> {
        self.lock_state().loading = true;

        let result = self.load_pages().await;

        let mut state = self.lock_state();
        state.loading = false;
        match result {
            Ok((items, header)) => {
                let items = Arc::<[R::Item]>::from(items);
                portal_info!(
                    "Loaded {} {} for scope={}",
                    items.len(),
                    R::NAME,
                    self.scope_id
                );
                state.data = Some(Arc::clone(&items));
                state.header = header;
                state.error = None;
                Ok(items)
            }
            Err(err) => {
                portal_warn!(
                    "Failed to load {} for scope={}: {} ({})",
                    R::NAME,
                    self.scope_id,
                    err,
                    err.kind
                );
                state.data = None;
                state.header = None;
                state.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Runs the list query and follows its pages. Any failing page fails the
    /// whole fetch.
    async fn load_pages(&self) -> Result<(Vec<R::Item>, Option<ScopeHeader>), ApiError> {
        let mut request = R::list_request(&self.scope_id);
        let mut items = Vec::new();
        let mut header = None;
        let mut pages = 1;
        loop {
            let data = self.transport.execute(&request).await?;
            if pages == 1 {
                header = R::decode_header(&data);
            }
            let next = R::next_page(&self.scope_id, &data);
            items.extend(R::decode_list(data)?);
            let Some(next) = next else {
                break;
            };
            if pages >= MAX_PAGES {
                portal_warn!(
                    "Stopped {} for scope={} after {} pages; list is incomplete",
                    R::NAME,
                    self.scope_id,
                    pages
                );
                break;
            }
            pages += 1;
            portal_debug!("Fetching page {} of {} scope={}", pages, R::NAME, self.scope_id);
            request = next;
        }
        Ok((items, header))
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FetchSnapshot<R::Item>> {
        // A poisoned lock still holds a consistent snapshot.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
