//! Session state for the proxy list screen.
//!
//! Holds the pagination cursor, the last fetched page, and the pending
//! delete confirmation. Mutations invalidate the cache and leave the
//! previously rendered page intact until the next refresh.

use validator::Validate;

use super::cache::{QueryCache, QueryKey};
use crate::client::ApiClient;
use crate::domain::{self, PageableResponse, Proxy, ProxyForm, DEFAULT_PAGE_SIZE};
use crate::errors::{Error, Result};

#[derive(Debug)]
pub struct ProxyListView {
    page: u32,
    size: u32,
    current: Option<PageableResponse<Proxy>>,
    pending_delete: Option<i64>,
}

impl Default for ProxyListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyListView {
    pub fn new() -> Self {
        Self { page: 0, size: DEFAULT_PAGE_SIZE, current: None, pending_delete: None }
    }

    /// Zero-indexed current page
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The last fetched page, if any fetch has completed
    pub fn current(&self) -> Option<&PageableResponse<Proxy>> {
        self.current.as_ref()
    }

    /// Whether the Next control is available, per the last fetch
    pub fn has_next(&self) -> bool {
        self.current.as_ref().map(|p| p.has_next).unwrap_or(false)
    }

    /// Whether the Previous control is available, per the last fetch
    pub fn has_previous(&self) -> bool {
        self.current.as_ref().map(|p| p.has_previous).unwrap_or(false)
    }

    /// Fetch the current page, through the cache when it is still valid
    pub async fn refresh(&mut self, client: &ApiClient, cache: &mut QueryCache) -> Result<()> {
        let key = QueryKey::Proxies { page: self.page, size: self.size };

        if let Some(page) = cache.get::<PageableResponse<Proxy>>(&key) {
            self.current = Some(page);
            return Ok(());
        }

        let page = client.list_proxies(self.page, self.size).await?;
        cache.put(key, &page);
        self.current = Some(page);
        Ok(())
    }

    /// Advance to the next page when the last fetch reported one
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Step back to the previous page when the last fetch reported one
    pub fn previous_page(&mut self) -> bool {
        if self.has_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Find a listed proxy by id on the current page
    pub fn find(&self, id: i64) -> Option<&Proxy> {
        self.current.as_ref().and_then(|p| p.content.iter().find(|proxy| proxy.id == id))
    }

    /// Submit the create/edit form. `editing` carries the id of an
    /// existing proxy (PUT); otherwise the proxy is created (POST). On
    /// success the proxy pages are invalidated; on failure nothing is.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        form: &ProxyForm,
        editing: Option<i64>,
    ) -> Result<Proxy> {
        form.validate().map_err(|e| domain::first_validation_error(&e))?;

        let saved = match editing {
            Some(id) => client.update_proxy(id, form).await?,
            None => client.create_proxy(form).await?,
        };

        cache.invalidate_proxies();
        Ok(saved)
    }

    /// Arm the delete confirmation for one proxy. No request is issued.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    /// Disarm the delete confirmation
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Issue the armed deletion. Exactly one DELETE per confirmation; the
    /// pending id is consumed whether the call succeeds or not. The page
    /// cursor does not move even if the page just emptied.
    pub async fn confirm_delete(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
    ) -> Result<i64> {
        let id = self
            .pending_delete
            .take()
            .ok_or_else(|| Error::validation("no deletion pending confirmation"))?;

        client.delete_proxy(id).await?;
        cache.invalidate_proxies();
        Ok(id)
    }
}
