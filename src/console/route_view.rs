//! Session state for one proxy's route list screen.
//!
//! Routes are fetched in one unpaginated list. The status toggle posts the
//! new boolean immediately and invalidates the cached list; the rendered
//! state reflects backend truth only after the next refresh, never an
//! optimistic local flip.

use super::cache::{QueryCache, QueryKey};
use crate::client::ApiClient;
use crate::domain::{Route, RouteForm, RouteListResponse};
use crate::errors::Result;

#[derive(Debug)]
pub struct RouteListView {
    proxy: String,
    current: Option<Vec<Route>>,
    selected: Option<String>,
}

impl RouteListView {
    pub fn new(proxy: impl Into<String>) -> Self {
        Self { proxy: proxy.into(), current: None, selected: None }
    }

    /// The proxy whose routes this view shows
    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    /// The last fetched route list
    pub fn routes(&self) -> &[Route] {
        self.current.as_deref().unwrap_or(&[])
    }

    /// Find a listed route by its id
    pub fn find(&self, route_id: &str) -> Option<&Route> {
        self.routes().iter().find(|r| r.route_id == route_id)
    }

    /// Fetch the route list, through the cache when it is still valid
    pub async fn refresh(&mut self, client: &ApiClient, cache: &mut QueryCache) -> Result<()> {
        let key = QueryKey::Routes { proxy: self.proxy.clone() };

        if let Some(response) = cache.get::<RouteListResponse>(&key) {
            self.current = Some(response.routes);
            return Ok(());
        }

        let response = client.list_routes(&self.proxy).await?;
        cache.put(key, &response);
        self.current = Some(response.routes);
        Ok(())
    }

    /// Post the new enablement state for a route and invalidate the cached
    /// list. Rapid repeated calls each issue their own request, in
    /// submission order; the view only changes on the next refresh.
    pub async fn toggle(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        route_id: &str,
        enabled: bool,
    ) -> Result<()> {
        client.set_route_status(&self.proxy, route_id, enabled).await?;
        cache.invalidate_routes(&self.proxy);
        Ok(())
    }

    /// Submit the route create/edit form. The form validates itself and
    /// converts its local timestamps while building the wire body.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        cache: &mut QueryCache,
        form: &RouteForm,
        editing: bool,
    ) -> Result<Route> {
        let request = form.to_request()?;

        let saved = if editing {
            client.update_route(&self.proxy, &request).await?
        } else {
            client.create_route(&self.proxy, &request).await?
        };

        cache.invalidate_routes(&self.proxy);
        Ok(saved)
    }

    /// Select a listed route for the detail panel. Display state only.
    pub fn select(&mut self, route_id: &str) -> bool {
        if self.find(route_id).is_some() {
            self.selected = Some(route_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected route, if it is still in the fetched list
    pub fn selected(&self) -> Option<&Route> {
        self.selected.as_deref().and_then(|id| self.find(id))
    }
}
