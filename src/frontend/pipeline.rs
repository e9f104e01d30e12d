//! Drives a [`CatalogView`] through the fetch lifecycle.
//!
//! All mutable state lives in a caller-owned [`Session`], so independent pipelines (and
//! tests) never share facets or page positions. A fetch that is superseded by a newer
//! action is not cancelled; whichever response lands last is what the view shows.

use super::cards::ProductCard;
use super::client::CatalogClient;
use super::facets::FacetSet;
use super::filters::FilterForm;
use super::pagination::{render_pagination, total_pages, PageControl};
use super::view::{CatalogView, StatusState};
use tracing::{debug, warn};

/// Products per page requested by the pipeline.
pub const DEFAULT_PAGE_SIZE: u64 = 4;

/// Per-session browsing state.
#[derive(Debug, Clone)]
pub struct Session {
    pub facets: FacetSet,
    pub form: FilterForm,
    pub current_page: u64,
    pub page_size: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            facets: FacetSet::new(),
            form: FilterForm::default(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Form selections plus the page window.
    pub fn page_query(&self) -> Vec<(String, String)> {
        let mut query = self.form.to_query();
        query.push(("page".to_string(), self.current_page.to_string()));
        query.push(("limit".to_string(), self.page_size.to_string()));
        query
    }
}

pub struct RenderPipeline<C> {
    client: C,
}

impl<C: CatalogClient> RenderPipeline<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetches the session's current page and repaints `view`. Returns the final status.
    pub async fn fetch_products(&self, session: &mut Session, view: &mut CatalogView) -> StatusState {
        view.show_status(StatusState::Loading);

        let page = match self.client.fetch_page(&session.page_query()).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, page = session.current_page, "Failed to fetch products");
                view.show_status(StatusState::Error);
                return view.status;
            }
        };

        session.facets.fold(&page.products);
        session.form.company = session.facets.reconcile(&session.form.company);
        view.company_options = session.facets.dropdown_options();
        view.selected_company = session.form.company.clone();

        view.render_products(page.products.iter().map(ProductCard::from_document).collect());

        let total = page
            .nb_hits
            .map_or(1, |hits| total_pages(hits, session.page_size));
        view.pagination = render_pagination(total, session.current_page);
        debug!(
            page = session.current_page,
            total_pages = total,
            shown = view.grid.len(),
            "Rendered catalog page"
        );
        view.status
    }

    /// Re-runs the query from page one with the current form selections.
    pub async fn apply_filters(&self, session: &mut Session, view: &mut CatalogView) -> StatusState {
        session.current_page = 1;
        self.fetch_products(session, view).await
    }

    /// Clears every filter control and shows the first page.
    pub async fn reset(&self, session: &mut Session, view: &mut CatalogView) -> StatusState {
        session.form.reset();
        view.selected_company = session.form.company.clone();
        session.current_page = 1;
        self.fetch_products(session, view).await
    }

    pub async fn change_page(
        &self,
        session: &mut Session,
        view: &mut CatalogView,
        page: u64,
    ) -> StatusState {
        session.current_page = page.max(1);
        self.fetch_products(session, view).await
    }

    /// Handles a click on a pagination control. Returns `None` when the click is a no-op.
    pub async fn click(
        &self,
        session: &mut Session,
        view: &mut CatalogView,
        control: PageControl,
    ) -> Option<StatusState> {
        let target = control.click(session.current_page)?;
        Some(self.change_page(session, view, target).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::client::{FetchError, PageResponse};
    use async_trait::async_trait;
    use serde_json::{json, Value as JsonValue};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every query it was asked for.
    #[derive(Default)]
    struct ScriptedClient {
        responses: Mutex<VecDeque<Result<PageResponse, FetchError>>>,
        queries: Mutex<Vec<Vec<(String, String)>>>,
    }

    impl ScriptedClient {
        fn with(responses: Vec<Result<PageResponse, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                queries: Mutex::default(),
            }
        }

        fn last_query(&self) -> Vec<(String, String)> {
            self.queries.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl CatalogClient for ScriptedClient {
        async fn fetch_page(&self, query: &[(String, String)]) -> Result<PageResponse, FetchError> {
            self.queries.lock().unwrap().push(query.to_vec());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Transport("no scripted response".to_string())))
        }
    }

    fn page(companies: &[&str], nb_hits: u64) -> Result<PageResponse, FetchError> {
        let products: Vec<JsonValue> = companies
            .iter()
            .enumerate()
            .map(|(i, c)| json!({ "name": format!("item {i}"), "company": c, "price": 100 }))
            .collect();
        Ok(PageResponse {
            products,
            nb_hits: Some(nb_hits),
        })
    }

    fn get<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_ready_state_paints_grid_and_pagination() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![page(&["ikea", "liddy"], 10)]));
        let mut session = Session::new();
        let mut view = CatalogView::new();

        let state = pipeline.fetch_products(&mut session, &mut view).await;
        assert_eq!(state, StatusState::Ready);
        assert!(view.grid_visible && !view.status_visible);
        assert_eq!(view.grid.len(), 2);
        // 10 hits at 4 per page
        assert_eq!(view.pagination.len(), 5);

        let query = pipeline.client().last_query();
        assert_eq!(get(&query, "page"), Some("1"));
        assert_eq!(get(&query, "limit"), Some("4"));
    }

    #[tokio::test]
    async fn test_empty_and_error_states_hide_grid() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![
            page(&[], 0),
            Err(FetchError::Status(500)),
        ]));
        let mut session = Session::new();
        let mut view = CatalogView::new();

        assert_eq!(
            pipeline.fetch_products(&mut session, &mut view).await,
            StatusState::Empty
        );
        assert!(!view.grid_visible && view.status_visible);
        assert!(view.pagination.is_empty());

        assert_eq!(
            pipeline.fetch_products(&mut session, &mut view).await,
            StatusState::Error
        );
        assert!(!view.grid_visible && view.status_visible);
    }

    #[tokio::test]
    async fn test_facets_accumulate_across_pages() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![
            page(&["marcos", "ikea"], 8),
            page(&["caressa", "ikea"], 8),
        ]));
        let mut session = Session::new();
        let mut view = CatalogView::new();

        pipeline.fetch_products(&mut session, &mut view).await;
        pipeline.change_page(&mut session, &mut view, 2).await;

        assert_eq!(
            view.company_options,
            vec!["all", "caressa", "ikea", "marcos"]
        );
        assert_eq!(get(&pipeline.client().last_query(), "page"), Some("2"));
    }

    #[tokio::test]
    async fn test_selection_kept_only_while_known() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![
            page(&["liddy"], 1),
            page(&["liddy"], 1),
        ]));
        let mut session = Session::new();
        let mut view = CatalogView::new();

        session.form.company = "liddy".to_string();
        pipeline.apply_filters(&mut session, &mut view).await;
        assert_eq!(view.selected_company, "liddy");
        assert_eq!(get(&pipeline.client().last_query(), "company"), Some("liddy"));

        // a company no page has produced cannot stay selected
        session.form.company = "ikea".to_string();
        pipeline.apply_filters(&mut session, &mut view).await;
        assert_eq!(view.selected_company, "all");
    }

    #[tokio::test]
    async fn test_clicks_on_current_page_are_no_ops() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![page(&["ikea"], 40), page(&["ikea"], 40)]));
        let mut session = Session::new();
        let mut view = CatalogView::new();
        pipeline.fetch_products(&mut session, &mut view).await;

        let current = PageControl::Page {
            number: 1,
            active: true,
        };
        assert_eq!(pipeline.click(&mut session, &mut view, current).await, None);
        let prev = view.pagination[0];
        assert_eq!(pipeline.click(&mut session, &mut view, prev).await, None);

        let next = *view.pagination.last().unwrap();
        assert_eq!(
            pipeline.click(&mut session, &mut view, next).await,
            Some(StatusState::Ready)
        );
        assert_eq!(session.current_page, 2);
    }

    #[tokio::test]
    async fn test_reset_restores_form_and_page() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![page(&["ikea"], 1)]));
        let mut session = Session::new();
        let mut view = CatalogView::new();
        session.form.search = "chair".to_string();
        session.form.featured = true;
        session.current_page = 3;

        pipeline.reset(&mut session, &mut view).await;
        assert_eq!(session.current_page, 1);
        assert_eq!(session.form, FilterForm::default());
        let query = pipeline.client().last_query();
        assert_eq!(get(&query, "name"), None);
        assert_eq!(get(&query, "featured"), None);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let pipeline = RenderPipeline::new(ScriptedClient::with(vec![page(&["ikea"], 1), page(&["marcos"], 1)]));
        let (mut a, mut b) = (Session::new(), Session::new());
        let (mut view_a, mut view_b) = (CatalogView::new(), CatalogView::new());

        pipeline.fetch_products(&mut a, &mut view_a).await;
        pipeline.fetch_products(&mut b, &mut view_b).await;
        assert_eq!(a.facets.values(), vec!["ikea"]);
        assert_eq!(b.facets.values(), vec!["marcos"]);
    }
}
