//! Drives the headless browser against a live in-process API.

use product_catalog::frontend::{
    CatalogView, HttpCatalogClient, PageControl, RenderPipeline, Session, StatusState,
};
use product_catalog::{transport, CatalogStore, Company, MemoryCatalogStore, NewProduct};
use std::sync::Arc;

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn spawn_seeded(n: usize) -> Result<String, Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryCatalogStore::new());
    for i in 0..n {
        store
            .insert(NewProduct {
                name: format!("product {:02}", i),
                price: 1000 + i as i64,
                featured: i % 2 == 0,
                rating: 4.5,
                company: Some(Company::ALL[i % 2]),
                images: vec![],
            })
            .await?;
    }
    let router = transport::http::create_router(transport::http::AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

#[tokio::test]
async fn test_browse_pages_and_filters() -> TestResult {
    let base_url = spawn_seeded(10).await?;
    let pipeline = RenderPipeline::new(HttpCatalogClient::new(base_url));
    let mut session = Session::new();
    session.form.sort = "-name".to_string();
    let mut view = CatalogView::new();

    assert_eq!(
        pipeline.fetch_products(&mut session, &mut view).await,
        StatusState::Ready
    );
    assert_eq!(view.grid.len(), 4);
    assert_eq!(view.grid[0].name, "product 09");
    // Prev, 1, 2, 3, Next
    assert_eq!(view.pagination.len(), 5);
    assert_eq!(view.company_options, vec!["all", "ikea", "liddy"]);

    let next = view
        .pagination
        .last()
        .copied()
        .ok_or("missing pagination")?;
    pipeline.click(&mut session, &mut view, next).await;
    assert_eq!(session.current_page, 2);
    assert_eq!(view.grid[0].name, "product 05");
    assert!(view
        .pagination
        .contains(&PageControl::Page { number: 2, active: true }));

    session.form.company = "liddy".to_string();
    session.form.search = "product 0".to_string();
    pipeline.apply_filters(&mut session, &mut view).await;
    assert_eq!(session.current_page, 1);
    // five liddy products, four per page
    assert_eq!(view.grid.len(), 4);
    assert!(view.grid.iter().all(|c| c.company == "liddy"));
    assert_eq!(view.selected_company, "liddy");

    session.form.search = "zzz".to_string();
    assert_eq!(
        pipeline.apply_filters(&mut session, &mut view).await,
        StatusState::Empty
    );
    assert!(view.pagination.is_empty());

    pipeline.reset(&mut session, &mut view).await;
    assert_eq!(view.grid.len(), 4);
    assert_eq!(view.selected_company, "all");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_shows_error() -> TestResult {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let pipeline = RenderPipeline::new(HttpCatalogClient::new(format!("http://127.0.0.1:{}", port)));
    let mut session = Session::new();
    let mut view = CatalogView::new();
    assert_eq!(
        pipeline.fetch_products(&mut session, &mut view).await,
        StatusState::Error
    );
    assert!(view.status_visible);
    assert!(!view.grid_visible);
    Ok(())
}
