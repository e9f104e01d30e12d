// src/bin/browse.rs
//
// Terminal front end for a running catalog server.

use anyhow::Result;
use clap::Parser;
use product_catalog::frontend::{CatalogView, HttpCatalogClient, PageControl, RenderPipeline, Session};
use product_catalog::infra::telemetry::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "browse", about = "Browse the product catalog page by page")]
struct Args {
    /// Server origin
    #[arg(long, env = "CATALOG_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,
    /// Case-insensitive name search
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "all")]
    company: String,
    /// Comma-separated sort keys, `-` for descending
    #[arg(long, default_value = "-createdAt")]
    sort: String,
    /// Only featured products
    #[arg(long)]
    featured: bool,
    #[arg(long, default_value_t = 1)]
    page: u64,
    #[arg(long, default_value_t = 4)]
    page_size: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("browse=info,product_catalog=warn");
    let args = Args::parse();

    let pipeline = RenderPipeline::new(HttpCatalogClient::new(&args.base_url));
    let mut session = Session::new().with_page_size(args.page_size);
    session.form.search = args.name;
    session.form.company = args.company;
    session.form.sort = args.sort;
    session.form.featured = args.featured;
    let mut view = CatalogView::new();

    pipeline.change_page(&mut session, &mut view, args.page).await;
    print!("{}", view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("[n]ext, [p]rev, page number, [r]eset or [q]uit:");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let current = session.current_page;
        match line.trim() {
            "q" | "quit" => break,
            "n" | "next" | "p" | "prev" => {
                let wants_next = line.trim().starts_with('n');
                let control = view.pagination.iter().copied().find(|c| match c {
                    PageControl::Next { .. } => wants_next,
                    PageControl::Prev { .. } => !wants_next,
                    _ => false,
                });
                // disabled or absent controls do nothing
                let Some(control) = control else { continue };
                if pipeline.click(&mut session, &mut view, control).await.is_none() {
                    continue;
                }
            }
            "r" | "reset" => {
                pipeline.reset(&mut session, &mut view).await;
            }
            other => match other.parse::<u64>() {
                Ok(page) if page >= 1 && page != current => {
                    pipeline.change_page(&mut session, &mut view, page).await;
                }
                Ok(_) => continue,
                Err(_) => {
                    println!("Unrecognized command: {}", other);
                    continue;
                }
            },
        }
        print!("{}", view);
    }

    Ok(())
}
