//! The rendered catalog page: one status region, the product grid, pagination controls and
//! the company dropdown.

use super::cards::ProductCard;
use super::facets::ALL_OPTION;
use super::pagination::PageControl;
use std::fmt;

pub const MSG_LOADING: &str = "Loading products…";
pub const MSG_ERROR: &str =
    "Failed to load products. Ensure the server is running and connected to the DB.";
pub const MSG_EMPTY: &str = "No products found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Loading,
    Error,
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub status: StatusState,
    pub status_message: String,
    pub status_visible: bool,
    pub grid: Vec<ProductCard>,
    pub grid_visible: bool,
    pub pagination: Vec<PageControl>,
    /// `all` first, then known companies ascending.
    pub company_options: Vec<String>,
    pub selected_company: String,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self {
            status: StatusState::Loading,
            status_message: MSG_LOADING.to_string(),
            status_visible: true,
            grid: Vec::new(),
            grid_visible: false,
            pagination: Vec::new(),
            company_options: vec![ALL_OPTION.to_string()],
            selected_company: ALL_OPTION.to_string(),
        }
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `Ready` hides the status region and shows the grid.
    pub fn show_status(&mut self, state: StatusState) {
        self.status = state;
        self.status_message = match state {
            StatusState::Loading => MSG_LOADING,
            StatusState::Error => MSG_ERROR,
            StatusState::Empty => MSG_EMPTY,
            StatusState::Ready => "",
        }
        .to_string();
        self.status_visible = state != StatusState::Ready;
        self.grid_visible = state == StatusState::Ready;
    }

    /// Repaints the grid from scratch.
    pub fn render_products(&mut self, cards: Vec<ProductCard>) {
        self.grid = cards;
        if self.grid.is_empty() {
            self.show_status(StatusState::Empty);
        } else {
            self.show_status(StatusState::Ready);
        }
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let companies: Vec<String> = self
            .company_options
            .iter()
            .map(|c| {
                if *c == self.selected_company {
                    format!("[{}]", c)
                } else {
                    c.clone()
                }
            })
            .collect();
        writeln!(f, "Company: {}", companies.join(" "))?;

        if self.status_visible {
            writeln!(f, "{}", self.status_message)?;
        }
        if self.grid_visible {
            for card in &self.grid {
                write!(f, "- {} | {} | {}", card.name, card.company, card.price)?;
                if !card.featured.is_empty() {
                    write!(f, " | {}", card.featured)?;
                }
                writeln!(f)?;
            }
        }

        if !self.pagination.is_empty() {
            let controls: Vec<String> = self
                .pagination
                .iter()
                .map(|c| match c {
                    PageControl::Page { active: true, .. } => format!("[{}]", c.label()),
                    c if c.is_disabled() && !matches!(c, PageControl::Ellipsis) => {
                        format!("({})", c.label())
                    }
                    c => c.label(),
                })
                .collect();
            writeln!(f, "{}", controls.join(" "))?;
        }
        Ok(())
    }
}
