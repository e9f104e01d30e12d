use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

/// Dropdown value meaning "no company filter".
pub const ALL_OPTION: &str = "all";

/// Companies seen across every page fetched in a session.
///
/// Only ever grows; a fresh session starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSet {
    companies: BTreeSet<String>,
}

impl FacetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the company of every document that carries a non-empty one.
    pub fn fold<'a, I>(&mut self, documents: I)
    where
        I: IntoIterator<Item = &'a JsonValue>,
    {
        for company in documents
            .into_iter()
            .filter_map(|doc| doc.get("company").and_then(JsonValue::as_str))
            .filter(|c| !c.is_empty())
        {
            if !self.companies.contains(company) {
                self.companies.insert(company.to_string());
            }
        }
    }

    /// Known companies, ascending.
    pub fn values(&self) -> Vec<String> {
        self.companies.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// `all` followed by the known companies.
    pub fn dropdown_options(&self) -> Vec<String> {
        std::iter::once(ALL_OPTION.to_string())
            .chain(self.companies.iter().cloned())
            .collect()
    }

    /// Keeps `selected` if it is still an option, otherwise falls back to `all`.
    pub fn reconcile(&self, selected: &str) -> String {
        if self.companies.contains(selected) {
            selected.to_string()
        } else {
            ALL_OPTION.to_string()
        }
    }
}
