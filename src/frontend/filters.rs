use super::facets::ALL_OPTION;

/// Sort applied by the form until the user picks another.
pub const DEFAULT_SORT: &str = "-createdAt";

/// The filter controls above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    pub search: String,
    /// Selected dropdown value; `all` means no company filter.
    pub company: String,
    pub sort: String,
    pub featured: bool,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            search: String::new(),
            company: ALL_OPTION.to_string(),
            sort: DEFAULT_SORT.to_string(),
            featured: false,
        }
    }
}

impl FilterForm {
    /// Query-string pairs for the current selections. Blank controls are left out.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("name".to_string(), search.to_string()));
        }
        if !self.company.is_empty() && self.company != ALL_OPTION {
            params.push(("company".to_string(), self.company.clone()));
        }
        if !self.sort.is_empty() {
            params.push(("sort".to_string(), self.sort.clone()));
        }
        if self.featured {
            params.push(("featured".to_string(), "true".to_string()));
        }
        params
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_only_sends_sort() {
        assert_eq!(
            FilterForm::default().to_query(),
            vec![("sort".to_string(), DEFAULT_SORT.to_string())]
        );
    }

    #[test]
    fn test_all_controls() {
        let form = FilterForm {
            search: "  chair ".to_string(),
            company: "liddy".to_string(),
            sort: "price".to_string(),
            featured: true,
        };
        assert_eq!(
            form.to_query(),
            vec![
                ("name".to_string(), "chair".to_string()),
                ("company".to_string(), "liddy".to_string()),
                ("sort".to_string(), "price".to_string()),
                ("featured".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = FilterForm {
            search: "x".to_string(),
            company: "ikea".to_string(),
            sort: "name".to_string(),
            featured: true,
        };
        form.reset();
        assert_eq!(form, FilterForm::default());
    }
}
