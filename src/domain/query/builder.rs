use super::{
    ProductField, ProductFilter, ProductQuery, Projection, QueryParams, SortDirection, SortKey,
    SortSpec, Window,
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Company value that means "no company filter".
pub const ALL_COMPANIES: &str = "all";

/// Translates listing parameters into a store query. Never fails.
pub fn build_query(params: &QueryParams) -> ProductQuery {
    ProductQuery {
        filter: build_filter(params),
        sort: build_sort(params.sort.as_deref()),
        projection: build_projection(params.fields.as_deref()),
        window: build_window(params.page.as_deref(), params.limit.as_deref()),
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}

fn build_filter(params: &QueryParams) -> ProductFilter {
    let name = params
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let company = non_empty(params.company.as_deref())
        .filter(|c| *c != ALL_COMPANIES)
        .map(str::to_string);

    let featured = non_empty(params.featured.as_deref()).map(|f| f == "true");

    ProductFilter {
        name,
        company,
        featured,
    }
}

fn default_sort() -> SortSpec {
    SortSpec(vec![SortKey {
        field: ProductField::CreatedAt,
        direction: SortDirection::Asc,
    }])
}

fn build_sort(sort: Option<&str>) -> SortSpec {
    let Some(sort) = non_empty(sort) else {
        return default_sort();
    };

    let mut keys: Vec<SortKey> = Vec::new();
    for raw in sort.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (direction, name) = match raw.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let Some(field) = ProductField::parse(name).filter(ProductField::is_sortable) else {
            tracing::debug!(key = %raw, "ignoring unknown sort key");
            continue;
        };
        // first occurrence wins
        if keys.iter().any(|k| k.field == field) {
            continue;
        }
        keys.push(SortKey { field, direction });
    }

    if keys.is_empty() {
        default_sort()
    } else {
        SortSpec(keys)
    }
}

fn build_projection(fields: Option<&str>) -> Projection {
    let Some(fields) = non_empty(fields) else {
        return Projection::All;
    };

    let names: Vec<&str> = fields
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if names.is_empty() {
        return Projection::All;
    }

    let exclude = names.iter().all(|n| n.starts_with('-'));
    let mut parsed: Vec<ProductField> = Vec::new();
    for name in names {
        let field = if exclude {
            ProductField::parse(&name[1..])
        } else {
            ProductField::parse(name)
        };
        match field {
            Some(f) if !parsed.contains(&f) => parsed.push(f),
            Some(_) => {}
            None => tracing::debug!(field = %name, "ignoring unknown projection field"),
        }
    }

    if exclude {
        Projection::Exclude(parsed)
    } else {
        Projection::Include(parsed)
    }
}

/// Positive integers only; anything else falls back to the default.
fn parse_positive(v: Option<&str>, default: u64) -> u64 {
    v.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn build_window(page: Option<&str>, limit: Option<&str>) -> Window {
    let page = parse_positive(page, DEFAULT_PAGE);
    let limit = parse_positive(limit, DEFAULT_LIMIT);
    Window {
        page,
        skip: (page - 1).saturating_mul(limit),
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        let mut p = QueryParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "name" => p.name = v,
                "company" => p.company = v,
                "featured" => p.featured = v,
                "sort" => p.sort = v,
                "fields" => p.fields = v,
                "page" => p.page = v,
                "limit" => p.limit = v,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let q = build_query(&QueryParams::default());
        assert!(q.filter.is_empty());
        assert_eq!(q.sort, default_sort());
        assert_eq!(q.projection, Projection::All);
        assert_eq!(
            q.window,
            Window {
                page: 1,
                skip: 0,
                limit: 10
            }
        );
    }

    #[test]
    fn test_company_all_is_no_constraint() {
        let q = build_query(&params(&[("company", "all")]));
        assert_eq!(q.filter.company, None);
        let q = build_query(&params(&[("company", "liddy")]));
        assert_eq!(q.filter.company.as_deref(), Some("liddy"));
    }

    #[test]
    fn test_featured_literal_true_only() {
        assert_eq!(build_query(&params(&[("featured", "true")])).filter.featured, Some(true));
        assert_eq!(build_query(&params(&[("featured", "yes")])).filter.featured, Some(false));
        assert_eq!(build_query(&params(&[("featured", "TRUE")])).filter.featured, Some(false));
        assert_eq!(build_query(&params(&[("featured", "")])).filter.featured, None);
    }

    #[test]
    fn test_sort_keys_and_directions() {
        let q = build_query(&params(&[("sort", "-price, name,bogus")]));
        assert_eq!(
            q.sort.keys(),
            &[
                SortKey {
                    field: ProductField::Price,
                    direction: SortDirection::Desc
                },
                SortKey {
                    field: ProductField::Name,
                    direction: SortDirection::Asc
                },
            ]
        );

        let q = build_query(&params(&[("sort", "bogus")]));
        assert_eq!(q.sort, default_sort());
    }

    #[test]
    fn test_fields_projection() {
        let q = build_query(&params(&[("fields", "name,price")]));
        assert_eq!(
            q.projection,
            Projection::Include(vec![ProductField::Name, ProductField::Price])
        );

        let q = build_query(&params(&[("fields", "-images")]));
        assert_eq!(q.projection, Projection::Exclude(vec![ProductField::Images]));

        let q = build_query(&params(&[("fields", "nope")]));
        assert_eq!(q.projection, Projection::Include(vec![]));
    }

    #[test]
    fn test_window_math_and_degradation() {
        let q = build_query(&params(&[("page", "3"), ("limit", "4")]));
        assert_eq!(q.window.skip, 8);
        assert_eq!(q.window.limit, 4);

        for bad in ["0", "-2", "abc", "2.5", ""] {
            let q = build_query(&params(&[("page", bad), ("limit", bad)]));
            assert_eq!(q.window.page, DEFAULT_PAGE, "page {bad:?}");
            assert_eq!(q.window.limit, DEFAULT_LIMIT, "limit {bad:?}");
            assert_eq!(q.window.skip, 0);
        }
    }

    #[test]
    fn test_limit_is_not_capped() {
        let q = build_query(&params(&[("limit", "100000")]));
        assert_eq!(q.window.limit, 100_000);
    }

    #[test]
    fn test_blank_name_is_no_constraint() {
        assert_eq!(build_query(&params(&[("name", "   ")])).filter.name, None);
        assert_eq!(
            build_query(&params(&[("name", "abc")])).filter.name.as_deref(),
            Some("abc")
        );
    }
}
