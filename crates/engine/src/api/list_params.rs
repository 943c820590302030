//! Query-string parsing for list endpoints.
//!
//! `?search=..&sort=name&order=desc&page=1&page_size=50&flt_name_contains=ab`
//! Filters are spelled `flt_<column>_<op>`; column names never contain `_`,
//! so everything after the first `_` is the operation.

use modmaker_domain::{ListColumn, ListQuery, Page};
use modmaker_shared::PageData;

use crate::admin::{FilterRequest, ListRequest};
use crate::app::App;

use super::http::ApiError;

const FILTER_PREFIX: &str = "flt_";

pub fn parse_list_request(pairs: &[(String, String)]) -> Result<ListRequest, ApiError> {
    let mut request = ListRequest::default();

    for (key, value) in pairs {
        match key.as_str() {
            "search" => request.search = Some(value.clone()),
            "sort" => request.sort = Some(value.clone()),
            "order" => request.order = Some(value.clone()),
            "page" => request.page = Some(parse_number(key, value)?),
            "page_size" => request.page_size = Some(parse_number(key, value)?),
            _ => {
                let Some(filter) = key.strip_prefix(FILTER_PREFIX) else {
                    continue;
                };
                let Some((column, op)) = filter.split_once('_') else {
                    return Err(ApiError::BadRequest(format!(
                        "Filter '{}' must be flt_<column>_<operation>",
                        key
                    )));
                };
                request.filters.push(FilterRequest {
                    column: column.to_string(),
                    op: op.to_string(),
                    value: value.clone(),
                });
            }
        }
    }

    Ok(request)
}

fn parse_number(key: &str, value: &str) -> Result<u32, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{} must be a non-negative integer", key)))
}

/// Parse the query string and validate it against the model view registered
/// under `endpoint`.
pub fn list_query<C: ListColumn>(
    app: &App,
    endpoint: &str,
    pairs: &[(String, String)],
) -> Result<ListQuery<C>, ApiError> {
    let request = parse_list_request(pairs)?;
    let view = app
        .admin
        .model(endpoint)
        .ok_or_else(|| ApiError::Internal(format!("No model view registered for '{}'", endpoint)))?;
    Ok(view.query(&request)?)
}

pub fn page_data<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageData<U> {
    let page_count = page.page_count();
    let page = page.map(f);
    PageData {
        items: page.items,
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        page_count,
    }
}
