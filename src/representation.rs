//! Representation Builder
//!
//! Serializes list pages and single records into the JSON bodies the API
//! returns. Output depends only on the inputs; field order is fixed by the
//! struct layout so identical inputs give byte-identical bodies.

use serde::Serialize;

use crate::error::Result;
use crate::pagination::{LinkSet, PageResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListBody<'a, T> {
    items: &'a [T],
    page: u32,
    limit: u32,
    total_items: u64,
    total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<&'a LinkSet>,
}

/// Body of a list endpoint: items plus pagination metadata and, when given,
/// navigation links.
pub fn list<T: Serialize>(result: &PageResult<T>, links: Option<&LinkSet>) -> Result<String> {
    let body = ListBody {
        items: &result.items,
        page: result.window.page,
        limit: result.window.limit,
        total_items: result.window.total_items,
        total_pages: result.window.total_pages,
        links,
    };
    Ok(serde_json::to_string(&body)?)
}

/// Body of a detail endpoint.
pub fn detail<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PageRequest, PageWindow};
    use serde_json::Value;

    #[derive(Serialize)]
    struct Item {
        id: u64,
    }

    fn result(total: u64, page: u32, ids: &[u64]) -> PageResult<Item> {
        PageResult {
            items: ids.iter().map(|&id| Item { id }).collect(),
            window: PageWindow::compute(total, PageRequest::new(page, 5).unwrap()),
        }
    }

    fn links() -> LinkSet {
        LinkSet {
            self_: "/api/users?page=2&limit=5".into(),
            first: "/api/users?page=1&limit=5".into(),
            last: "/api/users?page=4&limit=5".into(),
            prev: Some("/api/users?page=1&limit=5".into()),
            next: None,
        }
    }

    #[test]
    fn test_list_shape() {
        let body = list(&result(20, 2, &[6, 7, 8, 9, 10]), Some(&links())).unwrap();
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["items"].as_array().unwrap().len(), 5);
        assert_eq!(json["page"], 2);
        assert_eq!(json["limit"], 5);
        assert_eq!(json["totalItems"], 20);
        assert_eq!(json["totalPages"], 4);
        assert_eq!(json["links"]["self"], "/api/users?page=2&limit=5");
        assert!(json["links"].get("next").is_none());
    }

    #[test]
    fn test_list_without_links() {
        let body = list(&result(0, 1, &[]), None).unwrap();
        assert_eq!(
            body,
            r#"{"items":[],"page":1,"limit":5,"totalItems":0,"totalPages":0}"#
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let a = list(&result(20, 2, &[6, 7]), Some(&links())).unwrap();
        let b = list(&result(20, 2, &[6, 7]), Some(&links())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_detail() {
        assert_eq!(detail(&Item { id: 7 }).unwrap(), r#"{"id":7}"#);
    }
}
