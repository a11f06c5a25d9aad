//! Named route URL generation.

use url::Url;

use crate::error::{ApiError, Result};

/// Turns a route name plus parameters into an absolute URI.
///
/// Parameters matching a `{placeholder}` in the route path are substituted;
/// the rest are appended as query pairs in the order given.
pub trait UrlGenerator: Send + Sync {
    fn url_for(&self, route: &str, params: &[(&str, String)]) -> Result<String>;
}

/// Route table of the catalog API resolved against a public base URL.
#[derive(Debug, Clone)]
pub struct RouteUrls {
    base: Url,
}

const ROUTES: &[(&str, &str)] = &[
    ("phones", "api/phones"),
    ("detailPhone", "api/phones/{id}"),
    ("users", "api/users"),
    ("detailUser", "api/users/{id}"),
];

impl RouteUrls {
    pub fn new(base: &str) -> std::result::Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        // Routes are joined relative to the base, so keep any path prefix.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }
}

impl UrlGenerator for RouteUrls {
    fn url_for(&self, route: &str, params: &[(&str, String)]) -> Result<String> {
        let template = ROUTES
            .iter()
            .find(|(name, _)| *name == route)
            .map(|(_, path)| *path)
            .ok_or_else(|| ApiError::Internal(format!("unknown route `{route}`")))?;

        let mut path = template.to_string();
        let mut query = Vec::new();
        for (name, value) in params {
            let placeholder = format!("{{{name}}}");
            if path.contains(&placeholder) {
                path = path.replace(&placeholder, value);
            } else {
                query.push((*name, value.as_str()));
            }
        }
        if path.contains('{') {
            return Err(ApiError::Internal(format!(
                "missing path parameter for route `{route}`"
            )));
        }

        let mut url = self
            .base
            .join(&path)
            .map_err(|err| ApiError::Internal(format!("bad url for `{route}`: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }
}
