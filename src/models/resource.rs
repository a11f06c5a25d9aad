//! Resource kinds served by the API and the trait every stored record implements.

use std::fmt;

use serde::Serialize;

/// The collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Phone,
    User,
}

impl ResourceKind {
    /// Tag shared by every cached list page of this collection.
    pub fn list_tag(self) -> &'static str {
        match self {
            ResourceKind::Phone => "phoneListCache",
            ResourceKind::User => "userListCache",
        }
    }

    /// Route name of the collection endpoint.
    pub fn list_route(self) -> &'static str {
        match self {
            ResourceKind::Phone => "phones",
            ResourceKind::User => "users",
        }
    }

    /// Route name of the single-record endpoint.
    pub fn detail_route(self) -> &'static str {
        match self {
            ResourceKind::Phone => "detailPhone",
            ResourceKind::User => "detailUser",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Phone => f.write_str("phone"),
            ResourceKind::User => f.write_str("user"),
        }
    }
}

/// A record that lives in a [`Repository`](crate::repository::Repository).
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> u64;

    /// Returns the record with its identifier replaced (used on insert).
    fn with_id(self, id: u64) -> Self;
}
