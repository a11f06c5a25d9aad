//! Customer accounts and the users they own.

use serde::Serialize;

use super::resource::{Resource, ResourceKind};

/// Customer account a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: u64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub client: Option<Client>,
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> u64 {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }
}
