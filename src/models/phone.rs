//! Phone catalog record.

use serde::Serialize;

use super::resource::{Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phone {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub color: String,
    pub price: f64,
    pub description: String,
}

impl Resource for Phone {
    const KIND: ResourceKind = ResourceKind::Phone;

    fn id(&self) -> u64 {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }
}
