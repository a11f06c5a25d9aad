//! Domain records and the DTOs used for request/response bodies.

pub mod phone;
pub mod requests;
pub mod resource;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use phone::Phone;
pub use requests::{CreatePhoneRequest, CreateUserRequest, ListQuery};
pub use resource::{Resource, ResourceKind};
pub use responses::{HealthResponse, StatsResponse};
pub use user::{Client, User};
