//! Multi-tenant property rental backend: listing search and the booking lifecycle.

pub mod bookings;
pub mod caller;
pub mod config;
pub mod dates;
pub mod error;
pub mod listings;
pub mod ownership;
pub mod pagination;
pub mod response;
pub mod store;
pub mod telemetry;
pub mod users;

pub use caller::Caller;
pub use error::AppError;
pub use response::ApiResponse;
