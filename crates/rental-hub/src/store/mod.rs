//! Document store abstraction shared by the listing and booking services.

mod id;
mod memory;
mod repository;
#[cfg(test)]
pub(crate) mod testing;

pub use id::{DocumentId, InvalidDocumentId};
pub use memory::InMemoryStore;
pub use repository::{BookingRepository, ListingRepository, RentalStore, StoreError, UserDirectory};
