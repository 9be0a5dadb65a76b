use async_trait::async_trait;

use super::id::DocumentId;
use crate::bookings::{Booking, BookingFilter, BookingStatus};
use crate::listings::{Listing, ListingFilter, ListingUpdate};
use crate::pagination::PageRequest;
use crate::users::User;

/// Listing collection operations.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn insert_listing(&self, listing: Listing) -> Result<Listing, StoreError>;
    /// Matches in insertion order, windowed by `page`.
    async fn find_listings(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Vec<Listing>, StoreError>;
    async fn count_listings(&self, filter: &ListingFilter) -> Result<u64, StoreError>;
    async fn find_listing(&self, id: &DocumentId) -> Result<Option<Listing>, StoreError>;
    /// Returns the document after the update, or `None` when it no longer exists.
    async fn update_listing(
        &self,
        id: &DocumentId,
        update: ListingUpdate,
    ) -> Result<Option<Listing>, StoreError>;
    async fn delete_listing(&self, id: &DocumentId) -> Result<Option<Listing>, StoreError>;
}

/// Booking collection operations.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError>;
    /// `None` returns every match.
    async fn find_bookings(
        &self,
        filter: &BookingFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Booking>, StoreError>;
    async fn count_bookings(&self, filter: &BookingFilter) -> Result<u64, StoreError>;
    async fn find_booking(&self, id: &DocumentId) -> Result<Option<Booking>, StoreError>;
    async fn update_booking_status(
        &self,
        id: &DocumentId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError>;
    async fn delete_booking(&self, id: &DocumentId) -> Result<Option<Booking>, StoreError>;
}

/// Read access to accounts for reference resolution, plus seeding.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;
    async fn find_user(&self, id: &DocumentId) -> Result<Option<User>, StoreError>;
}

/// Everything the rental services need from a document store.
pub trait RentalStore: ListingRepository + BookingRepository + UserDirectory {}

impl<T> RentalStore for T where T: ListingRepository + BookingRepository + UserDirectory {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document {0} already exists")]
    Conflict(DocumentId),
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}
