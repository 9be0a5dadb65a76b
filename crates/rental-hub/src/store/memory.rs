use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::id::DocumentId;
use super::repository::{BookingRepository, ListingRepository, StoreError, UserDirectory};
use crate::bookings::{Booking, BookingFilter, BookingStatus};
use crate::listings::{Listing, ListingFilter, ListingUpdate};
use crate::pagination::PageRequest;
use crate::users::User;

/// Process-local document store. Collections keep insertion order, which is the order
/// unsorted finds return.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    listings: Arc<Mutex<Vec<Listing>>>,
    bookings: Arc<Mutex<Vec<Booking>>>,
    users: Arc<Mutex<HashMap<DocumentId, User>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<'a, T>(
    collection: &'a Mutex<T>,
    name: &'static str,
) -> Result<MutexGuard<'a, T>, StoreError> {
    collection
        .lock()
        .map_err(|_| StoreError::Unavailable(format!("{name} collection lock poisoned")))
}

fn window<'a, T: 'a>(
    matches: impl Iterator<Item = &'a T>,
    page: Option<PageRequest>,
) -> Vec<T>
where
    T: Clone,
{
    match page {
        Some(page) => {
            let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
            matches.skip(skip).take(limit).cloned().collect()
        }
        None => matches.cloned().collect(),
    }
}

#[async_trait]
impl ListingRepository for InMemoryStore {
    async fn insert_listing(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut listings = lock(&self.listings, "listings")?;
        if listings.iter().any(|stored| stored.id == listing.id) {
            return Err(StoreError::Conflict(listing.id));
        }
        listings.push(listing.clone());
        Ok(listing)
    }

    async fn find_listings(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Vec<Listing>, StoreError> {
        let listings = lock(&self.listings, "listings")?;
        Ok(window(
            listings.iter().filter(|listing| filter.matches(listing)),
            Some(page),
        ))
    }

    async fn count_listings(&self, filter: &ListingFilter) -> Result<u64, StoreError> {
        let listings = lock(&self.listings, "listings")?;
        Ok(listings.iter().filter(|listing| filter.matches(listing)).count() as u64)
    }

    async fn find_listing(&self, id: &DocumentId) -> Result<Option<Listing>, StoreError> {
        let listings = lock(&self.listings, "listings")?;
        Ok(listings.iter().find(|listing| listing.id == *id).cloned())
    }

    async fn update_listing(
        &self,
        id: &DocumentId,
        update: ListingUpdate,
    ) -> Result<Option<Listing>, StoreError> {
        let mut listings = lock(&self.listings, "listings")?;
        Ok(listings
            .iter_mut()
            .find(|listing| listing.id == *id)
            .map(|listing| {
                update.apply_to(listing);
                listing.clone()
            }))
    }

    async fn delete_listing(&self, id: &DocumentId) -> Result<Option<Listing>, StoreError> {
        let mut listings = lock(&self.listings, "listings")?;
        Ok(listings
            .iter()
            .position(|listing| listing.id == *id)
            .map(|index| listings.remove(index)))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError> {
        let mut bookings = lock(&self.bookings, "bookings")?;
        if bookings.iter().any(|stored| stored.id == booking.id) {
            return Err(StoreError::Conflict(booking.id));
        }
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn find_bookings(
        &self,
        filter: &BookingFilter,
        page: Option<PageRequest>,
    ) -> Result<Vec<Booking>, StoreError> {
        let bookings = lock(&self.bookings, "bookings")?;
        Ok(window(
            bookings.iter().filter(|booking| filter.matches(booking)),
            page,
        ))
    }

    async fn count_bookings(&self, filter: &BookingFilter) -> Result<u64, StoreError> {
        let bookings = lock(&self.bookings, "bookings")?;
        Ok(bookings.iter().filter(|booking| filter.matches(booking)).count() as u64)
    }

    async fn find_booking(&self, id: &DocumentId) -> Result<Option<Booking>, StoreError> {
        let bookings = lock(&self.bookings, "bookings")?;
        Ok(bookings.iter().find(|booking| booking.id == *id).cloned())
    }

    async fn update_booking_status(
        &self,
        id: &DocumentId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let mut bookings = lock(&self.bookings, "bookings")?;
        Ok(bookings
            .iter_mut()
            .find(|booking| booking.id == *id)
            .map(|booking| {
                booking.status = status;
                booking.updated_at = Utc::now();
                booking.clone()
            }))
    }

    async fn delete_booking(&self, id: &DocumentId) -> Result<Option<Booking>, StoreError> {
        let mut bookings = lock(&self.bookings, "bookings")?;
        Ok(bookings
            .iter()
            .position(|booking| booking.id == *id)
            .map(|index| bookings.remove(index)))
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = lock(&self.users, "users")?;
        if users.contains_key(&user.id) {
            return Err(StoreError::Conflict(user.id));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: &DocumentId) -> Result<Option<User>, StoreError> {
        let users = lock(&self.users, "users")?;
        Ok(users.get(id).cloned())
    }
}
