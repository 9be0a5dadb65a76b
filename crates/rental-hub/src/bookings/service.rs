use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{
    Booking, BookingDetails, BookingPage, BookingQuery, BookingStatusUpdate, NewBooking,
};
use super::filter::{BookingClause, BookingFilter};
use super::lifecycle::{InvalidTransition, TransitionPolicy};
use crate::caller::Caller;
use crate::ownership::{OwnershipPolicy, OwnershipViolation};
use crate::pagination::PageRequest;
use crate::store::{DocumentId, InvalidDocumentId, RentalStore, StoreError};

/// Booking creation, status changes, and scoped retrieval.
pub struct BookingService<S> {
    store: Arc<S>,
    ownership: OwnershipPolicy,
    transitions: TransitionPolicy,
}

impl<S> BookingService<S>
where
    S: RentalStore + 'static,
{
    pub fn new(store: Arc<S>, ownership: OwnershipPolicy, transitions: TransitionPolicy) -> Self {
        Self {
            store,
            ownership,
            transitions,
        }
    }

    /// Book a listing on behalf of the calling tenant. No availability check is made.
    pub async fn create(
        &self,
        caller: &Caller,
        payload: NewBooking,
    ) -> Result<BookingDetails, BookingServiceError> {
        let tenant = parse_id("tenant", &caller.user_id)?;
        let booking = self
            .store
            .insert_booking(Booking::from_payload(payload, tenant))
            .await?;
        info!(
            booking = %booking.id,
            listing = %booking.listing,
            %tenant,
            "booking requested"
        );

        self.resolve(booking).await
    }

    /// Admin view: every booking, optionally narrowed to one status.
    pub async fn list(&self, query: BookingQuery) -> Result<BookingPage, BookingServiceError> {
        let page = PageRequest::new(query.page, query.limit);
        let filter = BookingFilter::all().with_status(query.status);
        debug!(
            status = query.status.map(|status| status.label()),
            skip = page.skip(),
            limit = page.limit(),
            "booking search"
        );

        let bookings = self.store.find_bookings(&filter, Some(page)).await?;
        let total = self.store.count_bookings(&filter).await?;

        Ok(BookingPage {
            bookings: self.resolve_all(bookings).await?,
            metadata: page.metadata(total),
        })
    }

    pub async fn list_for_tenant(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<BookingDetails>, BookingServiceError> {
        let tenant = parse_id("tenantId", tenant_id)?;
        let filter = BookingFilter::all().with(BookingClause::Tenant(tenant));
        let bookings = self.store.find_bookings(&filter, None).await?;
        self.resolve_all(bookings).await
    }

    pub async fn list_for_landlord(
        &self,
        landlord_id: &str,
    ) -> Result<Vec<BookingDetails>, BookingServiceError> {
        let landlord = parse_id("landlordId", landlord_id)?;
        let filter = BookingFilter::all().with(BookingClause::Landlord(landlord));
        let bookings = self.store.find_bookings(&filter, None).await?;
        self.resolve_all(bookings).await
    }

    pub async fn get(&self, id: &str) -> Result<BookingDetails, BookingServiceError> {
        let booking = self.fetch(id).await?;
        self.resolve(booking).await
    }

    /// Overwrite the status, subject to the configured ownership and transition policies.
    pub async fn update_status(
        &self,
        id: &str,
        update: BookingStatusUpdate,
        caller: &Caller,
    ) -> Result<BookingDetails, BookingServiceError> {
        let existing = self.fetch(id).await?;
        self.ownership.check(
            caller,
            &[existing.landlord, existing.tenant],
            "booking",
            existing.id,
        )?;
        self.transitions.check(existing.status, update.status)?;

        let updated = self
            .store
            .update_booking_status(&existing.id, update.status)
            .await?
            .ok_or(BookingServiceError::NotFound(existing.id))?;
        info!(
            booking = %updated.id,
            from = %existing.status,
            to = %updated.status,
            caller = %caller.user_id,
            "booking status updated"
        );

        self.resolve(updated).await
    }

    pub async fn delete(&self, id: &str) -> Result<Booking, BookingServiceError> {
        let id = parse_id("id", id)?;
        let deleted = self
            .store
            .delete_booking(&id)
            .await?
            .ok_or(BookingServiceError::NotFound(id))?;
        info!(booking = %deleted.id, "booking deleted");
        Ok(deleted)
    }

    async fn fetch(&self, id: &str) -> Result<Booking, BookingServiceError> {
        let id = parse_id("id", id)?;
        self.store
            .find_booking(&id)
            .await?
            .ok_or(BookingServiceError::NotFound(id))
    }

    async fn resolve(&self, booking: Booking) -> Result<BookingDetails, BookingServiceError> {
        let listing = self.store.find_listing(&booking.listing).await?;
        let tenant = self
            .store
            .find_user(&booking.tenant)
            .await?
            .map(|user| user.profile());
        let landlord = self
            .store
            .find_user(&booking.landlord)
            .await?
            .map(|user| user.profile());
        Ok(BookingDetails::resolve(booking, listing, tenant, landlord))
    }

    async fn resolve_all(
        &self,
        bookings: Vec<Booking>,
    ) -> Result<Vec<BookingDetails>, BookingServiceError> {
        let mut resolved = Vec::with_capacity(bookings.len());
        for booking in bookings {
            resolved.push(self.resolve(booking).await?);
        }
        Ok(resolved)
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<DocumentId, BookingServiceError> {
    raw.parse()
        .map_err(|source| BookingServiceError::InvalidId { field, source })
}

/// Error raised by the booking service.
#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error("invalid {field}: {source}")]
    InvalidId {
        field: &'static str,
        #[source]
        source: InvalidDocumentId,
    },
    #[error("booking {0} not found")]
    NotFound(DocumentId),
    #[error(transparent)]
    Unauthorized(#[from] OwnershipViolation),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    Store(#[from] StoreError),
}
