use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Listing, ListingDetails, ListingPage, ListingUpdate, NewListing};
use super::filter::{ListingFilter, ListingQuery};
use crate::caller::Caller;
use crate::ownership::{OwnershipPolicy, OwnershipViolation};
use crate::store::{DocumentId, InvalidDocumentId, RentalStore, StoreError};

/// Listing CRUD plus filtered, paginated search.
pub struct ListingService<S> {
    store: Arc<S>,
    ownership: OwnershipPolicy,
}

impl<S> ListingService<S>
where
    S: RentalStore + 'static,
{
    pub fn new(store: Arc<S>, ownership: OwnershipPolicy) -> Self {
        Self { store, ownership }
    }

    /// Create a listing owned by the caller and return it with the landlord resolved.
    pub async fn create(
        &self,
        caller: &Caller,
        payload: NewListing,
    ) -> Result<ListingDetails, ListingServiceError> {
        let landlord = parse_id("landlord", &caller.user_id)?;
        validate_rent(payload.rent_amount)?;

        let listing = self
            .store
            .insert_listing(Listing::from_payload(payload, landlord))
            .await?;
        info!(listing = %listing.id, %landlord, "listing created");

        self.resolve(listing).await
    }

    /// Public search; landlords are resolved on every result.
    pub async fn list(
        &self,
        query: ListingQuery,
    ) -> Result<ListingPage<ListingDetails>, ListingServiceError> {
        let filter = ListingFilter::from_query(&query);
        let page = query.page_request();
        debug!(
            clauses = filter.clauses().len(),
            skip = page.skip(),
            limit = page.limit(),
            "listing search"
        );

        let listings = self.store.find_listings(&filter, page).await?;
        let total = self.store.count_listings(&filter).await?;

        let mut resolved = Vec::with_capacity(listings.len());
        for listing in listings {
            resolved.push(self.resolve(listing).await?);
        }

        Ok(ListingPage {
            listings: resolved,
            metadata: page.metadata(total),
        })
    }

    /// Search restricted to one landlord. The landlord reference is left unresolved.
    pub async fn list_for_landlord(
        &self,
        landlord_id: &str,
        query: ListingQuery,
    ) -> Result<ListingPage<Listing>, ListingServiceError> {
        let landlord = parse_id("landlordId", landlord_id)?;
        let filter = ListingFilter::from_query(&query).with_landlord(landlord);
        let page = query.page_request();
        debug!(
            %landlord,
            clauses = filter.clauses().len(),
            skip = page.skip(),
            "landlord listing search"
        );

        let listings = self.store.find_listings(&filter, page).await?;
        let total = self.store.count_listings(&filter).await?;

        Ok(ListingPage {
            listings,
            metadata: page.metadata(total),
        })
    }

    pub async fn get(&self, id: &str) -> Result<Listing, ListingServiceError> {
        let id = parse_id("id", id)?;
        self.store
            .find_listing(&id)
            .await?
            .ok_or(ListingServiceError::NotFound(id))
    }

    pub async fn update(
        &self,
        id: &str,
        update: ListingUpdate,
        caller: &Caller,
    ) -> Result<Listing, ListingServiceError> {
        let existing = self.get(id).await?;
        self.ownership
            .check(caller, &[existing.landlord], "listing", existing.id)?;
        if let Some(rent_amount) = update.rent_amount {
            validate_rent(rent_amount)?;
        }

        let updated = self
            .store
            .update_listing(&existing.id, update)
            .await?
            .ok_or(ListingServiceError::NotFound(existing.id))?;
        info!(listing = %updated.id, caller = %caller.user_id, "listing updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, caller: &Caller) -> Result<Listing, ListingServiceError> {
        let existing = self.get(id).await?;
        self.ownership
            .check(caller, &[existing.landlord], "listing", existing.id)?;

        let deleted = self
            .store
            .delete_listing(&existing.id)
            .await?
            .ok_or(ListingServiceError::NotFound(existing.id))?;
        info!(listing = %deleted.id, caller = %caller.user_id, "listing deleted");
        Ok(deleted)
    }

    async fn resolve(&self, listing: Listing) -> Result<ListingDetails, ListingServiceError> {
        let landlord = self
            .store
            .find_user(&listing.landlord)
            .await?
            .map(|user| user.profile());
        Ok(ListingDetails::resolve(listing, landlord))
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<DocumentId, ListingServiceError> {
    raw.parse()
        .map_err(|source| ListingServiceError::InvalidId { field, source })
}

fn validate_rent(rent_amount: f64) -> Result<(), ListingServiceError> {
    if rent_amount.is_finite() && rent_amount >= 0.0 {
        Ok(())
    } else {
        Err(ListingServiceError::InvalidRent(rent_amount))
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("invalid {field}: {source}")]
    InvalidId {
        field: &'static str,
        #[source]
        source: InvalidDocumentId,
    },
    #[error("rent amount must be a non-negative number, got {0}")]
    InvalidRent(f64),
    #[error("listing {0} not found")]
    NotFound(DocumentId),
    #[error(transparent)]
    Unauthorized(#[from] OwnershipViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}
