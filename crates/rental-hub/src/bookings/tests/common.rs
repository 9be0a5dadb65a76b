use std::sync::Arc;

use chrono::NaiveDate;

use crate::bookings::{BookingService, NewBooking, TransitionPolicy};
use crate::listings::{Listing, NewListing};
use crate::ownership::OwnershipPolicy;
use crate::store::{InMemoryStore, ListingRepository};
use crate::users::User;

pub(super) use crate::store::testing::{
    json_request, read_json_body, seeded_store, Accounts, UnavailableStore,
};

pub(super) struct Fixture {
    pub(super) service: BookingService<InMemoryStore>,
    pub(super) store: Arc<InMemoryStore>,
    pub(super) accounts: Accounts,
    pub(super) listing: Listing,
}

pub(super) async fn fixture(ownership: OwnershipPolicy, transitions: TransitionPolicy) -> Fixture {
    let (store, accounts) = seeded_store().await;
    let listing = store
        .insert_listing(Listing::from_payload(
            NewListing {
                location: "Downtown Austin".to_string(),
                description: "Corner unit".to_string(),
                rent_amount: 1200.0,
                bedrooms: 4,
                images: Vec::new(),
                amenities: Default::default(),
            },
            accounts.landlord.id,
        ))
        .await
        .expect("listing seeded");
    let service = BookingService::new(store.clone(), ownership, transitions);

    Fixture {
        service,
        store,
        accounts,
        listing,
    }
}

pub(super) fn request_for(listing: &Listing, landlord: &User) -> NewBooking {
    NewBooking {
        listing: listing.id,
        check_in_date: NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date"),
        check_out_date: NaiveDate::from_ymd_opt(2025, 7, 14).expect("valid date"),
        tenant_message: "Arriving with one cat.".to_string(),
        landlord: landlord.id,
    }
}
