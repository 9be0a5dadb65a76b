use std::sync::Arc;

use crate::caller::Caller;
use crate::listings::{ListingDetails, ListingService, NewListing};
use crate::ownership::OwnershipPolicy;
use crate::store::InMemoryStore;

pub(super) use crate::store::testing::{
    json_request, read_json_body, seeded_store, Accounts, UnavailableStore,
};

pub(super) fn payload(location: &str, rent_amount: f64, bedrooms: u32) -> NewListing {
    NewListing {
        location: location.to_string(),
        description: format!("{bedrooms} bedroom home in {location}"),
        rent_amount,
        bedrooms,
        images: vec!["https://img.rental.test/front.jpg".to_string()],
        amenities: ["parking", "laundry"].into_iter().map(String::from).collect(),
    }
}

pub(super) async fn build_service(
    ownership: OwnershipPolicy,
) -> (ListingService<InMemoryStore>, Arc<InMemoryStore>, Accounts) {
    let (store, accounts) = seeded_store().await;
    let service = ListingService::new(store.clone(), ownership);
    (service, store, accounts)
}

/// Creates one listing per `(location, rent, bedrooms)` row, in order.
pub(super) async fn seed_listings(
    service: &ListingService<InMemoryStore>,
    landlord: &Caller,
    rows: &[(&str, f64, u32)],
) -> Vec<ListingDetails> {
    let mut created = Vec::with_capacity(rows.len());
    for (location, rent_amount, bedrooms) in rows {
        let listing = service
            .create(landlord, payload(location, *rent_amount, *bedrooms))
            .await
            .expect("listing created");
        created.push(listing);
    }
    created
}

pub(super) const CATALOGUE: &[(&str, f64, u32)] = &[
    ("Downtown Austin", 1200.0, 4),
    ("downtown dallas", 950.0, 2),
    ("Uptown", 1800.0, 5),
    ("Riverside", 700.0, 1),
    ("Downtown Houston", 1500.0, 6),
    ("Suburbia", 1200.0, 3),
];
