use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use super::{
    BookingRepository, DocumentId, InMemoryStore, ListingRepository, StoreError, UserDirectory,
};
use crate::bookings::{Booking, BookingFilter, BookingStatus};
use crate::caller::{Caller, CALLER_ID_HEADER, CALLER_ROLE_HEADER};
use crate::listings::{Listing, ListingFilter, ListingUpdate};
use crate::pagination::PageRequest;
use crate::users::{Role, User};

/// One account per role plus a second landlord for ownership checks.
pub(crate) struct Accounts {
    pub(crate) admin: User,
    pub(crate) landlord: User,
    pub(crate) other_landlord: User,
    pub(crate) tenant: User,
}

impl Accounts {
    pub(crate) fn caller(user: &User) -> Caller {
        Caller::new(user.id.to_hex(), user.role)
    }
}

pub(crate) async fn seeded_store() -> (Arc<InMemoryStore>, Accounts) {
    let store = Arc::new(InMemoryStore::new());
    let accounts = Accounts {
        admin: User::new("Ada Admin", "admin@rental.test", "hash-admin", Role::Admin),
        landlord: User::new("Lena Landlord", "lena@rental.test", "hash-lena", Role::Landlord),
        other_landlord: User::new("Omar Owner", "omar@rental.test", "hash-omar", Role::Landlord),
        tenant: User::new("Tomas Tenant", "tomas@rental.test", "hash-tomas", Role::Tenant),
    };

    for user in [
        &accounts.admin,
        &accounts.landlord,
        &accounts.other_landlord,
        &accounts.tenant,
    ] {
        store
            .insert_user(user.clone())
            .await
            .expect("seed user insert succeeds");
    }

    (store, accounts)
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    caller: Option<&Caller>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder
            .header(CALLER_ID_HEADER, caller.user_id.as_str())
            .header(CALLER_ROLE_HEADER, caller.role.label());
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store double whose every operation fails.
pub(crate) struct UnavailableStore;

fn offline<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("database offline".to_string()))
}

#[async_trait]
impl ListingRepository for UnavailableStore {
    async fn insert_listing(&self, _listing: Listing) -> Result<Listing, StoreError> {
        offline()
    }

    async fn find_listings(
        &self,
        _filter: &ListingFilter,
        _page: PageRequest,
    ) -> Result<Vec<Listing>, StoreError> {
        offline()
    }

    async fn count_listings(&self, _filter: &ListingFilter) -> Result<u64, StoreError> {
        offline()
    }

    async fn find_listing(&self, _id: &DocumentId) -> Result<Option<Listing>, StoreError> {
        offline()
    }

    async fn update_listing(
        &self,
        _id: &DocumentId,
        _update: ListingUpdate,
    ) -> Result<Option<Listing>, StoreError> {
        offline()
    }

    async fn delete_listing(&self, _id: &DocumentId) -> Result<Option<Listing>, StoreError> {
        offline()
    }
}

#[async_trait]
impl BookingRepository for UnavailableStore {
    async fn insert_booking(&self, _booking: Booking) -> Result<Booking, StoreError> {
        offline()
    }

    async fn find_bookings(
        &self,
        _filter: &BookingFilter,
        _page: Option<PageRequest>,
    ) -> Result<Vec<Booking>, StoreError> {
        offline()
    }

    async fn count_bookings(&self, _filter: &BookingFilter) -> Result<u64, StoreError> {
        offline()
    }

    async fn find_booking(&self, _id: &DocumentId) -> Result<Option<Booking>, StoreError> {
        offline()
    }

    async fn update_booking_status(
        &self,
        _id: &DocumentId,
        _status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        offline()
    }

    async fn delete_booking(&self, _id: &DocumentId) -> Result<Option<Booking>, StoreError> {
        offline()
    }
}

#[async_trait]
impl UserDirectory for UnavailableStore {
    async fn insert_user(&self, _user: User) -> Result<User, StoreError> {
        offline()
    }

    async fn find_user(&self, _id: &DocumentId) -> Result<Option<User>, StoreError> {
        offline()
    }
}
