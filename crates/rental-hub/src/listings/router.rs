use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use super::domain::{Listing, ListingDetails, ListingPage, ListingUpdate, NewListing};
use super::filter::ListingQuery;
use super::service::ListingService;
use crate::caller::Caller;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::store::RentalStore;
use crate::users::Role;

/// Router exposing listing creation, search, and maintenance.
pub fn listing_router<S>(service: Arc<ListingService<S>>) -> Router
where
    S: RentalStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            post(create_handler::<S>).get(search_handler::<S>),
        )
        .route("/api/v1/listings/landlord", get(landlord_handler::<S>))
        .route(
            "/api/v1/listings/:id",
            get(details_handler::<S>)
                .patch(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    caller: Caller,
    Json(payload): Json<NewListing>,
) -> Result<ApiResponse<ListingDetails>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Landlord])?;
    let listing = service.create(&caller, payload).await?;
    Ok(ApiResponse::created("Listing created successfully.", listing))
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Query(query): Query<ListingQuery>,
) -> Result<ApiResponse<ListingPage<ListingDetails>>, AppError>
where
    S: RentalStore + 'static,
{
    let page = service.list(query).await?;
    Ok(ApiResponse::ok("Listings retrieved successfully.", page))
}

pub(crate) async fn landlord_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    caller: Caller,
    Query(query): Query<ListingQuery>,
) -> Result<ApiResponse<ListingPage<Listing>>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Landlord])?;
    let page = service.list_for_landlord(&caller.user_id, query).await?;
    Ok(ApiResponse::ok("Listings retrieved successfully.", page))
}

pub(crate) async fn details_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Listing>, AppError>
where
    S: RentalStore + 'static,
{
    let listing = service.get(&id).await?;
    Ok(ApiResponse::ok("Listing details retrieved successfully.", listing))
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    caller: Caller,
    Path(id): Path<String>,
    Json(update): Json<ListingUpdate>,
) -> Result<ApiResponse<Listing>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Landlord, Role::Admin])?;
    let listing = service.update(&id, update, &caller).await?;
    Ok(ApiResponse::ok("Listing updated successfully.", listing))
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<ApiResponse<Listing>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Admin, Role::Landlord])?;
    let listing = service.delete(&id, &caller).await?;
    Ok(ApiResponse::ok("Listing deleted successfully.", listing))
}
