use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Json, Router,
};

use super::domain::{
    Booking, BookingDetails, BookingPage, BookingQuery, BookingStatusUpdate, NewBooking,
};
use super::service::BookingService;
use crate::caller::Caller;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::store::RentalStore;
use crate::users::Role;

/// Router exposing booking requests and the status workflow.
pub fn booking_router<S>(service: Arc<BookingService<S>>) -> Router
where
    S: RentalStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/bookings",
            post(create_handler::<S>).get(search_handler::<S>),
        )
        .route("/api/v1/bookings/tenant", get(tenant_handler::<S>))
        .route("/api/v1/bookings/landlord", get(landlord_handler::<S>))
        .route(
            "/api/v1/bookings/:id",
            get(details_handler::<S>).delete(delete_handler::<S>),
        )
        .route("/api/v1/bookings/:id/status", patch(status_handler::<S>))
        .with_state(service)
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
    Json(payload): Json<NewBooking>,
) -> Result<ApiResponse<BookingDetails>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Tenant])?;
    let booking = service.create(&caller, payload).await?;
    Ok(ApiResponse::created("Booking created successfully", booking))
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
    Query(query): Query<BookingQuery>,
) -> Result<ApiResponse<BookingPage>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Admin])?;
    let page = service.list(query).await?;
    Ok(ApiResponse::ok("Bookings retrieved successfully", page))
}

pub(crate) async fn tenant_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
) -> Result<ApiResponse<Vec<BookingDetails>>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Tenant])?;
    let bookings = service.list_for_tenant(&caller.user_id).await?;
    Ok(ApiResponse::ok("Bookings retrieved successfully", bookings))
}

pub(crate) async fn landlord_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
) -> Result<ApiResponse<Vec<BookingDetails>>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Landlord])?;
    let bookings = service.list_for_landlord(&caller.user_id).await?;
    Ok(ApiResponse::ok("Bookings retrieved successfully", bookings))
}

pub(crate) async fn details_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<ApiResponse<BookingDetails>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Admin, Role::Tenant, Role::Landlord])?;
    let booking = service.get(&id).await?;
    Ok(ApiResponse::ok("Booking details retrieved successfully", booking))
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
    Path(id): Path<String>,
    Json(update): Json<BookingStatusUpdate>,
) -> Result<ApiResponse<BookingDetails>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Landlord, Role::Tenant])?;
    let booking = service.update_status(&id, update, &caller).await?;
    Ok(ApiResponse::ok("Booking status updated successfully", booking))
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<BookingService<S>>>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<ApiResponse<Booking>, AppError>
where
    S: RentalStore + 'static,
{
    caller.require_role(&[Role::Admin])?;
    let booking = service.delete(&id).await?;
    Ok(ApiResponse::ok("Booking deleted successfully", booking))
}
