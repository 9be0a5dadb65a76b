//! Booking requests and the status lifecycle between tenant and landlord.

pub mod domain;
pub mod filter;
pub mod lifecycle;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Booking, BookingDetails, BookingPage, BookingQuery, BookingStatus, BookingStatusUpdate,
    NewBooking, UnknownBookingStatus,
};
pub use filter::{BookingClause, BookingFilter};
pub use lifecycle::{InvalidTransition, TransitionPolicy};
pub use router::booking_router;
pub use service::{BookingService, BookingServiceError};
