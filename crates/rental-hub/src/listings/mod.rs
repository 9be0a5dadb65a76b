//! Landlord listings and the filtered, paginated public search over them.

pub mod domain;
pub mod filter;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Listing, ListingDetails, ListingPage, ListingUpdate, NewListing};
pub use filter::{BedroomMatch, ListingClause, ListingFilter, ListingQuery, BEDROOM_TIER_CEILING};
pub use router::listing_router;
pub use service::{ListingService, ListingServiceError};
