use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::deserialize_date;
use crate::listings::Listing;
use crate::pagination::PageMetadata;
use crate::store::DocumentId;
use crate::users::UserProfile;

/// Booking status as transmitted on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Tenant asked the landlord for the booking.
    #[default]
    Pending,
    /// Landlord accepted; waiting on the tenant's payment.
    Approved,
    Rejected,
    /// Tenant completed payment.
    Confirmed,
    /// Tenant walked away after approval.
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownBookingStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.label() == raw)
            .ok_or_else(|| UnknownBookingStatus(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status '{0}'")]
pub struct UnknownBookingStatus(pub String);

/// An empty `status` parameter means "any status".
fn deserialize_status_filter<'de, D>(deserializer: D) -> Result<Option<BookingStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<BookingStatus>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DocumentId,
    pub listing: DocumentId,
    pub tenant: DocumentId,
    pub landlord: DocumentId,
    pub status: BookingStatus,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub tenant_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// New bookings always start out `pending`.
    pub fn from_payload(payload: NewBooking, tenant: DocumentId) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::generate(),
            listing: payload.listing,
            tenant,
            landlord: payload.landlord,
            status: BookingStatus::default(),
            check_in_date: payload.check_in_date,
            check_out_date: payload.check_out_date,
            tenant_message: payload.tenant_message,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Creation payload; the tenant is injected from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub listing: DocumentId,
    #[serde(deserialize_with = "deserialize_date")]
    pub check_in_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub check_out_date: NaiveDate,
    pub tenant_message: String,
    pub landlord: DocumentId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

/// Admin listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_status_filter")]
    pub status: Option<BookingStatus>,
}

/// Booking with listing, tenant, and landlord references resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub id: DocumentId,
    pub listing: Option<Listing>,
    pub tenant: Option<UserProfile>,
    pub landlord: Option<UserProfile>,
    pub status: BookingStatus,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub tenant_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingDetails {
    pub fn resolve(
        booking: Booking,
        listing: Option<Listing>,
        tenant: Option<UserProfile>,
        landlord: Option<UserProfile>,
    ) -> Self {
        Self {
            id: booking.id,
            listing,
            tenant,
            landlord,
            status: booking.status,
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            tenant_message: booking.tenant_message,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingPage {
    pub bookings: Vec<BookingDetails>,
    pub metadata: PageMetadata,
}
