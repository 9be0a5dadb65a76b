use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::PageMetadata;
use crate::store::DocumentId;
use crate::users::UserProfile;

/// A rentable property advertised by a landlord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: DocumentId,
    pub location: String,
    pub description: String,
    pub rent_amount: f64,
    pub bedrooms: u32,
    pub images: Vec<String>,
    pub amenities: BTreeSet<String>,
    pub landlord: DocumentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn from_payload(payload: NewListing, landlord: DocumentId) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::generate(),
            location: payload.location,
            description: payload.description,
            rent_amount: payload.rent_amount,
            bedrooms: payload.bedrooms,
            images: payload.images,
            amenities: payload.amenities,
            landlord,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Creation payload; the landlord comes from the caller, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub location: String,
    pub description: String,
    pub rent_amount: f64,
    pub bedrooms: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<BTreeSet<String>>,
}

impl ListingUpdate {
    /// Overwrites the supplied fields and bumps `updated_at`.
    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(rent_amount) = self.rent_amount {
            listing.rent_amount = rent_amount;
        }
        if let Some(bedrooms) = self.bedrooms {
            listing.bedrooms = bedrooms;
        }
        if let Some(images) = self.images {
            listing.images = images;
        }
        if let Some(amenities) = self.amenities {
            listing.amenities = amenities;
        }
        listing.updated_at = Utc::now();
    }
}

/// Listing with its landlord reference resolved. A dangling reference serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    pub id: DocumentId,
    pub location: String,
    pub description: String,
    pub rent_amount: f64,
    pub bedrooms: u32,
    pub images: Vec<String>,
    pub amenities: BTreeSet<String>,
    pub landlord: Option<UserProfile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingDetails {
    pub fn resolve(listing: Listing, landlord: Option<UserProfile>) -> Self {
        Self {
            id: listing.id,
            location: listing.location,
            description: listing.description,
            rent_amount: listing.rent_amount,
            bedrooms: listing.bedrooms,
            images: listing.images,
            amenities: listing.amenities,
            landlord,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// One page of listings plus the paging echo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage<T> {
    pub listings: Vec<T>,
    pub metadata: PageMetadata,
}
