use serde::{Deserialize, Serialize};

use super::domain::Listing;
use crate::pagination::PageRequest;
use crate::store::DocumentId;

/// Bedroom counts at or above this value switch from exact to lower-bound matching.
pub const BEDROOM_TIER_CEILING: u32 = 4;

/// Raw listing search parameters as they arrive from the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_rent_bound")]
    pub min_rent: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_rent_bound")]
    pub max_rent: Option<f64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Rent bounds must be finite; `NaN` and infinities fail to decode.
fn deserialize_rent_bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(bound) if !bound.is_finite() => Err(serde::de::Error::custom(format!(
            "rent bound must be a finite number, got {bound}"
        ))),
        bound => Ok(bound),
    }
}

impl ListingQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomMatch {
    Exactly(u32),
    AtLeast(u32),
}

impl BedroomMatch {
    /// Studio through three bedrooms match exactly; anything larger is an open-ended "n+".
    pub fn tiered(bedrooms: u32) -> Self {
        if bedrooms < BEDROOM_TIER_CEILING {
            BedroomMatch::Exactly(bedrooms)
        } else {
            BedroomMatch::AtLeast(bedrooms)
        }
    }

    pub fn accepts(self, bedrooms: u32) -> bool {
        match self {
            BedroomMatch::Exactly(expected) => bedrooms == expected,
            BedroomMatch::AtLeast(minimum) => bedrooms >= minimum,
        }
    }
}

/// A single predicate over a listing document.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingClause {
    Landlord(DocumentId),
    /// Needle is stored lowercased.
    LocationContains(String),
    Bedrooms(BedroomMatch),
    RentAtLeast(f64),
    RentAtMost(f64),
}

impl ListingClause {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            ListingClause::Landlord(landlord) => listing.landlord == *landlord,
            ListingClause::LocationContains(needle) => {
                listing.location.to_lowercase().contains(needle.as_str())
            }
            ListingClause::Bedrooms(rule) => rule.accepts(listing.bedrooms),
            ListingClause::RentAtLeast(minimum) => listing.rent_amount >= *minimum,
            ListingClause::RentAtMost(maximum) => listing.rent_amount <= *maximum,
        }
    }
}

/// Conjunction of clauses; an empty filter matches every listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    clauses: Vec<ListingClause>,
}

impl ListingFilter {
    pub fn from_query(query: &ListingQuery) -> Self {
        let mut clauses = Vec::new();

        if let Some(location) = query.location.as_deref().filter(|value| !value.is_empty()) {
            clauses.push(ListingClause::LocationContains(location.to_lowercase()));
        }
        if let Some(bedrooms) = query.bedrooms {
            clauses.push(ListingClause::Bedrooms(BedroomMatch::tiered(bedrooms)));
        }
        if let Some(min_rent) = query.min_rent {
            clauses.push(ListingClause::RentAtLeast(min_rent));
        }
        if let Some(max_rent) = query.max_rent {
            clauses.push(ListingClause::RentAtMost(max_rent));
        }

        Self { clauses }
    }

    pub fn with_landlord(mut self, landlord: DocumentId) -> Self {
        self.clauses.insert(0, ListingClause::Landlord(landlord));
        self
    }

    pub fn clauses(&self) -> &[ListingClause] {
        &self.clauses
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.clauses.iter().all(|clause| clause.matches(listing))
    }
}
