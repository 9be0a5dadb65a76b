use super::domain::{Booking, BookingStatus};
use crate::store::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingClause {
    Status(BookingStatus),
    Tenant(DocumentId),
    Landlord(DocumentId),
}

impl BookingClause {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            BookingClause::Status(status) => booking.status == *status,
            BookingClause::Tenant(tenant) => booking.tenant == *tenant,
            BookingClause::Landlord(landlord) => booking.landlord == *landlord,
        }
    }
}

/// Conjunction of booking clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    clauses: Vec<BookingClause>,
}

impl BookingFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, clause: BookingClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn with_status(self, status: Option<BookingStatus>) -> Self {
        match status {
            Some(status) => self.with(BookingClause::Status(status)),
            None => self,
        }
    }

    pub fn clauses(&self) -> &[BookingClause] {
        &self.clauses
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.clauses.iter().all(|clause| clause.matches(booking))
    }
}
