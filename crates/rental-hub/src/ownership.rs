use std::str::FromStr;

use tracing::warn;

use crate::caller::Caller;
use crate::store::DocumentId;

/// What happens when a caller mutates a resource it does not own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// Reject with [`OwnershipViolation`].
    #[default]
    Enforce,
    /// Log a warning and let the mutation through.
    Warn,
}

impl OwnershipPolicy {
    /// Admins always pass. Otherwise the caller must match one of `owners`.
    pub fn check(
        self,
        caller: &Caller,
        owners: &[DocumentId],
        resource: &'static str,
        id: DocumentId,
    ) -> Result<(), OwnershipViolation> {
        if caller.is_admin() {
            return Ok(());
        }

        let owns = caller
            .document_id()
            .map(|caller_id| owners.contains(&caller_id))
            .unwrap_or(false);
        if owns {
            return Ok(());
        }

        match self {
            OwnershipPolicy::Enforce => Err(OwnershipViolation {
                resource,
                id,
                caller: caller.user_id.clone(),
            }),
            OwnershipPolicy::Warn => {
                warn!(
                    resource,
                    %id,
                    caller = %caller.user_id,
                    role = %caller.role,
                    "ownership mismatch; continuing under warn-only policy"
                );
                Ok(())
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OwnershipPolicy::Enforce => "enforce",
            OwnershipPolicy::Warn => "warn",
        }
    }
}

impl FromStr for OwnershipPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(OwnershipPolicy::Enforce),
            "warn" | "legacy" => Ok(OwnershipPolicy::Warn),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("caller {caller} does not own {resource} {id}")]
pub struct OwnershipViolation {
    pub resource: &'static str,
    pub id: DocumentId,
    pub caller: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::Role;

    #[test]
    fn owner_and_admin_pass() {
        let owner = DocumentId::generate();
        let resource = DocumentId::generate();

        let landlord = Caller::new(owner.to_string(), Role::Landlord);
        let admin = Caller::new(DocumentId::generate().to_string(), Role::Admin);

        assert!(OwnershipPolicy::Enforce
            .check(&landlord, &[owner], "listing", resource)
            .is_ok());
        assert!(OwnershipPolicy::Enforce
            .check(&admin, &[owner], "listing", resource)
            .is_ok());
    }

    #[test]
    fn owner_comparison_ignores_hex_case() {
        let owner = DocumentId::generate();
        let caller = Caller::new(owner.to_string().to_uppercase(), Role::Landlord);
        assert!(OwnershipPolicy::Enforce
            .check(&caller, &[owner], "listing", DocumentId::generate())
            .is_ok());
    }

    #[test]
    fn enforce_rejects_strangers_and_warn_lets_them_through() {
        let owner = DocumentId::generate();
        let resource = DocumentId::generate();
        let stranger = Caller::new(DocumentId::generate().to_string(), Role::Landlord);

        let err = OwnershipPolicy::Enforce
            .check(&stranger, &[owner], "listing", resource)
            .expect_err("stranger rejected");
        assert_eq!(err.resource, "listing");
        assert_eq!(err.id, resource);

        assert!(OwnershipPolicy::Warn
            .check(&stranger, &[owner], "listing", resource)
            .is_ok());
    }

    #[test]
    fn malformed_caller_ids_never_own_anything() {
        let caller = Caller::new("not-an-id", Role::Tenant);
        assert!(OwnershipPolicy::Enforce
            .check(&caller, &[DocumentId::generate()], "booking", DocumentId::generate())
            .is_err());
    }
}
