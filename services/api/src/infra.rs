use metrics_exporter_prometheus::PrometheusHandle;
use rental_hub::bookings::BookingService;
use rental_hub::config::PolicyConfig;
use rental_hub::listings::ListingService;
use rental_hub::store::{InMemoryStore, StoreError, UserDirectory};
use rental_hub::users::{Role, User};
use rental_hub::Caller;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) struct RentalServices {
    pub(crate) listings: Arc<ListingService<InMemoryStore>>,
    pub(crate) bookings: Arc<BookingService<InMemoryStore>>,
}

pub(crate) fn build_services(store: Arc<InMemoryStore>, policy: PolicyConfig) -> RentalServices {
    RentalServices {
        listings: Arc::new(ListingService::new(store.clone(), policy.ownership)),
        bookings: Arc::new(BookingService::new(
            store,
            policy.ownership,
            policy.transitions,
        )),
    }
}

/// Accounts seeded for manual testing and the CLI demo.
pub(crate) struct DemoAccounts {
    pub(crate) admin: User,
    pub(crate) landlord: User,
    pub(crate) tenant: User,
}

impl DemoAccounts {
    /// The identity a gateway would forward for `user`.
    pub(crate) fn caller(user: &User) -> Caller {
        Caller::new(user.id.to_hex(), user.role)
    }
}

pub(crate) async fn seed_demo_accounts(store: &InMemoryStore) -> Result<DemoAccounts, StoreError> {
    let admin = seed(store, "Avery Admin", "admin@rentalhub.local", Role::Admin).await?;
    let landlord = seed(
        store,
        "Morgan Landlord",
        "landlord@rentalhub.local",
        Role::Landlord,
    )
    .await?;
    let tenant = seed(store, "Riley Tenant", "tenant@rentalhub.local", Role::Tenant).await?;

    Ok(DemoAccounts {
        admin,
        landlord,
        tenant,
    })
}

async fn seed(
    store: &InMemoryStore,
    name: &str,
    email: &str,
    role: Role,
) -> Result<User, StoreError> {
    let user = store
        .insert_user(User::new(name, email, "demo-password-hash", role))
        .await?;
    info!(user = %user.id, %role, email, "seeded demo account");
    Ok(user)
}
