use crate::infra::{build_services, seed_demo_accounts, DemoAccounts};
use chrono::{Local, NaiveDate};
use clap::Args;
use rental_hub::bookings::{
    BookingQuery, BookingStatus, BookingStatusUpdate, NewBooking, TransitionPolicy,
};
use rental_hub::config::PolicyConfig;
use rental_hub::error::AppError;
use rental_hub::listings::{ListingQuery, NewListing};
use rental_hub::ownership::OwnershipPolicy;
use rental_hub::store::InMemoryStore;
use rental_hub::users::Role;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Check-in date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = rental_hub::dates::parse_date)]
    pub(crate) check_in: Option<NaiveDate>,
    /// Length of the stay in nights.
    #[arg(long, default_value_t = 14)]
    pub(crate) nights: u32,
    /// Require pending -> approved -> confirmed instead of accepting any status change.
    #[arg(long)]
    pub(crate) strict: bool,
}

const DEMO_LISTINGS: &[(&str, f64, u32)] = &[
    ("Downtown Austin", 1200.0, 4),
    ("Downtown Austin", 1450.0, 5),
    ("Downtown Dallas", 950.0, 2),
    ("East Riverside", 780.0, 1),
    ("Downtown Houston", 1100.0, 3),
];

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        check_in,
        nights,
        strict,
    } = args;

    let check_in = check_in.unwrap_or_else(|| Local::now().date_naive());
    let check_out = check_in + chrono::Duration::days(i64::from(nights));
    let policy = PolicyConfig {
        ownership: OwnershipPolicy::Enforce,
        transitions: if strict {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        },
    };

    let store = Arc::new(InMemoryStore::new());
    let accounts = seed_demo_accounts(&store).await?;
    let services = build_services(store, policy);
    let admin = DemoAccounts::caller(&accounts.admin);
    let landlord = DemoAccounts::caller(&accounts.landlord);
    let tenant = DemoAccounts::caller(&accounts.tenant);

    println!("Rental hub demo");
    println!(
        "- ownership policy: {} | transition policy: {}",
        policy.ownership.label(),
        policy.transitions.label()
    );

    println!("\nListings published by {}", accounts.landlord.name);
    let mut published = Vec::with_capacity(DEMO_LISTINGS.len());
    for (location, rent_amount, bedrooms) in DEMO_LISTINGS {
        let listing = services
            .listings
            .create(
                &landlord,
                NewListing {
                    location: location.to_string(),
                    description: format!("{bedrooms} bedroom home in {location}"),
                    rent_amount: *rent_amount,
                    bedrooms: *bedrooms,
                    images: Vec::new(),
                    amenities: ["parking".to_string()].into_iter().collect(),
                },
            )
            .await?;
        println!(
            "  - {} | {} | {} bd | ${:.2}",
            listing.id, listing.location, listing.bedrooms, listing.rent_amount
        );
        published.push(listing);
    }

    let query = ListingQuery {
        location: Some("downtown".to_string()),
        bedrooms: Some(4),
        max_rent: Some(1200.0),
        ..ListingQuery::default()
    };
    let page = services.listings.list(query).await?;
    println!(
        "\nSearch: location~'downtown', 4+ bedrooms, rent <= 1200 -> {} match(es)",
        page.metadata.total
    );
    for listing in &page.listings {
        let owner = listing
            .landlord
            .as_ref()
            .map(|profile| profile.name.as_str())
            .unwrap_or("unknown landlord");
        println!(
            "  - {} ({} bd, ${:.2}) listed by {}",
            listing.location, listing.bedrooms, listing.rent_amount, owner
        );
    }

    let Some(target) = page.listings.first().or(published.first()) else {
        println!("  No listing available to book.");
        return Ok(());
    };

    println!("\nBooking lifecycle");
    let booking = services
        .bookings
        .create(
            &tenant,
            NewBooking {
                listing: target.id,
                check_in_date: check_in,
                check_out_date: check_out,
                tenant_message: "Hoping to move in for a few weeks.".to_string(),
                landlord: accounts.landlord.id,
            },
        )
        .await?;
    println!(
        "- {} requested {} ({} -> {}) -> {}",
        accounts.tenant.name, booking.id, check_in, check_out, booking.status
    );

    let steps = [
        (BookingStatus::Approved, &landlord, "landlord"),
        (BookingStatus::Confirmed, &tenant, "tenant"),
    ];
    let id = booking.id.to_hex();
    for (status, caller, actor) in steps {
        match services
            .bookings
            .update_status(&id, BookingStatusUpdate { status }, caller)
            .await
        {
            Ok(updated) => println!("- {actor} moved booking to {}", updated.status),
            Err(err) => println!("- {actor} could not set {status}: {err}"),
        }
    }

    admin.require_role(&[Role::Admin])?;
    let summary = services.bookings.list(BookingQuery::default()).await?;
    println!(
        "\nAdmin {} sees {} booking(s):",
        accounts.admin.name, summary.metadata.total
    );
    for booking in &summary.bookings {
        let location = booking
            .listing
            .as_ref()
            .map(|listing| listing.location.as_str())
            .unwrap_or("removed listing");
        println!("  - {} | {} | {}", booking.id, location, booking.status);
    }

    Ok(())
}
