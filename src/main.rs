//! # Estate Console (demo session)
//!
//! Runs one scripted back-office session against canned responses:
//!
//! 1. Load [`ConsoleConfig`] (file named by `ESTATE_CONSOLE_CONFIG`, then env overrides).
//! 2. Start the [`EstateConsole`] over a [`MockTransport`].
//! 3. Browse developers, work a lead, confirm a booking, pull a property expense report.
//! 4. Sign out and shut down.
//!
//! Set `RUST_LOG=debug` to see every lifecycle event the store applies.

use estate_console::config::ConsoleConfig;
use estate_console::error::ConsoleError;
use estate_console::lifecycle::EstateConsole;
use estate_console::model::{LeadCreate, LeadStatus};
use resource_sync::mock::MockTransport;
use resource_sync::tracing::setup_tracing;
use resource_sync::transport::Method;
use resource_sync::{ModuleFacade, RequestError, ResourceId};
use serde_json::{json, Map};
use std::sync::Arc;
use tracing::{error, info, Instrument};

const CONFIG_ENV: &str = "ESTATE_CONSOLE_CONFIG";

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    setup_tracing();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => ConsoleConfig::load(path)?,
        Err(_) => ConsoleConfig::default().with_env_overrides()?,
    };
    info!(?config, "Configuration loaded");

    let transport = Arc::new(MockTransport::new());
    script_backend(&transport, &config);

    let console = EstateConsole::start(transport.clone(), &config)?;

    // Developers: nested page envelope
    let span = tracing::info_span!("developers");
    async {
        console.developers.list(json!({"page": 1})).await?;
        let page = console.developers.pagination().await?;
        let names: Vec<_> = console
            .developers
            .items()
            .await?
            .into_iter()
            .map(|d| d.value.name)
            .collect();
        info!(?names, total = page.total_items, pages = page.total_pages, "Developers loaded");
        Ok::<_, ConsoleError>(())
    }
    .instrument(span)
    .await?;

    // Leads: a rejected create, then a valid one moved through the pipeline
    let span = tracing::info_span!("leads");
    async {
        console.leads.list(json!({})).await?;

        let rejected = console.leads.create_lead(&LeadCreate::default()).await;
        if let Err(e) = rejected {
            let fields = console.leads.validation_errors().await?;
            info!(error = %e, ?fields, "Lead rejected");
        }

        let lead = LeadCreate {
            name: "Mariam Haddad".to_owned(),
            phone: Some("+971500000001".to_owned()),
            source: Some("website".to_owned()),
            ..LeadCreate::default()
        };
        let created = console.leads.create_lead(&lead).await?;
        info!(lead_id = %created.id(), "Lead created");

        console
            .leads
            .update_status(created.id().clone(), LeadStatus::Qualified)
            .await?;
        let open = console.leads.open_leads().await?;
        info!(open = open.len(), "Lead qualified");
        Ok::<_, ConsoleError>(())
    }
    .instrument(span)
    .await?;

    // Bookings: confirm without an echoed record
    let span = tracing::info_span!("bookings");
    let booking = async {
        console.bookings.list(json!({})).await?;
        console.bookings.confirm(ResourceId::Int(31)).await?;
        Ok::<_, ConsoleError>(console.bookings.items().await?)
    }
    .instrument(span)
    .await;
    match booking {
        Ok(items) => {
            let statuses: Vec<_> = items.iter().map(|b| b.status).collect();
            info!(?statuses, "Booking confirmed");
        }
        Err(e) => error!(error = %e, "Booking confirmation failed"),
    }

    // Transactions: one operation, three modules
    let span = tracing::info_span!("transactions");
    async {
        console.transactions.fetch_all(1, Map::new()).await?;
        console
            .transactions
            .fetch_property_expenses(ResourceId::Int(7))
            .await?;
        if let Err(e) = console.transactions.fetch_property_ledger(ResourceId::Int(7)).await {
            let report_error = console.transactions.ledger().await?.error;
            info!(error = %e, ?report_error, "Ledger unavailable");
        }
        let general = console.transactions.items().await?.len();
        let expense_total = console.transactions.expense_total().await?;
        info!(general, expense_total, "Transactions loaded");
        Ok::<_, ConsoleError>(())
    }
    .instrument(span)
    .await?;

    // Sign out
    console.reset_session().await?;
    let remaining = console.leads.items().await?.len();
    info!(remaining, "Session reset");

    console.shutdown().await?;
    transport.verify();

    info!("Application completed successfully");
    Ok(())
}

/// Canned backend responses, one per request the session makes.
fn script_backend(transport: &MockTransport, config: &ConsoleConfig) {
    let path = |p: &str| config.endpoint(p);

    transport
        .on(Method::Get, &path("/developers"))
        .with_query(json!({"page": 1}))
        .reply(json!({
            "data": [
                {"id": 1, "developer_name": "Emaar", "total_projects": "42"},
                {"id": 2, "developer_name": "Sobha", "contact_number": "+97144000000"}
            ],
            "current_page": 1,
            "last_page": 3,
            "total": 6,
            "per_page": 2
        }));

    transport.on(Method::Get, &path("/leads")).reply(json!([
        {"id": 11, "lead_name": "Omar Khalil", "lead_status": "contacted"},
        {"id": 12, "lead_name": "Sara Ali", "lead_status": "lost"}
    ]));
    transport.on(Method::Post, &path("/leads")).fail(RequestError::from_response(
        422,
        &json!({
            "message": "The given data was invalid.",
            "errors": {"lead_name": ["The lead name field is required."]}
        }),
    ));
    transport
        .on(Method::Post, &path("/leads"))
        .reply(json!({"data": {"id": 13, "lead_name": "Mariam Haddad", "lead_status": "new"}}));
    transport
        .on(Method::Patch, &path("/leads/13/status"))
        .with_body(json!({"status": "qualified"}))
        .reply(json!({"message": "Status updated"}));

    transport.on(Method::Get, &path("/bookings")).reply(json!({
        "data": {
            "data": [{"id": 31, "booking_ref": "BK-0031", "booking_status": "pending"}],
            "current_page": 1,
            "last_page": 1,
            "total": 1
        }
    }));
    transport
        .on(Method::Patch, &path("/bookings/31/status"))
        .with_body(json!({"status": "confirmed"}))
        .reply(json!({"success": true}));

    transport
        .on(Method::Get, &path("/transactions"))
        .with_query(json!({"page": 1}))
        .reply(json!({"data": [{"id": 501, "type": "income", "amount": 12000}], "total": 1}));
    transport
        .on(Method::Get, &path("/transactions"))
        .with_query(json!({"propertyId": 7, "type": "expense"}))
        .reply(json!({"data": [
            {"id": 601, "propertyId": 7, "type": "expense", "amount": "1,500.00"},
            {"id": 602, "propertyId": 7, "type": "expense", "amount": 250}
        ]}));
    transport
        .on(Method::Get, &path("/transactions"))
        .with_query(json!({"propertyId": 7}))
        .fail(RequestError::Network("connection reset".into()));
}
