//! # Estate Console
//!
//! > **The session state of a real-estate back-office console.**
//!
//! Developers, projects, properties, inventory, owners, contacts, leads, tenancy
//! contracts, bookings and transactions are each cached in a resource module of one
//! composed store. Views never talk to the network directly: they call a client,
//! the client invokes a named operation, and the store applies the operation's
//! `Started → Succeeded | Failed` events.
//!
//! ## 🏗️ Design Notes
//!
//! ### One store per session
//! Every module is registered once in [`domain::Domains::register`] and lives on the
//! store actor's task. Signing out is [`EstateConsole::reset_session`], not a rebuild.
//!
//! ### Upstream names stay upstream
//! The backend says `developer_name`, `lead_status`, `type`; the models say `name`,
//! `status`, `kind`. Each model declares its mapping in [`model::Schema::FIELDS`].
//! The untouched record is kept alongside as `raw`.
//!
//! ### Shared operations
//! `transactions/list` feeds three modules. Scopes on the call arguments decide
//! which one keeps a given response; see [`domain::reports`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Models ([`model`])
//! Canonical entities, their create/update payloads and workflow statuses.
//!
//! ### 2. The Layout ([`domain`])
//! Which modules exist under which namespace, and the operation table.
//!
//! ### 3. The Clients ([`clients`])
//! Entity-specific operations (`confirm`, `update_status`, property reports) on top
//! of the generic [`ModuleFacade`](resource_sync::ModuleFacade).
//!
//! ### 4. The Runtime ([`lifecycle`], [`config`])
//! [`EstateConsole`] starts and stops a session; [`config::ConsoleConfig`] carries
//! page sizes and the API prefix.
//!
//! ## 🧪 Testing
//!
//! Tests drive a full console over [`resource_sync::mock::MockTransport`]; see
//! `tests/`.

pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod model;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use lifecycle::EstateConsole;
