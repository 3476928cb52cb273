//! # tally
//!
//! An in-memory item store served over HTTP.
//!
//! Items are `{id, name, description}` records kept in insertion order. The
//! store assigns ids, and every operation runs under one lock. Nothing is
//! persisted: each process starts from the same two seed items.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tally::{ItemStore, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tally::Error> {
//!     let app = api::routes(Arc::new(ItemStore::seeded()));
//!     Server::bind("127.0.0.1:5000".parse().unwrap()).serve(app).await
//! }
//! ```
//!
//! ```text
//! curl localhost:5000/items
//! curl -X POST localhost:5000/items -d '{"name":"Item 3","description":"x"}'
//! curl -X PUT localhost:5000/items/3 -d '{"name":"renamed"}'
//! curl -X DELETE localhost:5000/items/3
//! ```
//!
//! The HTTP layer underneath is deliberately small: a [`matchit`] radix
//! router, type-erased async handlers, and a hyper server that drains
//! in-flight connections on SIGTERM / Ctrl-C.

mod error;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod handler;
pub mod health;
pub mod item;
pub mod logging;
pub mod store;

pub use config::Config;
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use item::{Item, ItemPatch, NewItem};
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{Server, shutdown_signal};
pub use status::Status;
pub use store::ItemStore;
