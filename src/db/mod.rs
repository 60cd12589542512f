//! SQLite storage: a single worker thread owns the connection and async
//! callers hand it closures through [`Database::execute`].

mod connection;
mod helpers;
mod migrations;
pub mod models;
mod repositories;

pub use connection::Database;
pub use models::{Label, LabelObject, LabelUpdate, NewLabel, Org, Thread, User};
