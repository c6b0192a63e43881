//! Terminal client for a properties REST API: list, filter, page through,
//! create, edit and delete property listings.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod models;
pub mod ui;

pub use api::{ApiClient, PropertyApi};
pub use config::{ClientArgs, ClientConfig};
pub use controller::PageController;
pub use error::{ClientError, ValidationError};
