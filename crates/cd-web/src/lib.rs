//! cd-web: HTTP front end for the contact directory
//!
//! Form-submitting endpoints built with axum, HTML views rendered with
//! minijinja, and static file serving.
//!
//! ## Routes
//!
//! - `GET /` redirects to `/contacts`
//! - `GET /contacts?q=&page=` lists contacts
//! - `GET|POST /contacts/new` shows and submits the creation form
//! - `GET|DELETE /contacts/{id}` shows or deletes a contact
//! - `GET|POST /contacts/{id}/edit` shows and submits the edit form
//! - `GET /contacts/{id}/email?email=` checks one email value
//! - `POST /contacts/{id}/delete` deletes from a plain HTML form
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cd_core::Config;
//!
//! #[tokio::main]
//! async fn main() {
//!     cd_web::start_server(Config::load().unwrap()).await.unwrap();
//! }
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod views;

pub use error::{Result, WebError};
pub use server::{create_router, start_server, AppState, WebServer};
pub use views::Views;
