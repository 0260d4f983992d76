//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    check_email, create_contact, delete_contact, edit_contact_form, health, index, list_contacts,
    new_contact_form, show_contact, update_contact,
};
use crate::server::AppState;

/// Create the contact routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/contacts", get(list_contacts))
        .route("/contacts/new", get(new_contact_form).post(create_contact))
        .route("/contacts/{contact_id}", get(show_contact).delete(delete_contact))
        .route("/contacts/{contact_id}/edit", get(edit_contact_form).post(update_contact))
        .route("/contacts/{contact_id}/email", get(check_email))
        .route("/contacts/{contact_id}/delete", post(delete_contact))
}
