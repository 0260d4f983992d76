//! HTTP handlers
//!
//! Form-submitting endpoints for the contact directory. Write paths redirect
//! on success and re-render the form with field errors on failure.

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use minijinja::context;
use serde::Deserialize;
use tracing::debug;

use cd_core::{ContactForm, ContactId, Error as CoreError, FieldErrors};

use crate::error::{Result, WebError};
use crate::server::AppState;

// ============================================================================
// Request types
// ============================================================================

/// Query parameters for the contact listing
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Free-text search
    pub q: Option<String>,
    /// Zero-based page index, kept raw so a bad value is a 400 of our own
    pub page: Option<String>,
}

impl ListQuery {
    fn page_index(&self) -> Result<Option<i64>> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| WebError::BadRequest(format!("Invalid page: {}", raw))),
        }
    }
}

/// Query parameters for the inline email check
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

fn parse_id(raw: &str) -> Result<ContactId> {
    raw.parse()
        .map_err(|_| WebError::BadRequest(format!("Invalid contact id: {}", raw)))
}

fn not_found(state: &AppState) -> Result<Response> {
    let page = state.views.render("not_found.html", context! {})?;
    Ok((StatusCode::NOT_FOUND, page).into_response())
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cd-web"
    }))
}

/// Root redirects to the listing
pub async fn index() -> Redirect {
    Redirect::permanent("/contacts")
}

/// Contact listing with optional search and paging
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let page_index = query.page_index()?;
    let page = state.directory.list(query.q.as_deref(), page_index).await;
    Ok(state.views.render("contacts.html", context! { page => page })?.into_response())
}

/// Empty creation form
pub async fn new_contact_form(State(state): State<AppState>) -> Result<Response> {
    let page = state.views.render(
        "new.html",
        context! { form => ContactForm::default(), errors => FieldErrors::new() },
    )?;
    Ok(page.into_response())
}

/// Create a contact from the submitted form
pub async fn create_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    match state.directory.create(form).await {
        Ok(_) => Ok(Redirect::to("/contacts").into_response()),
        Err(CoreError::Validation(rejected)) => {
            let page = state.views.render(
                "new.html",
                context! { form => rejected.form, errors => rejected.errors },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Contact detail view
pub async fn show_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&contact_id)?;
    match state.directory.get(&id).await {
        Ok(contact) => {
            let page = state.views.render("view.html", context! { contact => contact })?;
            Ok(page.into_response())
        }
        Err(CoreError::NotFound(_)) => not_found(&state),
        Err(e) => Err(e.into()),
    }
}

/// Edit form prefilled with the current values
pub async fn edit_contact_form(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&contact_id)?;
    match state.directory.get(&id).await {
        Ok(contact) => {
            let page = state.views.render(
                "edit.html",
                context! {
                    contact_id => id.to_string(),
                    form => ContactForm::from(&contact),
                    errors => FieldErrors::new(),
                },
            )?;
            Ok(page.into_response())
        }
        Err(CoreError::NotFound(_)) => not_found(&state),
        Err(e) => Err(e.into()),
    }
}

/// Replace a contact's fields from the submitted form
pub async fn update_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let id = parse_id(&contact_id)?;
    match state.directory.update(&id, form).await {
        Ok(contact) => Ok(Redirect::to(&format!("/contacts/{}", contact.id)).into_response()),
        Err(CoreError::Validation(rejected)) => {
            let page = state.views.render(
                "edit.html",
                context! {
                    contact_id => id.to_string(),
                    form => rejected.form,
                    errors => rejected.errors,
                },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(CoreError::NotFound(_)) => not_found(&state),
        Err(e) => Err(e.into()),
    }
}

/// Inline email check while editing a contact
///
/// Called by the edit form when the email input changes. Responds with the
/// error message, or an empty body when the address is acceptable.
pub async fn check_email(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Response> {
    let id = parse_id(&contact_id)?;
    if let Err(CoreError::NotFound(_)) = state.directory.get(&id).await {
        return not_found(&state);
    }

    match state.directory.validate_email_only(&query.email, Some(&id)).await {
        Ok(()) => Ok(String::new().into_response()),
        Err(CoreError::InvalidEmail) => Ok(CoreError::InvalidEmail.to_string().into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Delete a contact and return to the listing
///
/// An unknown id is treated as already deleted.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Response> {
    let id = parse_id(&contact_id)?;
    match state.directory.delete(&id).await {
        Ok(()) => {}
        Err(CoreError::NotFound(_)) => debug!("Contact already gone: {}", id),
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to("/contacts").into_response())
}
