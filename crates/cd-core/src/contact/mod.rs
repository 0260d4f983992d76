//! Contact records and the engine that manages them
//!
//! - [`types`]: the contact record, raw form values, and field errors
//! - [`id`]: identifier allocation for new contacts
//! - [`store`]: the ordered, in-memory collection
//! - [`validate`]: per-field and cross-record (email uniqueness) rules
//! - [`search`]: substring filtering and page windowing

pub mod id;
pub mod search;
pub mod store;
pub mod types;
pub mod validate;

pub use id::{IdAllocator, UuidAllocator};
pub use search::{paginate, search, window, DEFAULT_PAGE_SIZE};
pub use store::ContactStore;
pub use types::{
    Contact, ContactFields, ContactForm, ContactId, Field, FieldErrors, PageWindow, Rejected,
};
pub use validate::{check_email, validate};
