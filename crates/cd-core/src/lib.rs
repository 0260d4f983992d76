//! cd-core: Contact Directory core library
//!
//! In-memory contact store, identifier allocation, field validation with
//! cross-record email uniqueness, substring search and page windowing.
//!
//! ```rust,ignore
//! use cd_core::{ContactDirectory, ContactForm};
//!
//! let directory = ContactDirectory::new();
//! let contact = directory
//!     .create(ContactForm::new("Ana", "Lopez", "ana@example.com", "5551234"))
//!     .await?;
//! let page = directory.list(Some("Ana"), None).await;
//! ```

pub mod config;
pub mod contact;
pub mod directory;
pub mod error;

pub use config::{Config, DirectoryConfig, ServerConfig};
pub use contact::{
    Contact, ContactFields, ContactForm, ContactId, ContactStore, Field, FieldErrors, IdAllocator,
    PageWindow, Rejected, UuidAllocator,
};
pub use directory::ContactDirectory;
pub use error::{Error, Result};
