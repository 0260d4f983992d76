//! Contact directory service
//!
//! [`ContactDirectory`] is the shared handle request handlers use. It owns
//! the [`ContactStore`] behind a single lock: every mutation validates and
//! writes under the write lock, so the email uniqueness check and the
//! insert/replace it guards cannot interleave with another request.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::contact::{
    check_email, validate, window, Contact, ContactForm, ContactId, ContactStore, IdAllocator,
    PageWindow, UuidAllocator, DEFAULT_PAGE_SIZE,
};
use crate::{Error, Result};

/// Cloneable handle to the shared contact directory
#[derive(Clone)]
pub struct ContactDirectory {
    store: Arc<RwLock<ContactStore>>,
    ids: Arc<dyn IdAllocator>,
    page_size: usize,
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactDirectory {
    /// Create an empty directory with random identifiers
    pub fn new() -> Self {
        Self::with_allocator(Arc::new(UuidAllocator))
    }

    /// Create an empty directory with a custom identifier source
    pub fn with_allocator(ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            store: Arc::new(RwLock::new(ContactStore::new())),
            ids,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the number of contacts per listing page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Build a directory from configuration, seeding demo contacts if asked
    pub async fn from_config(config: &DirectoryConfig) -> Result<Self> {
        if config.page_size == 0 {
            return Err(Error::Config("page_size must be greater than zero".to_string()));
        }
        let directory = Self::new().with_page_size(config.page_size);
        if config.seed_demo {
            directory.seed_demo().await?;
        }
        Ok(directory)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Load the two demo contacts through the normal creation path
    pub async fn seed_demo(&self) -> Result<()> {
        for form in [
            ContactForm::new("Pedro", "Sanchez", "pedro@gm.com", "113"),
            ContactForm::new("Juan", "Mama", "juan@gm.com", "112"),
        ] {
            self.create(form).await?;
        }
        info!("Seeded demo contacts");
        Ok(())
    }

    /// Validate a submission and store it as a new contact
    pub async fn create(&self, form: ContactForm) -> Result<Contact> {
        let mut store = self.store.write().await;

        let fields = validate(&form, &store, None).map_err(|rejected| {
            debug!("Rejected new contact: {}", rejected.errors);
            Error::Validation(Box::new(rejected))
        })?;

        let contact = Contact::new(self.ids.allocate(), fields);
        store.insert(contact.clone())?;

        info!("Created contact: {}", contact.id);
        Ok(contact)
    }

    /// Replace every field of an existing contact, keeping its id and position
    pub async fn update(&self, id: &ContactId, form: ContactForm) -> Result<Contact> {
        let mut store = self.store.write().await;

        if store.find_by_id(id).is_none() {
            debug!("Update for unknown contact: {}", id);
            return Err(Error::NotFound(*id));
        }

        let fields = validate(&form, &store, Some(id)).map_err(|rejected| {
            debug!("Rejected edit of {}: {}", id, rejected.errors);
            Error::Validation(Box::new(rejected))
        })?;

        let contact = store.replace(id, fields).ok_or(Error::NotFound(*id))?;

        info!("Updated contact: {}", id);
        Ok(contact)
    }

    /// Remove a contact
    pub async fn delete(&self, id: &ContactId) -> Result<()> {
        let mut store = self.store.write().await;
        match store.delete(id) {
            Some(_) => {
                info!("Deleted contact: {}", id);
                Ok(())
            }
            None => {
                debug!("Delete for unknown contact: {}", id);
                Err(Error::NotFound(*id))
            }
        }
    }

    /// Fetch a single contact
    pub async fn get(&self, id: &ContactId) -> Result<Contact> {
        let store = self.store.read().await;
        store.find_by_id(id).cloned().ok_or(Error::NotFound(*id))
    }

    /// List contacts, optionally filtered, one page at a time
    pub async fn list(&self, query: Option<&str>, page: Option<i64>) -> PageWindow {
        let store = self.store.read().await;
        let query = query.unwrap_or_default();
        let page = window(store.all(), query, page.unwrap_or(0), self.page_size);
        debug!(
            "Listed page {} for query {:?}: {} of {} contacts",
            page.page,
            page.query,
            page.contacts.len(),
            page.total
        );
        page
    }

    /// Check a single email value for shape and uniqueness
    ///
    /// `owner` is the contact being edited, if any.
    pub async fn validate_email_only(&self, email: &str, owner: Option<&ContactId>) -> Result<()> {
        let store = self.store.read().await;
        match check_email(email, &store, owner) {
            Some(_) => Err(Error::InvalidEmail),
            None => Ok(()),
        }
    }

    /// Number of stored contacts
    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}
