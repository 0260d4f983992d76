//! Ordered in-memory contact storage

use tracing::{debug, error};

use crate::contact::{Contact, ContactFields, ContactId};
use crate::{Error, Result};

/// Authoritative, insertion-ordered collection of contacts
///
/// The store itself is not synchronised; [`crate::ContactDirectory`] owns it
/// behind a lock and is the only way callers reach it.
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contact at the end
    ///
    /// A duplicate identifier means the allocator is broken.
    pub fn insert(&mut self, contact: Contact) -> Result<()> {
        if self.position(&contact.id).is_some() {
            error!("Identifier collision on insert: {}", contact.id);
            return Err(Error::DuplicateId(contact.id));
        }
        debug!("Inserting contact {} at position {}", contact.id, self.contacts.len());
        self.contacts.push(contact);
        Ok(())
    }

    /// Look up a contact by identifier
    pub fn find_by_id(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Overwrite every field except the identifier, keeping the position
    pub fn replace(&mut self, id: &ContactId, fields: ContactFields) -> Option<Contact> {
        let contact = self.contacts.iter_mut().find(|c| &c.id == id)?;
        contact.overwrite(fields);
        Some(contact.clone())
    }

    /// Remove the contact with the given identifier
    pub fn delete(&mut self, id: &ContactId) -> Option<Contact> {
        let index = self.position(id)?;
        Some(self.contacts.remove(index))
    }

    /// All contacts in insertion order
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Whether another contact already uses `email` (exact match)
    pub fn email_in_use(&self, email: &str, except: Option<&ContactId>) -> bool {
        self.contacts
            .iter()
            .any(|c| c.email == email && Some(&c.id) != except)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn position(&self, id: &ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| &c.id == id)
    }
}
