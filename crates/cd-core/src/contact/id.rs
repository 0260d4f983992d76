//! Identifier allocation for new contacts

use crate::contact::ContactId;

/// Source of identifiers for newly created contacts
///
/// Implementations must never hand out the same identifier twice.
pub trait IdAllocator: Send + Sync {
    /// Produce a fresh identifier
    fn allocate(&self) -> ContactId;
}

/// Random 128-bit identifiers (UUID v4)
///
/// Allocation needs no shared counter, so concurrent creations cannot race.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn allocate(&self) -> ContactId {
        ContactId::new_v4()
    }
}
