//! Substring search and page windowing over the contact listing

use crate::contact::{Contact, PageWindow};

/// Default number of contacts per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter contacts by a case-sensitive substring query
///
/// An empty query keeps everything. Order is preserved.
pub fn search(contacts: &[Contact], query: &str) -> Vec<Contact> {
    if query.is_empty() {
        return contacts.to_vec();
    }
    contacts.iter().filter(|c| c.matches(query)).cloned().collect()
}

/// Take the `page`-th window of `page_size` items
///
/// Pages at or below zero give the first window. The last window may be
/// short, and a page past the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: usize) -> Vec<T> {
    window_bounds(items.len(), page, page_size)
        .map(|(start, end)| items[start..end].to_vec())
        .unwrap_or_default()
}

/// Search, then paginate, and describe the result for rendering
pub fn window(contacts: &[Contact], query: &str, page: i64, page_size: usize) -> PageWindow {
    let matched = search(contacts, query);
    let page = page.max(0);
    let total = matched.len();
    let page_contacts = paginate(&matched, page, page_size);

    let has_next = (page as u64)
        .checked_add(1)
        .and_then(|next| next.checked_mul(page_size as u64))
        .is_some_and(|shown| shown < total as u64);

    PageWindow {
        contacts: page_contacts,
        query: query.to_string(),
        page,
        page_size,
        total,
        has_previous: page > 0,
        has_next,
    }
}

fn window_bounds(len: usize, page: i64, page_size: usize) -> Option<(usize, usize)> {
    let page = usize::try_from(page.max(0)).ok()?;
    let start = page.checked_mul(page_size)?;
    if start >= len {
        return None;
    }
    let end = start.saturating_add(page_size).min(len);
    Some((start, end))
}
