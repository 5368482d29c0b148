//! Job search: the suggestion snapshot cache, autocomplete ranking, the
//! committed-search filter and the per-session suggestion debouncer.
//!
//! Suggestions read from `cache::SnapshotCache` (bounded, time-limited copy of
//! the store). Committed searches bypass the cache and filter the live,
//! newest-first collection so listings always reflect fresh postings.

pub mod cache;
pub mod debounce;
pub mod filter;
pub mod handlers;
pub mod similar;
pub mod store;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;
