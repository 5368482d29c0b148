// Candidate profiles: one JSONB document per user, replaced on every save.

pub mod editor;
pub mod handlers;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
