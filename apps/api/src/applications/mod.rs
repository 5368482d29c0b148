// Candidate side of the board: applications, saved jobs and the candidate
// dashboard, plus the employer's status updates on received applications.

pub mod handlers;
pub mod saved;
pub mod store;
pub mod tracking;

#[cfg(test)]
pub(crate) mod testing;
