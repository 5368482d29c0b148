// Job posting writes (create, update, delete) and the employer's view of them.
// Every successful write resets the search snapshot.

pub mod handlers;
pub mod manage;
