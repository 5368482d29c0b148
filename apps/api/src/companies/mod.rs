// Company directory derived from the postings themselves. There is no
// separate companies table: a company exists while it has jobs.

pub mod directory;
pub mod handlers;
