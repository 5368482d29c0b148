// Company logo enrichment for existing postings (admin maintenance task).

pub mod handlers;
pub mod logos;
