// Resume (ATS) scoring: one completion call per analysis, no retries.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
