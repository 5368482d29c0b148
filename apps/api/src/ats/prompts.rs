/// Job descriptions are cut to this many characters before prompting.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 2000;

pub const ATS_ROLE: &str = "You are an expert ATS (Applicant Tracking System) and Career Coach.\n\
    Analyze the provided resume against the job description (if any).";

pub const NO_JOB_DESCRIPTION: &str =
    "No specific job description provided. Analyze for general software engineering roles.";

/// Expected answer shape. Mirrors `AtsAnalysis`.
pub const ATS_OUTPUT_FORMAT: &str = r#"Provide the output in the following JSON format ONLY:
{
    "score": <number 0-100>,
    "summary": "<short summary of the resume quality>",
    "missingSkills": ["<skill1>", "<skill2>"],
    "suggestions": ["<actionable suggestion 1>", "<actionable suggestion 2>", "<actionable suggestion 3>"]
}"#;
