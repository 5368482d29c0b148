// Shared prompt fragments. Each service that calls the model keeps its own
// prompts.rs alongside it and reuses these.

/// Instruction that enforces a bare JSON answer.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
