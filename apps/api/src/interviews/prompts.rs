// LLM prompt constants for the Interview module. Both calls here expect plain
// text back, not JSON.

pub const SUMMARY_SYSTEM: &str =
    "You are a recruiting analyst condensing interview notes for a candidate \
    database. Write structured, scannable summaries. Respond with the summary \
    text only.";

/// Interview summary prompt template. Replace `{notes}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Analyze these interview notes and create a concise, professional summary for a recruiting database:

Interview Notes:
"{notes}"

Please provide:
1. Key strengths and skills demonstrated
2. Areas of concern or weakness
3. Cultural fit assessment
4. Overall recommendation (Strong Yes, Yes, Maybe, No, Strong No)
5. Next steps or follow-up actions

Format as a structured summary that a recruiter can quickly scan and understand."#;

pub const QUESTIONS_SYSTEM: &str =
    "You are an experienced interviewer preparing question lists. Respond with \
    a numbered list of questions only — no preamble, no commentary.";

/// Interview question generation template.
/// Replace `{job_title}` and `{candidate_background}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate 10 relevant interview questions for this scenario:

Job Title: {job_title}
Candidate Background: {candidate_background}

Please provide a mix of:
- Technical/role-specific questions (40%)
- Behavioral questions (30%)
- Cultural fit questions (20%)
- Situational questions (10%)

Return as a numbered list of questions only."#;
