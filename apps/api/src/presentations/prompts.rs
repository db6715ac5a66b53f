// LLM prompt constants for presentation generation.
// The JSON-only output rules come from llm_client::prompts and are appended
// to the system prompt at call time.

/// System prompt for presentation generation.
pub const PRESENTATION_SYSTEM: &str =
    "You are an expert technical recruiter writing client-facing candidate \
    presentations. You turn a candidate profile into professional, compelling \
    presentation content tailored to recruiting.";

/// Presentation content prompt template.
/// Replace: {name}, {current_position}, {current_company}, {location},
///          {skills}, {experience_years}, {email}, {phone}, {linkedin},
///          {salary_expectation}, {role_block}
pub const PRESENTATION_PROMPT_TEMPLATE: &str = r#"Create a professional candidate presentation for recruiting purposes:

Candidate Information:
- Name: {name}
- Current Position: {current_position}
- Current Company: {current_company}
- Location: {location}
- Skills: {skills}
- Experience: {experience_years} years
- Email: {email}
- Phone: {phone}
- LinkedIn: {linkedin}
- Salary Expectation: {salary_expectation}

{role_block}Generate a JSON object with this structure:
{
  "summary": "2-3 sentence professional summary highlighting key strengths",
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "duration": "Start - End",
      "description": "Role description",
      "achievements": ["Achievement 1", "Achievement 2"]
    }
  ],
  "skills": [
    {
      "category": "Technical Skills",
      "skills": ["skill1", "skill2"],
      "level": "Advanced"
    }
  ],
  "achievements": ["Notable achievement 1", "Notable achievement 2"],
  "education": [
    {
      "degree": "Degree Name",
      "institution": "University Name",
      "year": "Year",
      "gpa": "GPA if notable"
    }
  ],
  "recommendations": ["Why this candidate is a good fit"],
  "availability": "Available immediately / 2 weeks notice / etc"
}

"level" must be one of: Beginner, Intermediate, Advanced, Expert.

Make it professional, compelling, and tailored to recruiting. If information is missing, create realistic professional content based on the role and experience level."#;
