// Resume parsing LLM prompt templates.
// All prompts for the parsing module are defined here.

pub const RESUME_PARSE_SYSTEM: &str = r#"You are a resume parsing assistant. Extract structured information from resume text and return it in JSON format.
Always return valid JSON with the following structure:
{
  "name": "Full Name",
  "email": "email@example.com",
  "phone": "+1234567890",
  "skills": ["skill1", "skill2"],
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "duration": "Jan 2020 - Present",
      "description": "Brief description"
    }
  ],
  "education": [
    {
      "degree": "Degree Name",
      "institution": "University Name",
      "year": "2020"
    }
  ]
}
If any field is missing, use empty string or empty array. Be thorough."#;

pub const RESUME_PARSE_PROMPT_PREFIX: &str = "Parse this resume text:\n\n";

pub fn resume_parse_prompt(resume_text: &str) -> String {
    format!("{RESUME_PARSE_PROMPT_PREFIX}{resume_text}")
}
