// Requirement extraction prompt for job descriptions.

pub const REQUIREMENTS_MAX_TOKENS: u32 = 2000;

pub const REQUIREMENTS_PROMPT: &str = r#"Analyze the following job description and extract structured information.
Return a JSON object with these fields:
- required_skills: List of required technical and soft skills
- preferred_skills: List of preferred/nice-to-have skills
- min_years_experience: Minimum years of experience required (number or null)
- education_requirements: List of education requirements
- key_responsibilities: List of main job responsibilities
- must_have_qualifications: Critical qualifications

Job Description:
{description}

Return only valid JSON, no additional text."#;
