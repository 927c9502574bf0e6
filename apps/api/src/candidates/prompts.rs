// Profile parsing prompt for raw LinkedIn profile text or HTML.

pub const PROFILE_MAX_TOKENS: u32 = 3000;

/// Only this many characters of the raw profile are sent to the model.
pub const PROFILE_INPUT_LIMIT: usize = 4000;

pub const PROFILE_PARSE_PROMPT: &str = r#"Parse this LinkedIn profile into structured data.

Profile Content:
{profile_text}

Extract and return JSON with:
- name: Full name
- current_title: Current job title
- current_company: Current employer
- location: Location
- headline: LinkedIn headline
- about: About/summary section
- experience: List of work experiences with {title, company, duration, description}
- education: List of education with {school, degree, field, year}
- skills: List of skills mentioned
- certifications: List of certifications (if any)

Return only valid JSON."#;
