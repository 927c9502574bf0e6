// Candidate-fit analysis prompt.

pub const ANALYSIS_MAX_TOKENS: u32 = 3000;

pub const ANALYSIS_PROMPT: &str = r#"You are an expert technical recruiter. Analyze this candidate's fit for the job.

JOB DETAILS:
Title: {job_title}
Company: {job_company}
Description: {job_description}
Requirements: {job_requirements}

CANDIDATE PROFILE:
{candidate_profile}

Provide a detailed analysis in JSON format with:
1. match_score: Overall fit score from 0-100
2. summary: Brief 2-3 sentence overview of the candidate's fit
3. strengths: List of 3-5 key strengths that make them a good fit
4. concerns: List of 0-4 potential concerns or gaps (or empty list if none)
5. skill_match: Percentage of required skills the candidate has (0-100)
6. experience_match: How well their experience aligns (0-100)
7. recommendation: "strong_fit", "moderate_fit", "weak_fit", or "poor_fit"
8. next_steps: Recommended actions (e.g., "Schedule interview", "Request additional info", "Pass")

Be thorough but concise. Return only valid JSON."#;
