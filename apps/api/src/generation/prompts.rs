// LLM prompt constants for resume generation and tailoring.
// The JSON-only fragment comes from llm_client::prompts and is appended at
// call time.

/// Sampling temperature for both generation and tailoring.
pub const RESUME_TEMPERATURE: f32 = 0.3;

/// Role and schema rules shared by generation and tailoring.
pub const RESUME_SYSTEM: &str = r#"You are a professional resume content generation agent.

Your task is to generate resume CONTENT ONLY. You MUST follow all rules strictly.

CRITICAL RULES
1. Follow the EXACT JSON schema provided.
2. Do NOT add, remove, or rename any fields.
3. Do NOT include formatting, styling, layout, colors, icons, or alignment instructions.
4. Do NOT invent skills or projects. Use ONLY skills and projects provided in the input.
5. Select ONLY skills and projects that are RELEVANT to the job role or job description.
6. Bullet points must be concise, professional, and achievement-oriented, with strong
   action verbs and measurable impact where possible.
7. Keep the resume ATS-friendly and recruiter-ready.

RESUME JSON SCHEMA (STRICT - DO NOT DEVIATE)
{
  "header": {"name": "", "title": ""},
  "contact": {"phone": "", "email": "", "address": "", "website": "", "linkedin": ""},
  "summary": "",
  "skills": [{"name": "", "level": 0}],
  "projects": [{"title": "", "tech_stack": [], "points": []}],
  "experience": [{"role": "", "company": "", "location": "", "duration": "", "points": []}],
  "education": [{"degree": "", "institution": "", "year": "", "details": ""}]
}

OUTPUT REQUIREMENTS
- Skill level must be an integer from 0 to 100.
- Do NOT repeat content across sections.
- If experience is limited, emphasize projects strongly."#;

/// Generation prompt template.
/// Replace: {target_role}, {job_description}, {name}, {email}, {phone},
///          {address}, {website}, {linkedin}, {career_goal}, {skills_json},
///          {projects_json}, {experience_json}, {education_json}
pub const GENERATE_PROMPT_TEMPLATE: &str = r#"Generate a professional resume following the STRICT JSON schema.

## Target Role
{target_role}

## Job Description
{job_description}

## User Profile
- Full Name: {name}
- Email: {email}
- Phone: {phone}
- Location/Address: {address}
- Website: {website}
- LinkedIn: {linkedin}
- Career Goal: {career_goal}

## Available Skills (SELECT ONLY RELEVANT ONES)
{skills_json}

## Available Projects (SELECT ONLY RELEVANT ONES)
{projects_json}

## Experience History
{experience_json}

## Education
{education_json}

INSTRUCTIONS
1. Set header.name to the user's full name.
2. Set header.title to the target role: "{target_role}".
3. Write a compelling 2-3 sentence professional summary.
4. Select ONLY skills relevant to {target_role} (level as a 0-100 integer).
5. Select ONLY projects that demonstrate {target_role} competencies.
6. Rewrite experience bullet points with strong action verbs.
7. Output ONLY the JSON following the STRICT schema.

Generate the resume JSON now:"#;

/// Placeholder used when no job description was supplied.
pub const NO_JOB_DESCRIPTION: &str = "Not provided - tailor to target role";

/// Tailoring prompt template.
/// Replace: {resume_json}, {target_role}, {target_company}, {job_description}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Tailor this existing resume to the job description below.

CURRENT RESUME
{resume_json}

TARGET JOB
Role: {target_role}
Company: {target_company}
Description: {job_description}

INSTRUCTIONS
1. Keep the same contact information.
2. Update header.title to match the target role.
3. Rewrite the summary to emphasize relevant experience for this specific role.
4. Reorder and emphasize skills that match the job description (keep level as 0-100).
5. Rewrite experience bullet points to highlight relevant achievements.
6. Prioritize projects that demonstrate required competencies.
7. Remove or de-emphasize irrelevant content.
8. Output ONLY the JSON, following the STRICT schema.

Generate the tailored resume JSON:"#;

/// Placeholder used when no target company was supplied.
pub const NO_TARGET_COMPANY: &str = "Not specified";

/// Fills `{key}` placeholders in a single pass over `template`.
///
/// Substituted values are never rescanned, so user text that happens to
/// contain `{name}` or similar is copied through unchanged. Braces that do
/// not name a known key (the JSON schema sample) are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
