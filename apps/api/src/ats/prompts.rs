// Prompt templates for the two model calls in an analysis run.
// Placeholders: {resume_text}, {jd_text}. Values are inserted verbatim: no escaping,
// truncation, or length cap.

/// ATS match analysis. The model answers with a JSON object.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"
You are an advanced ATS (Application Tracking System) with expertise in matching tech resumes to job descriptions.
Analyze the resume and JD, and provide:
1. Match percentage
2. List of missing keywords
3. Suggested profile summary to enhance alignment.

Resume:
{resume_text}

Job Description:
{jd_text}

Respond in JSON format with:
{"JD Match":"%","MissingKeywords":[],"Profile Summary":""}
"#;

/// Resume rewrite. The model answers with plain text in the layout the formatter expects.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"
You are a professional resume writer. Based on the given job description and existing resume text, update the resume to improve its match. Ensure it retains a professional tone and incorporates missing keywords from the JD.
Also, rewrite or add a Projects section with 2–3 relevant project titles and descriptions tailored to the job.
Maintain formatting with bold headings in CAPITAL LETTERS, bullet points (•), and horizontal rules (like "—————") separating sections.
Include a heading at the top with the candidate's name and contact info.
Include a LinkedIn and GitHub section if applicable.

Existing Resume:
{resume_text}

Job Description:
{jd_text}

Return the improved resume in plain text format.
"#;

pub fn analysis_prompt(resume_text: &str, jd_text: &str) -> String {
    render_template(ANALYSIS_PROMPT_TEMPLATE, resume_text, jd_text)
}

pub fn rewrite_prompt(resume_text: &str, jd_text: &str) -> String {
    render_template(REWRITE_PROMPT_TEMPLATE, resume_text, jd_text)
}

// Single pass over the template, so placeholder-like text inside the inputs is left alone.
fn render_template(template: &str, resume_text: &str, jd_text: &str) -> String {
    let vars = [("{resume_text}", resume_text), ("{jd_text}", jd_text)];
    let mut out = String::with_capacity(template.len() + resume_text.len() + jd_text.len());
    let mut rest = template;

    while let Some((at, key, value)) = vars
        .iter()
        .filter_map(|(key, value)| rest.find(key).map(|at| (at, *key, *value)))
        .min_by_key(|(at, _, _)| *at)
    {
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + key.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_interpolates_both_inputs() {
        let prompt = analysis_prompt("RESUME BODY", "JD BODY");
        assert!(prompt.contains("Resume:\nRESUME BODY\n"));
        assert!(prompt.contains("Job Description:\nJD BODY\n"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{jd_text}"));
    }

    #[test]
    fn test_analysis_prompt_requests_json_keys() {
        let prompt = analysis_prompt("r", "j");
        assert!(prompt.contains(r#"{"JD Match":"%","MissingKeywords":[],"Profile Summary":""}"#));
    }

    #[test]
    fn test_rewrite_prompt_names_structural_conventions() {
        let prompt = rewrite_prompt("r", "j");
        assert!(prompt.contains("bullet points (•)"));
        assert!(prompt.contains("horizontal rules"));
        assert!(prompt.contains("CAPITAL LETTERS"));
        assert!(prompt.contains("Projects section"));
        assert!(prompt.contains("Existing Resume:\nr\n"));
    }

    #[test]
    fn test_placeholder_text_in_inputs_is_not_expanded() {
        let prompt = analysis_prompt("I wrote {jd_text} once", "real jd");
        assert!(prompt.contains("I wrote {jd_text} once"));
        assert_eq!(prompt.matches("real jd").count(), 1);
    }

    #[test]
    fn test_inputs_are_not_truncated_or_escaped() {
        let resume = "x".repeat(50_000) + "\"<tag>\"";
        let prompt = rewrite_prompt(&resume, "jd");
        assert!(prompt.contains(&resume));
    }
}
