//! Best-effort structured view of the analysis response.
//!
//! The raw model text is always what the user sees; this parse only feeds the
//! summary cards on the page, so failure is logged and otherwise ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::strip_json_fences;

/// Match score as the model wrote it: usually `"85%"`, sometimes a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchScore {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsFeedback {
    #[serde(rename = "JD Match")]
    pub jd_match: MatchScore,
    #[serde(rename = "MissingKeywords", default)]
    pub missing_keywords: Vec<String>,
    #[serde(rename = "Profile Summary", default)]
    pub profile_summary: String,
}

/// Parses the analysis text, tolerating code fences and prose around the JSON object.
pub fn parse_feedback(raw: &str) -> Option<AtsFeedback> {
    let text = strip_json_fences(raw);
    if let Ok(feedback) = serde_json::from_str(text) {
        return Some(feedback);
    }

    let object = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            debug!("Analysis response contains no JSON object");
            return None;
        }
    };
    match serde_json::from_str(object) {
        Ok(feedback) => Some(feedback),
        Err(e) => {
            debug!("Analysis response is not the expected JSON shape: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_json() {
        let raw = r#"{"JD Match":"78%","MissingKeywords":["Kubernetes","gRPC"],"Profile Summary":"Backend engineer."}"#;
        let feedback = parse_feedback(raw).unwrap();
        assert_eq!(feedback.jd_match, MatchScore::Text("78%".to_string()));
        assert_eq!(feedback.missing_keywords, vec!["Kubernetes", "gRPC"]);
        assert_eq!(feedback.profile_summary, "Backend engineer.");
    }

    #[test]
    fn test_parses_fenced_json_with_numeric_score() {
        let raw = "```json\n{\"JD Match\": 64, \"MissingKeywords\": []}\n```";
        let feedback = parse_feedback(raw).unwrap();
        assert_eq!(feedback.jd_match, MatchScore::Number(64.0));
        assert!(feedback.missing_keywords.is_empty());
        assert_eq!(feedback.profile_summary, "");
    }

    #[test]
    fn test_parses_json_surrounded_by_prose() {
        let raw = "Here is the analysis:\n{\"JD Match\":\"90%\",\"MissingKeywords\":[],\"Profile Summary\":\"x\"}\nGood luck!";
        assert!(parse_feedback(raw).is_some());
    }

    #[test]
    fn test_non_json_yields_none() {
        assert!(parse_feedback("The candidate is a strong match.").is_none());
        assert!(parse_feedback("{\"unexpected\": true}").is_none());
    }
}
