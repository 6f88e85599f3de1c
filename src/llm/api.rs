use log::error;
use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    deck_prompt,
    evaluation_prompt,
};
use crate::core::{
    Assessment,
    Feedback,
    SpeakdeckError,
};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

async fn generate_content(
    model: &str,
    api_key: &str,
    prompt: String,
    json_reply: bool,
) -> Result<String, SpeakdeckError> {
    let body = GenerateContentRequest {
        contents: vec![Content { role: "user", parts: vec![Part { text: prompt }] }],
        generation_config: json_reply
            .then_some(GenerationConfig { response_mime_type: "application/json" }),
    };

    let url = format!("{}/{}:generateContent", API_BASE, model);
    let response = Client::new()
        .post(&url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("HTTP {}", status),
        };
        return Err(SpeakdeckError::ServiceError(message));
    }

    let reply: GenerateContentResponse = response.json().await?;
    let text: String = reply
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(SpeakdeckError::ServiceError(
            "The model response was empty or blocked.".to_string(),
        ));
    }

    Ok(text)
}

/// Ask the model for `Term: Definition` lines on `topic`. Returns the raw
/// completion text for the deck orchestrator to parse.
pub async fn generate_flashcards(
    model: &str,
    api_key: &str,
    topic: &str,
    max_cards: u32,
) -> Result<String, SpeakdeckError> {
    generate_content(model, api_key, deck_prompt(topic, max_cards), false).await
}

/// Grade a spoken answer against a card.
///
/// Always produces a `Feedback`: an unparsable reply or a failed call is
/// absorbed into a synthesized `incorrect` grade so no submitted answer ever
/// leaves its card without feedback.
pub async fn evaluate_answer(
    model: &str,
    api_key: &str,
    term: &str,
    definition: &str,
    answer: &str,
) -> Feedback {
    let prompt = evaluation_prompt(term, definition, answer);
    match generate_content(model, api_key, prompt, true).await {
        Ok(text) => parse_evaluation(&text),
        Err(e) => {
            error!("Answer evaluation failed: {}", e);
            Feedback {
                assessment: Assessment::Incorrect,
                explanation: format!("Evaluation error: {}", e),
            }
        }
    }
}

fn parse_evaluation(text: &str) -> Feedback {
    match serde_json::from_str::<Feedback>(text.trim()) {
        Ok(feedback) => feedback,
        Err(e) => {
            error!("{} (raw: {:?})", SpeakdeckError::MalformedResponse(e.to_string()), text);
            let truncated: String = text.trim().chars().take(100).collect();
            Feedback {
                assessment: Assessment::Incorrect,
                explanation: format!("Couldn't parse evaluation. Raw: {}", truncated),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_reply() {
        let feedback = parse_evaluation(
            r#" {"assessment": "partially_correct", "explanation": "Missed the membrane."} "#,
        );
        assert_eq!(feedback.assessment, Assessment::PartiallyCorrect);
        assert_eq!(feedback.explanation, "Missed the membrane.");
    }

    #[test]
    fn unparsable_reply_synthesizes_incorrect_feedback() {
        let feedback = parse_evaluation("I think that was pretty good!");
        assert_eq!(feedback.assessment, Assessment::Incorrect);
        assert!(feedback.explanation.starts_with("Couldn't parse evaluation."));
        assert!(feedback.explanation.contains("pretty good"));
    }

    #[test]
    fn unknown_assessment_value_synthesizes_incorrect_feedback() {
        let feedback =
            parse_evaluation(r#"{"assessment": "excellent", "explanation": "Great job"}"#);
        assert_eq!(feedback.assessment, Assessment::Incorrect);
        assert!(!feedback.explanation.is_empty());
    }

    #[test]
    fn long_garbage_is_truncated_in_the_fallback() {
        let raw = "x".repeat(500);
        let feedback = parse_evaluation(&raw);
        assert_eq!(feedback.assessment, Assessment::Incorrect);
        assert!(feedback.explanation.len() < 200);
    }
}
