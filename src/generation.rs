//! Card generation through an external text service.
//!
//! The service is a black box that answers a [`GenerationRequest`] with text.
//! That text is expected to hold a JSON array of `{front, back, topic, subtopic}`
//! objects, possibly wrapped in a markdown code block.

use crate::error::GenerationError;
use crate::models::CardDraft;
use crate::models::flashcard::DEFAULT_TOPIC;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CARD_COUNT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub subtopic: String,
    pub count: usize,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            subtopic: DEFAULT_TOPIC.to_string(),
            count: DEFAULT_CARD_COUNT,
        }
    }

    pub fn with_subtopic(mut self, subtopic: impl Into<String>) -> Self {
        self.subtopic = subtopic.into();
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// A service that writes flashcard content for a topic.
pub trait CardGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

impl<F> CardGenerator for F
where
    F: Fn(&GenerationRequest) -> Result<String, GenerationError>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self(request)
    }
}

/// Parses a generator response into drafts.
///
/// Missing topics are filled from the request. Entries with neither a
/// front nor a back are dropped.
pub fn parse_generated_cards(
    response: &str,
    request: &GenerationRequest,
) -> Result<Vec<CardDraft>, GenerationError> {
    let body = strip_code_fences(response);

    let start = body.find('[');
    let end = body.rfind(']');
    let array = match (start, end) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => {
            return Err(GenerationError::MalformedResponse(
                "no JSON array in response".to_string(),
            ));
        }
    };

    let drafts: Vec<CardDraft> = serde_json::from_str(array)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    Ok(drafts
        .into_iter()
        .filter(|draft| !draft.is_blank())
        .map(|mut draft| {
            if draft.topic.as_deref().is_none_or(|t| t.trim().is_empty()) {
                draft.topic = Some(request.topic.clone());
            }
            if draft.subtopic.as_deref().is_none_or(|s| s.trim().is_empty()) {
                draft.subtopic = Some(request.subtopic.clone());
            }
            draft
        })
        .collect())
}

/// Returns the contents of markdown code blocks, or the input when there are none.
fn strip_code_fences(response: &str) -> String {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut in_block = false;

    for line in response.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            if in_block {
                blocks.push(std::mem::take(&mut current));
            }
            in_block = !in_block;
            continue;
        }
        if in_block {
            current.push_str(line);
            current.push('\n');
        }
    }

    // Unclosed block at the end of a truncated response
    if in_block && !current.is_empty() {
        blocks.push(current);
    }

    if blocks.is_empty() {
        response.to_string()
    } else {
        blocks.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new("Biology").with_subtopic("Cells")
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = r#"Here are your flashcards:

```json
[
  {"front": "Mitochondria", "back": "Powerhouse of the cell", "topic": "Biology", "subtopic": "Organelles"},
  {"front": "Ribosome", "back": "Builds proteins"}
]
```
Good luck!"#;

        let drafts = parse_generated_cards(response, &request()).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].subtopic.as_deref(), Some("Organelles"));
        assert_eq!(drafts[1].topic.as_deref(), Some("Biology"));
        assert_eq!(drafts[1].subtopic.as_deref(), Some("Cells"));
    }

    #[test]
    fn test_parse_bare_array_with_prose() {
        let response = r#"Sure! [{"front": "DNA", "back": "Genetic material"}] Hope this helps."#;
        let drafts = parse_generated_cards(response, &request()).unwrap();
        assert_eq!(drafts, vec![CardDraft::new("DNA", "Genetic material").with_topic("Biology", "Cells")]);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let response = r#"[{"front": "", "back": " "}, {"front": "Cell", "back": "Unit of life"}]"#;
        let drafts = parse_generated_cards(response, &request()).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].front, "Cell");
    }

    #[test]
    fn test_unclosed_fence() {
        let response = "```json\n[{\"front\": \"Nucleus\", \"back\": \"Holds DNA\"}]";
        let drafts = parse_generated_cards(response, &request()).unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_malformed_responses() {
        assert!(matches!(
            parse_generated_cards("I cannot help with that.", &request()),
            Err(GenerationError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_generated_cards("[{\"front\": 1}]", &request()),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_closure_generator() {
        let generator = |req: &GenerationRequest| -> Result<String, GenerationError> {
            Ok(format!(r#"[{{"front": "{}", "back": "x"}}]"#, req.topic))
        };
        let text = generator.generate(&request()).unwrap();
        assert!(text.contains("Biology"));
    }
}
