//! Fixed-schema level suggestions
//!
//! A suggestion is a JSON object `{"suggestedMoves": n, "suggestedTargetScore": n}`.
//! Text producers tend to wrap it in prose or code fences, so the outermost
//! `{...}` span is extracted before decoding.

use serde::Deserialize;

use crate::error::SuggestionError;
use crate::level::LevelParams;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Suggestion {
    suggested_moves: u32,
    suggested_target_score: u32,
}

/// Parse a suggestion into level parameters, rejecting out-of-range values
pub fn parse_suggestion(text: &str) -> Result<LevelParams, SuggestionError> {
    let start = text.find('{').ok_or(SuggestionError::MissingObject)?;
    let end = text.rfind('}').ok_or(SuggestionError::MissingObject)?;
    if end < start {
        return Err(SuggestionError::MissingObject);
    }

    let suggestion: Suggestion = serde_json::from_str(&text[start..=end])?;
    LevelParams::checked(suggestion.suggested_moves, suggestion.suggested_target_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let params = parse_suggestion(r#"{"suggestedMoves": 24, "suggestedTargetScore": 2500}"#)
            .unwrap();
        assert_eq!(params.moves, 24);
        assert_eq!(params.target_score, 2500);
    }

    #[test]
    fn test_parse_wrapped_object() {
        let text = "Here you go:\n```json\n{\"suggestedMoves\": 18, \"suggestedTargetScore\": 3100}\n```";
        assert_eq!(parse_suggestion(text).unwrap().moves, 18);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            parse_suggestion("no idea"),
            Err(SuggestionError::MissingObject)
        ));
        assert!(matches!(
            parse_suggestion("} backwards {"),
            Err(SuggestionError::MissingObject)
        ));
        assert!(matches!(
            parse_suggestion(r#"{"suggestedMoves": "many"}"#),
            Err(SuggestionError::Malformed(_))
        ));
        assert!(matches!(
            parse_suggestion(r#"{"suggestedMoves": -3, "suggestedTargetScore": 100}"#),
            Err(SuggestionError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_moves() {
        assert!(matches!(
            parse_suggestion(r#"{"suggestedMoves": 50, "suggestedTargetScore": 100}"#),
            Err(SuggestionError::MovesOutOfRange(50))
        ));
    }
}
