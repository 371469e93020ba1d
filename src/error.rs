pub type Result<T> = std::result::Result<T, ParseError>;

/// Everything that can go wrong turning text into a graph. Layout and
/// rendering are total, so this is the only error type in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Line {line}: Unsupported diagram type or missing direction{}", suggestion_suffix(.suggestion))]
    UnsupportedDiagram {
        line: usize,
        suggestion: Option<&'static str>,
    },

    #[error("Line {line}: Invalid syntax: \"{text}\"{}", suggestion_suffix(.suggestion))]
    InvalidSyntax {
        line: usize,
        text: String,
        suggestion: Option<&'static str>,
    },
}

impl ParseError {
    /// 1-based source line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::EmptyInput => None,
            ParseError::UnsupportedDiagram { line, .. } | ParseError::InvalidSyntax { line, .. } => {
                Some(*line)
            }
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyInput => None,
            ParseError::UnsupportedDiagram { suggestion, .. }
            | ParseError::InvalidSyntax { suggestion, .. } => *suggestion,
        }
    }
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" (Suggestion: {s})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_message() {
        assert_eq!(ParseError::EmptyInput.to_string(), "Empty input");
        assert_eq!(ParseError::EmptyInput.line(), None);
    }

    #[test]
    fn unsupported_diagram_message_includes_suggestion() {
        let err = ParseError::UnsupportedDiagram {
            line: 1,
            suggestion: Some("Use 'flowchart LR'"),
        };
        assert_eq!(
            err.to_string(),
            "Line 1: Unsupported diagram type or missing direction (Suggestion: Use 'flowchart LR')"
        );
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn invalid_syntax_without_suggestion() {
        let err = ParseError::InvalidSyntax {
            line: 4,
            text: "A --- B".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Line 4: Invalid syntax: \"A --- B\"");
        assert_eq!(err.suggestion(), None);
    }
}
