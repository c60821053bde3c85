use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use utoipa::ToSchema;

use super::codes::Code;

/// Owned, type-erased error used as the reason of a [`StructuredError`]
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Maximum width of the value column in the textual rendering
const MAX_COL_WIDTH: usize = 80;

/// Chainable error carrying an application code, a message, detail lines and
/// an optional underlying reason.
///
/// `Display` produces a tabular report meant for logs. The JSON form sent to
/// clients is [`ErrorPayload`].
#[derive(Debug)]
pub struct StructuredError {
    code: Code,
    message: String,
    details: Vec<String>,
    reason: Option<BoxError>,
}

impl StructuredError {
    /// Create a new error without details
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
            reason: None,
        }
    }

    /// Create a new error with detail lines, kept in the given order
    pub fn with_details<I>(code: Code, message: impl Into<String>, details: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            code,
            message: message.into(),
            details: details.into_iter().map(Into::into).collect(),
            reason: None,
        }
    }

    /// Attach the underlying reason, replacing any previous one
    pub fn wrap(mut self, err: impl Into<BoxError>) -> Self {
        self.reason = Some(err.into());
        self
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn reason(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.reason.as_deref()
    }

    /// The error that caused this one.
    ///
    /// Returns `self` when no reason is attached, otherwise the reason. Only a
    /// single level is unwrapped: call `cause` again on a nested
    /// `StructuredError` to go deeper.
    pub fn cause(&self) -> &(dyn Error + 'static) {
        match &self.reason {
            Some(reason) => &**reason as &(dyn Error + 'static),
            None => self as &(dyn Error + 'static),
        }
    }

    /// Wire rendering of this error
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code,
            message: self.message.clone(),
            details: (!self.details.is_empty()).then(|| self.details.clone()),
            reason: self.reason.as_ref().map(|reason| ReasonPayload {
                message: reason.to_string(),
            }),
        }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("code:", self.code.to_string()),
            ("message:", self.message.clone()),
        ];

        if !self.details.is_empty() {
            rows.push(("details:", self.details.join(", ")));
        }

        if let Some(reason) = &self.reason {
            rows.push(("reason:", reason.to_string()));
        }

        rows
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (label, value) in &rows {
            for (i, chunk) in wrap_text(value, MAX_COL_WIDTH).into_iter().enumerate() {
                let label = if i == 0 { *label } else { "" };
                let line = format!("{:<width$}  {}", label, chunk, width = label_width);
                lines.push(line.trim_end().to_string());
            }
        }

        f.write_str(&lines.join("\n"))
    }
}

impl Error for StructuredError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.reason.as_deref().map(|reason| reason as &(dyn Error + 'static))
    }
}

impl Serialize for StructuredError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_payload().serialize(serializer)
    }
}

/// JSON body describing a [`StructuredError`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorPayload {
    /// Application error code
    pub code: Code,
    /// Human-readable summary
    pub message: String,
    /// Supplementary explanation lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    /// Underlying cause, present only when one was attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonPayload>,
}

/// JSON body describing the reason of a [`StructuredError`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReasonPayload {
    /// Text of the underlying error
    pub message: String,
}

/// Split `text` into lines no wider than `width` characters.
///
/// Existing line breaks are kept, words are never split unless a single word
/// is wider than the column.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= width {
            out.push(line.to_string());
            continue;
        }

        let start = out.len();
        let mut current = String::new();
        let mut current_len = 0;

        for word in line.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }

            // Hard split words wider than the column
            let chars: Vec<char> = word.chars().collect();
            let mut pieces = chars.chunks(width).peekable();
            while let Some(piece) = pieces.next() {
                if pieces.peek().is_some() {
                    out.push(piece.iter().collect());
                } else {
                    current = piece.iter().collect();
                    current_len = piece.len();
                }
            }
        }

        if current_len > 0 {
            out.push(current);
        } else if out.len() == start {
            // Whitespace-only line
            out.push(String::new());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn leaf() -> BoxError {
        "Inner Error".into()
    }

    #[test]
    fn test_new_keeps_message_and_details() {
        let err = StructuredError::with_details(201, "Oh no!", ["Unexpected error"]);
        assert_eq!(err.code(), 201);
        assert_eq!(err.message(), "Oh no!");
        assert_eq!(err.details(), ["Unexpected error".to_string()]);
        assert!(err.reason().is_none());
    }

    #[test]
    fn test_details_keep_order() {
        let err = StructuredError::with_details(7, "Oh no!", ["first", "second", "third"]);
        assert_eq!(err.details(), ["first", "second", "third"]);
    }

    #[test]
    fn test_wrap_sets_reason() {
        let err = StructuredError::with_details(201, "Oh no!", ["Unexpected error"]).wrap(leaf());
        assert_eq!(err.reason().unwrap().to_string(), "Inner Error");
    }

    #[test]
    fn test_wrap_overwrites_reason() {
        let err = StructuredError::new(201, "Oh no!")
            .wrap("first")
            .wrap("second");
        assert_eq!(err.reason().unwrap().to_string(), "second");
    }

    #[test]
    fn test_cause_without_reason_is_self() {
        let err = StructuredError::with_details(201, "Oh no!", ["Unexpected error"]);
        let cause = err.cause().downcast_ref::<StructuredError>().unwrap();
        assert!(std::ptr::eq(cause, &err));
    }

    #[test]
    fn test_cause_unwraps_one_level() {
        let inner = StructuredError::new(202, "Madness").wrap(leaf());
        let outer = StructuredError::with_details(201, "Oh no!", ["Unexpected error"]).wrap(inner);

        let cause = outer
            .cause()
            .downcast_ref::<StructuredError>()
            .expect("cause should be the inner structured error");
        assert_eq!(cause.code(), 202);
        assert_eq!(cause.message(), "Madness");

        // A second call reaches the leaf
        assert_eq!(cause.cause().to_string(), "Inner Error");
    }

    #[test]
    fn test_source_exposes_reason() {
        let err = StructuredError::new(1, "Oh no!").wrap(leaf());
        assert_eq!(err.source().unwrap().to_string(), "Inner Error");
        assert!(StructuredError::new(1, "Oh no!").source().is_none());
    }

    #[test]
    fn test_display_all_rows() {
        let err = StructuredError::with_details(201, "Oh no!", ["Unexpected error"]).wrap(leaf());
        let expected = [
            "code:     201",
            "message:  Oh no!",
            "details:  Unexpected error",
            "reason:   Inner Error",
        ]
        .join("\n");
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_display_omits_empty_rows() {
        let err = StructuredError::new(1, "Oh no!");
        assert_eq!(err.to_string(), "code:     1\nmessage:  Oh no!");
    }

    #[test]
    fn test_display_joins_details() {
        let err = StructuredError::with_details(1, "Oh no!", ["a", "b"]);
        assert!(err.to_string().contains("details:  a, b"));
        assert!(!err.to_string().contains("reason:"));
    }

    #[test]
    fn test_display_wraps_long_values() {
        let message = "word ".repeat(30);
        let err = StructuredError::new(1, message.trim_end());
        let rendered = err.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("message:  word"));
        assert!(lines[2].starts_with("          word"));
        for line in &lines {
            assert!(line.chars().count() <= 10 + MAX_COL_WIDTH);
        }
    }

    #[test]
    fn test_display_keeps_blank_long_message_row() {
        let err = StructuredError::new(1, " ".repeat(90));
        let rendered = err.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines, ["code:     1", "message:"]);
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        let word = "x".repeat(170);
        let lines = wrap_text(&word, 80);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 80);
        assert_eq!(lines[2].len(), 10);
    }

    #[test]
    fn test_payload_omits_empty_fields() {
        let err = StructuredError::new(1, "Oh no!");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], 1);
        assert_eq!(json["message"], "Oh no!");
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("details"));
        assert!(!obj.contains_key("reason"));
    }

    #[test]
    fn test_payload_includes_details_and_reason() {
        let err = StructuredError::with_details(1, "Oh no!", ["a", "b"]).wrap(leaf());
        let json: Value = serde_json::to_value(err.to_payload()).unwrap();

        assert_eq!(json["details"], serde_json::json!(["a", "b"]));
        assert_eq!(json["reason"]["message"], "Inner Error");
    }
}
