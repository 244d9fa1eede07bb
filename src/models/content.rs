use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One element of a multimodal content sequence, tagged the way the wire
/// format expects it
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }

    /// Get the text if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Message content at rest: plain text, or an ordered part sequence for
/// models that accept mixed text/image input
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Get the plain text if this is a Text variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// First text carried by the content: the plain text itself, or the
    /// first text-typed part of a part sequence
    pub fn first_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Parts(parts) => parts.iter().find_map(|part| part.as_text()),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, MessageContent::Text(_))
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<ContentPart>> for MessageContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        MessageContent::Parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_part_serialization() {
        let part = ContentPart::text("hello");
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({"type": "text", "text": "hello"})
        );

        let part = ContentPart::image_url("data:image/png;base64,xyz");
        assert_eq!(
            serde_json::to_value(&part).unwrap(),
            json!({"type": "image_url", "image_url": {"url": "data:image/png;base64,xyz"}})
        );
    }

    #[test]
    fn test_first_text() {
        let content = MessageContent::from("plain");
        assert_eq!(content.first_text(), Some("plain"));

        let content = MessageContent::from(vec![
            ContentPart::image_url("data:..."),
            ContentPart::text("caption"),
        ]);
        assert_eq!(content.first_text(), Some("caption"));

        let content = MessageContent::from(vec![ContentPart::image_url("data:...")]);
        assert_eq!(content.first_text(), None);
    }

    #[test]
    fn test_untagged_deserialization() {
        let content: MessageContent = serde_json::from_value(json!("hi")).unwrap();
        assert!(content.is_text());

        let content: MessageContent =
            serde_json::from_value(json!([{"type": "text", "text": "hi"}])).unwrap();
        assert!(!content.is_text());
        assert_eq!(content.first_text(), Some("hi"));
    }
}
