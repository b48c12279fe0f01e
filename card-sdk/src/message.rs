use super::*;

/// A file attached to a message. Only the media type matters to composition,
/// which uses it to decide whether the attachment can become a card image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "u", alias = "url")]
    pub url: SmolStr,

    #[serde(
        rename = "m",
        alias = "media_type",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub media_type: Option<SmolStr>,
}

impl Attachment {
    pub fn new(url: impl Into<SmolStr>) -> Attachment {
        Attachment {
            url: url.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<SmolStr>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Whether the platform would render this attachment inline as an image.
    pub fn is_image(&self) -> bool {
        matches!(self.media_type, Some(ref media_type) if media_type.starts_with("image"))
    }
}

/// A received wire message, as surfaced by the platform client. Composition
/// only ever reads these fields; sending is someone else's problem.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Card>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}
