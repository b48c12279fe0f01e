use crate::limits;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot send more than {} characters in a single message", limits::MAX_CONTENT_LEN)]
    ContentTooLong,

    #[error("cannot send more than {} cards in a single message", limits::MAX_CARDS)]
    TooManyCards,

    #[error("cannot send more than {} attachments in a single message", limits::MAX_ATTACHMENTS)]
    TooManyAttachments,

    #[error("cannot set an image on a multi-image group directly, use images instead")]
    AmbiguousImage,

    #[error("a card must carry a url when no default url is given")]
    MissingUrl,

    #[error("draft has no cards")]
    NoCards,

    #[error(transparent)]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Whether the error came from breaking one of the hard platform limits,
    /// as opposed to malformed composition input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ContentTooLong | Error::TooManyCards | Error::TooManyAttachments
        )
    }
}
