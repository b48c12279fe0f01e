//! Composition and normalization of outbound chat messages.
//!
//! The platform caps a single message at 2000 characters of body text, ten
//! cards ("embeds"), and ten attachments, with at most one image per card.
//! [`MessageDraft`] lets a caller build message content piecewise and then
//! fold overflow (free text, urls, image attachments) into the card sequence,
//! using [`MultiImageGroup`] to encode several images under one logical card.
//! Everything here is a pure value transformation; nothing is ever sent.

#[macro_use]
extern crate serde;

pub use card;

mod draft;
mod error;
mod group;

pub use card::{Attachment, Card, Message, SmolStr};
pub use draft::{MessageDraft, SendPayload};
pub use error::Error;
pub use group::MultiImageGroup;

/// Hard structural limits the platform imposes on a single message.
pub mod limits {
    pub const MAX_CONTENT_LEN: usize = 2000;
    pub const MAX_CARDS: usize = 10;
    pub const MAX_ATTACHMENTS: usize = 10;
}

/// Accent color given to cards the engine creates on the caller's behalf.
pub const DEFAULT_COLOR: u32 = 0x2B2D31;

/// Query-string key reserved for disambiguating card identities within a
/// multi-image group. Treated as a substitution point, never a literal value.
pub const DESIGNATOR_PARAM: &str = "designator";
