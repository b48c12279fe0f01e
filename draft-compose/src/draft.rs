use core::ops::Add;

use card::{Attachment, Card, Message, SmolStr};
use smol_str::format_smolstr;

use crate::group::MultiImageGroup;
use crate::{limits, Error, DEFAULT_COLOR};

/// The in-memory, not-yet-sent form of an outbound message: body text, an
/// ordered card sequence, and an ordered attachment sequence.
///
/// Every mutation re-checks the platform limits (2000 characters, ten cards,
/// ten attachments); a violation surfaces as a [validation error](Error) at
/// the offending call and leaves the draft untouched. Content is never
/// silently truncated.
///
/// Merge operations are chainable: `draft.merge_x()?.merge_y()?`.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    content: String,
    cards: Vec<Card>,
    attachments: Vec<Attachment>,
    default_color: u32,
    id: u64,
}

/// The record handed to the platform's "send message" call. Pure projection
/// of a draft, no further validation.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendPayload {
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Card>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Default for MessageDraft {
    fn default() -> MessageDraft {
        MessageDraft {
            content: String::new(),
            cards: Vec::new(),
            attachments: Vec::new(),
            default_color: DEFAULT_COLOR,
            id: 0,
        }
    }
}

// id and default_color are bookkeeping, not message identity
impl PartialEq for MessageDraft {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.cards == other.cards
            && self.attachments == other.attachments
    }
}

impl MessageDraft {
    pub fn new() -> MessageDraft {
        MessageDraft::default()
    }

    /// Build a draft from a received wire message, preserving its id.
    pub fn from_message(message: &Message) -> Result<MessageDraft, Error> {
        let mut draft = MessageDraft {
            id: message.id,
            ..MessageDraft::default()
        };

        draft.set_content(message.content.as_deref().unwrap_or(""))?;
        draft.set_cards(message.embeds.clone())?;
        draft.set_attachments(message.attachments.clone())?;

        Ok(draft)
    }

    pub fn to_payload(&self) -> SendPayload {
        SendPayload {
            content: self.content.clone(),
            embeds: self.cards.clone(),
            attachments: self.attachments.clone(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn default_color(&self) -> u32 {
        self.default_color
    }

    pub fn set_id(&mut self, id: u64) -> &mut Self {
        self.id = id;
        self
    }

    pub fn set_default_color(&mut self, color: u32) -> &mut Self {
        self.default_color = color;
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<&mut Self, Error> {
        let content = content.into();
        if content.chars().count() > limits::MAX_CONTENT_LEN {
            return Err(Error::ContentTooLong);
        }
        self.content = content;
        Ok(self)
    }

    pub fn set_cards(&mut self, cards: Vec<Card>) -> Result<&mut Self, Error> {
        if cards.len() > limits::MAX_CARDS {
            return Err(Error::TooManyCards);
        }
        self.cards = cards;
        Ok(self)
    }

    pub fn push_card(&mut self, card: Card) -> Result<&mut Self, Error> {
        if self.cards.len() >= limits::MAX_CARDS {
            return Err(Error::TooManyCards);
        }
        self.cards.push(card);
        Ok(self)
    }

    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) -> Result<&mut Self, Error> {
        if attachments.len() > limits::MAX_ATTACHMENTS {
            return Err(Error::TooManyAttachments);
        }
        self.attachments = attachments;
        Ok(self)
    }

    pub fn push_attachment(&mut self, attachment: Attachment) -> Result<&mut Self, Error> {
        if self.attachments.len() >= limits::MAX_ATTACHMENTS {
            return Err(Error::TooManyAttachments);
        }
        self.attachments.push(attachment);
        Ok(self)
    }

    /// Concatenate two drafts: contents joined by a single newline (skipped
    /// when one side already supplies it), card and attachment sequences
    /// appended in order. Limits still apply to the combined result.
    pub fn concat(self, other: MessageDraft) -> Result<MessageDraft, Error> {
        let newline = !(self.content.ends_with('\n') || other.content.starts_with('\n'));

        let MessageDraft {
            mut content,
            mut cards,
            mut attachments,
            ..
        } = self;

        if newline {
            content.push('\n');
        }
        content.push_str(&other.content);
        cards.extend(other.cards);
        attachments.extend(other.attachments);

        let mut draft = MessageDraft::new();
        draft.set_content(content)?;
        draft.set_cards(cards)?;
        draft.set_attachments(attachments)?;

        Ok(draft)
    }

    /// Move the body text into the description of the card at `card_index`
    /// (wrap-around), joined with a blank line. With no cards present, a
    /// single card is created to hold the text.
    pub fn merge_content_into_card(&mut self, card_index: i64, prepend: bool) -> &mut Self {
        let content = core::mem::take(&mut self.content);

        if self.cards.is_empty() {
            self.cards.push(Card {
                description: Some(content.into()),
                color: Some(self.default_color),
                ..Card::default()
            });
            return self;
        }

        let index = wrap_index(card_index, self.cards.len());
        let card = &mut self.cards[index];

        // external cards may arrive with no description at all
        let description = card.description.take().unwrap_or_default();

        card.description = Some(if prepend {
            format_smolstr!("{content}\n\n{description}")
        } else {
            format_smolstr!("{description}\n\n{content}")
        });

        self
    }

    /// Fold the selected card's own url in as its displayed image, then drop
    /// the hyperlink: the card's link target becomes its picture. Unlike
    /// [`merge_url_as_image_into_card`](Self::merge_url_as_image_into_card),
    /// this clears the original url afterwards.
    pub fn merge_card_url_as_image_into_card(
        &mut self,
        card_index: i64,
        designator: u64,
    ) -> Result<&mut Self, Error> {
        if self.cards.is_empty() {
            return Err(Error::NoCards);
        }

        let index = wrap_index(card_index, self.cards.len());
        let url = self.cards[index].url.clone();

        self.merge_url_as_image_into_card(url.as_deref(), index as i64, designator)?;

        // the spliced group's first card sits where the target was
        self.cards[index].url = None;

        Ok(self)
    }

    /// Fold an arbitrary url into the selected card's image slot. A missing
    /// url is a logged no-op, this is meant to be called opportunistically.
    /// An empty draft gets a default card first.
    pub fn merge_url_as_image_into_card(
        &mut self,
        url: Option<&str>,
        card_index: i64,
        designator: u64,
    ) -> Result<&mut Self, Error> {
        let Some(url) = url else {
            tracing::warn!("cannot merge a missing url into a card");
            return Ok(self);
        };

        let images = vec![SmolStr::from(url)];
        self.splice_group(card_index, false, |target| {
            MultiImageGroup::from_card(target, designator, images, None)
        })
    }

    /// Fold every image-typed attachment into the selected card, leaving only
    /// the non-image attachments behind. With `new_card`, a fresh placeholder
    /// card is appended and targeted instead of `card_index`. `default_url`
    /// supplies the group identity when the target card has no url.
    pub fn merge_attachments_into_card(
        &mut self,
        card_index: i64,
        designator: u64,
        new_card: bool,
        default_url: Option<&str>,
    ) -> Result<&mut Self, Error> {
        let (images, remaining): (Vec<_>, Vec<_>) = self
            .attachments
            .iter()
            .cloned()
            .partition(Attachment::is_image);

        let images: Vec<SmolStr> = images.into_iter().map(|attachment| attachment.url).collect();

        self.splice_group(card_index, new_card, |target| {
            MultiImageGroup::from_card(target, designator, images, default_url)
        })?;

        self.attachments = remaining;

        Ok(self)
    }

    /// Clear the thumbnail of every card. Idempotent.
    pub fn remove_all_card_thumbnails(&mut self) -> &mut Self {
        for card in &mut self.cards {
            card.clear_thumbnail();
        }
        self
    }

    /// Shared splice rule: replace the card at `card_index` with the cards of
    /// a group, preserving order. Works on a scratch copy so the draft is
    /// untouched when the group cannot be built or the card limit would be
    /// exceeded.
    fn splice_group<F>(
        &mut self,
        card_index: i64,
        new_card: bool,
        build: F,
    ) -> Result<&mut Self, Error>
    where
        F: FnOnce(Card) -> Result<MultiImageGroup, Error>,
    {
        let mut cards = self.cards.clone();

        if cards.is_empty() {
            cards.push(Card::with_color(self.default_color));
        }

        let index = if new_card {
            // placeholder description so the platform accepts the card even
            // before any metadata lands on it
            let mut placeholder = Card::with_color(self.default_color);
            placeholder.description = Some(SmolStr::new("."));
            cards.push(placeholder);
            cards.len() - 1
        } else {
            wrap_index(card_index, cards.len())
        };

        let group = build(cards.remove(index))?;

        if cards.len() + group.len() > limits::MAX_CARDS {
            return Err(Error::TooManyCards);
        }

        cards.splice(index..index, group.into_cards());
        self.cards = cards;

        Ok(self)
    }
}

impl Add for MessageDraft {
    type Output = Result<MessageDraft, Error>;

    fn add(self, other: MessageDraft) -> Self::Output {
        self.concat(other)
    }
}

/// Card indices wrap around the current card count, so callers may pass any
/// integer as a "logical" index. `len` must be nonzero.
fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}
