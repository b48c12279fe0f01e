use card::{Card, SmolStr};
use url::Url;

use crate::{Error, DEFAULT_COLOR, DESIGNATOR_PARAM};

/// An ordered run of cards sharing one identity url, each carrying a single
/// distinct image.
///
/// The platform renders consecutive cards with an identical url as one
/// gallery, so the run reads as a single card with several images. Only the
/// first card carries the full metadata (title, footer, author, fields and so
/// on); every later card is a minimal shell holding nothing but the identity
/// url and its image.
///
/// Groups are transient: built inside a merge operation, spliced into a
/// [`MessageDraft`](crate::MessageDraft), never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiImageGroup {
    // invariant: never empty
    cards: Vec<Card>,
}

impl MultiImageGroup {
    /// Build a group from an identity url and a base card template.
    ///
    /// The designator written into every card's url is resolved in order of
    /// preference: the value already present in `url`'s query string, the
    /// `designator` argument, then zero.
    pub fn new(
        url: &str,
        designator: Option<u64>,
        images: Vec<SmolStr>,
        mut base: Card,
    ) -> Result<MultiImageGroup, Error> {
        if base.image.is_some() {
            return Err(Error::AmbiguousImage);
        }

        base.description.get_or_insert_with(SmolStr::default);
        base.color.get_or_insert(DEFAULT_COLOR);
        base.url = Some(apply_designator(url, designator.unwrap_or(0))?);

        let mut group = MultiImageGroup { cards: vec![base] };

        let mut images = images.into_iter();
        if let Some(image) = images.next() {
            group.first_mut().set_image(image);
        }
        for image in images {
            group.add_image(image);
        }

        Ok(group)
    }

    /// Derive a group from an existing card, carrying over its metadata onto
    /// the group's first card. `default_url` stands in when the card has no
    /// url of its own.
    pub fn from_card(
        card: Card,
        designator: u64,
        images: Vec<SmolStr>,
        default_url: Option<&str>,
    ) -> Result<MultiImageGroup, Error> {
        let url = match card.url.as_deref().or(default_url) {
            Some(url) => SmolStr::from(url),
            None => return Err(Error::MissingUrl),
        };

        let base = Card {
            title: card.title,
            description: card.description,
            color: card.color.or(Some(DEFAULT_COLOR)),
            ts: card.ts,
            ..Card::default()
        };

        let mut group = MultiImageGroup::new(&url, Some(designator), Vec::new(), base)?;

        {
            let first = group.first_mut();

            if let Some(ref image) = card.image {
                first.set_image(image.url.clone());
            }
            if let Some(ref thumbnail) = card.thumbnail {
                first.set_thumbnail(thumbnail.url.clone());
            }
            if let Some(footer) = card.footer {
                first.footer = Some(footer);
            }
            if let Some(author) = card.author {
                first.author = Some(author);
            }
            first.provider = card.provider;
            for field in card.fields {
                first.add_field(field.name, field.value, field.inline);
            }
        }

        group.add_images(images);

        Ok(group)
    }

    /// Add one image, spilling over into a new minimal card once the last
    /// card's image slot is taken.
    pub fn add_image(&mut self, image: impl Into<SmolStr>) -> &mut Self {
        match self.cards.last_mut() {
            Some(last) if !last.has_image() => {
                last.set_image(image);
            }
            _ => {
                let mut card = Card {
                    url: self.cards.first().and_then(|card| card.url.clone()),
                    description: Some(SmolStr::default()),
                    color: Some(DEFAULT_COLOR),
                    ..Card::default()
                };
                card.set_image(image);
                self.cards.push(card);
            }
        }

        self
    }

    pub fn add_images<I>(&mut self, images: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        for image in images {
            self.add_image(image);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    fn first_mut(&mut self) -> &mut Card {
        // cards is never empty, see the struct invariant
        &mut self.cards[0]
    }
}

/// Resolve the designator for `url` (query value wins over `fallback`) and
/// write it back under [`DESIGNATOR_PARAM`], replacing any prior value.
fn apply_designator(url: &str, fallback: u64) -> Result<SmolStr, Error> {
    let mut url = Url::parse(url)?;

    let designator = url
        .query_pairs()
        .find(|(key, _)| key == DESIGNATOR_PARAM)
        .and_then(|(_, value)| value.parse::<u64>().ok())
        .unwrap_or(fallback);

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != DESIGNATOR_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(pairs);
        query.append_pair(DESIGNATOR_PARAM, &designator.to_string());
    }

    Ok(SmolStr::from(url.as_str()))
}
