use super::*;

/// A rich-content element of a chat message, called an "embed" on-platform.
///
/// The composition engine treats cards as opaque data read and written through
/// this field contract; nothing here knows how a card is rendered or sent.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(
        rename = "t",
        alias = "title",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub title: Option<SmolStr>,

    #[serde(
        rename = "d",
        alias = "description",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub description: Option<SmolStr>,

    /// Identity URL. Consecutive cards sharing this render as one gallery.
    #[serde(
        rename = "u",
        alias = "url",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub url: Option<SmolStr>,

    /// Accent Color
    #[serde(
        rename = "c",
        alias = "color",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<u32>,

    #[serde(
        rename = "ts",
        alias = "timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ts: Option<Timestamp>,

    /// At most one image per card; galleries are encoded as card runs.
    #[serde(default, skip_serializing_if = "CardMedia::is_empty")]
    pub image: Option<BoxedCardMedia>,
    #[serde(
        rename = "th",
        alias = "thumbnail",
        default,
        skip_serializing_if = "CardMedia::is_empty"
    )]
    pub thumbnail: Option<BoxedCardMedia>,
    #[serde(
        rename = "vid",
        alias = "video",
        default,
        skip_serializing_if = "CardMedia::is_empty"
    )]
    pub video: Option<BoxedCardMedia>,

    #[serde(rename = "au", alias = "author", default, skip_serializing_if = "CardAuthor::is_none")]
    pub author: Option<CardAuthor>,

    #[serde(
        rename = "p",
        alias = "provider",
        default,
        skip_serializing_if = "CardProvider::is_none"
    )]
    pub provider: CardProvider,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<CardFooter>,

    #[serde(default, skip_serializing_if = "ThinVec::is_empty")]
    pub fields: ThinVec<CardField>,
}

/// Structural equality, except that images compare by URL alone. Image
/// dimensions and mime type are derived by the platform, never authored,
/// so they must not break identity.
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        fn image_url(media: &Option<BoxedCardMedia>) -> Option<&str> {
            media.as_ref().map(|media| media.url.as_str())
        }

        self.title == other.title
            && self.description == other.description
            && self.url == other.url
            && self.color == other.color
            && self.ts == other.ts
            && image_url(&self.image) == image_url(&other.image)
            && self.thumbnail == other.thumbnail
            && self.video == other.video
            && self.author == other.author
            && self.provider == other.provider
            && self.footer == other.footer
            && self.fields == other.fields
    }
}

impl Card {
    pub fn with_color(color: u32) -> Card {
        Card {
            color: Some(color),
            ..Card::default()
        }
    }

    pub fn set_image(&mut self, url: impl Into<SmolStr>) -> &mut Self {
        self.image = Some(BoxedCardMedia::default().with_url(url));
        self
    }

    pub fn set_thumbnail(&mut self, url: impl Into<SmolStr>) -> &mut Self {
        self.thumbnail = Some(BoxedCardMedia::default().with_url(url));
        self
    }

    pub fn clear_thumbnail(&mut self) -> &mut Self {
        self.thumbnail = None;
        self
    }

    pub fn set_footer(&mut self, text: impl Into<SmolStr>, icon: Option<BoxedCardMedia>) -> &mut Self {
        self.footer = Some(CardFooter {
            text: text.into(),
            icon,
        });
        self
    }

    pub fn add_field(
        &mut self,
        name: impl Into<SmolStr>,
        value: impl Into<SmolStr>,
        inline: bool,
    ) -> &mut Self {
        self.fields.push(CardField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn has_image(&self) -> bool {
        !CardMedia::is_empty(&self.image)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BoxedCardMedia(Box<CardMedia>);

impl BoxedCardMedia {
    #[inline(always)]
    pub fn read(self) -> CardMedia {
        *self.0
    }

    #[inline]
    pub fn with_url(mut self, url: impl Into<SmolStr>) -> Self {
        self.url = url.into();
        self
    }

    #[inline]
    pub fn with_dims(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[inline]
    pub fn with_mime(mut self, mime: impl Into<SmolStr>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

impl core::ops::Deref for BoxedCardMedia {
    type Target = CardMedia;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl core::ops::DerefMut for BoxedCardMedia {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<CardMedia> for Option<BoxedCardMedia> {
    fn from(value: CardMedia) -> Self {
        Some(value.into())
    }
}

impl From<CardMedia> for BoxedCardMedia {
    fn from(value: CardMedia) -> Self {
        BoxedCardMedia(Box::new(value))
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMedia {
    #[serde(rename = "u", alias = "url")]
    pub url: SmolStr,

    /// height
    #[serde(
        rename = "h",
        alias = "height",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<i32>,

    /// width
    #[serde(
        rename = "w",
        alias = "width",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<i32>,

    #[serde(
        rename = "m",
        alias = "mime",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub mime: Option<SmolStr>,
}

impl CardMedia {
    pub fn is_empty(this: &Option<BoxedCardMedia>) -> bool {
        match this {
            Some(ref media) => media.url.is_empty(),
            None => true,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAuthor {
    #[serde(rename = "n", alias = "name")]
    pub name: SmolStr,

    #[serde(
        rename = "u",
        alias = "url",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub url: Option<SmolStr>,

    #[serde(
        rename = "i",
        alias = "icon",
        default,
        skip_serializing_if = "CardMedia::is_empty"
    )]
    pub icon: Option<BoxedCardMedia>,
}

impl CardAuthor {
    pub fn is_none(this: &Option<Self>) -> bool {
        match this {
            Some(ref this) => {
                this.name.is_empty() && is_none_or_empty(&this.url) && CardMedia::is_empty(&this.icon)
            }
            None => true,
        }
    }
}

/// oEmbed-style provider attribution.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProvider {
    #[serde(
        rename = "n",
        alias = "name",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub name: Option<SmolStr>,

    #[serde(
        rename = "u",
        alias = "url",
        default,
        skip_serializing_if = "is_none_or_empty"
    )]
    pub url: Option<SmolStr>,
}

impl CardProvider {
    pub fn is_none(&self) -> bool {
        is_none_or_empty(&self.name) && is_none_or_empty(&self.url)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFooter {
    #[serde(rename = "t", alias = "text")]
    pub text: SmolStr,

    #[serde(
        rename = "i",
        alias = "icon",
        default,
        skip_serializing_if = "CardMedia::is_empty"
    )]
    pub icon: Option<BoxedCardMedia>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardField {
    #[serde(
        rename = "n",
        alias = "name",
        default,
        skip_serializing_if = "SmolStr::is_empty"
    )]
    pub name: SmolStr,

    #[serde(
        rename = "v",
        alias = "value",
        default,
        skip_serializing_if = "SmolStr::is_empty"
    )]
    pub value: SmolStr,

    /// Render beside the previous field instead of on its own row.
    #[serde(rename = "i", alias = "inline", default, skip_serializing_if = "is_false")]
    pub inline: bool,
}

impl CardField {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() || self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_equality_ignores_derived_metadata() {
        let mut a = Card::with_color(0xFF0000);
        a.set_image("https://cdn.example.com/pic.png");

        let mut b = Card::with_color(0xFF0000);
        b.image = Some(
            BoxedCardMedia::default()
                .with_url("https://cdn.example.com/pic.png")
                .with_dims(640, 480)
                .with_mime("image/png"),
        );

        assert_eq!(a, b);

        let mut c = b.clone();
        c.set_image("https://cdn.example.com/other.png");
        assert_ne!(a, c);
    }

    #[test]
    fn test_thumbnail_equality_is_structural() {
        let mut a = Card::default();
        a.set_thumbnail("https://cdn.example.com/pic.png");

        let mut b = Card::default();
        b.thumbnail = Some(
            BoxedCardMedia::default()
                .with_url("https://cdn.example.com/pic.png")
                .with_dims(64, 64),
        );

        assert_ne!(a, b);
    }

    #[test]
    fn test_wire_aliases() {
        let card: Card = serde_json::from_str(
            r#"{
                "title": "Hello",
                "description": "World",
                "url": "https://example.com",
                "color": 7506394,
                "image": { "url": "https://example.com/a.png", "width": 100, "height": 50 },
                "author": { "name": "someone" },
                "fields": [{ "name": "k", "value": "v", "inline": true }]
            }"#,
        )
        .unwrap();

        assert_eq!(card.title.as_deref(), Some("Hello"));
        assert_eq!(card.url.as_deref(), Some("https://example.com"));
        assert_eq!(card.color, Some(7506394));
        assert!(card.has_image());
        assert!(card.fields[0].inline);

        // compact names on the way back out
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["t"], "Hello");
        assert_eq!(value["u"], "https://example.com");
        assert!(value.get("title").is_none());
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let value = serde_json::to_value(Card::default()).unwrap();
        assert_eq!(value.as_object().map(|o| o.len()), Some(0));
    }
}
