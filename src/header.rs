use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::{Hash, Hasher};

/// The role a header plays, one tag per entry of the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    AcceptVersion,
    HeartBeat,
    Destination,
    Id,
    Version,
    Subscription,
    MessageId,
    ContentLength,
    Message,
    ContentType,
    Custom,
}

impl HeaderKind {
    /// Map a wire key onto its kind. Unknown keys are `Custom`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "accept-version" => HeaderKind::AcceptVersion,
            "heart-beat" => HeaderKind::HeartBeat,
            "destination" => HeaderKind::Destination,
            "id" => HeaderKind::Id,
            "version" => HeaderKind::Version,
            "subscription" => HeaderKind::Subscription,
            "message-id" => HeaderKind::MessageId,
            "content-length" => HeaderKind::ContentLength,
            "message" => HeaderKind::Message,
            "content-type" => HeaderKind::ContentType,
            _ => HeaderKind::Custom,
        }
    }
}

/// A single STOMP header.
///
/// Known keys get their own variant; anything else is carried as
/// `Custom`. Two headers are equal (and hash alike) when their **keys**
/// match, whatever their values: a frame holds at most one header per
/// key, see [`Headers`].
#[derive(Debug, Clone)]
pub enum Header {
    AcceptVersion(String),
    HeartBeat(String),
    Destination(String),
    Id(String),
    Version(String),
    Subscription(String),
    MessageId(String),
    ContentLength(String),
    Message(String),
    ContentType(String),
    Custom { key: String, value: String },
}

impl Header {
    /// Build a header from a raw key/value pair. Never fails.
    pub fn from_wire(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match HeaderKind::from_key(&key) {
            HeaderKind::AcceptVersion => Header::AcceptVersion(value),
            HeaderKind::HeartBeat => Header::HeartBeat(value),
            HeaderKind::Destination => Header::Destination(value),
            HeaderKind::Id => Header::Id(value),
            HeaderKind::Version => Header::Version(value),
            HeaderKind::Subscription => Header::Subscription(value),
            HeaderKind::MessageId => Header::MessageId(value),
            HeaderKind::ContentLength => Header::ContentLength(value),
            HeaderKind::Message => Header::Message(value),
            HeaderKind::ContentType => Header::ContentType(value),
            HeaderKind::Custom => Header::Custom { key, value },
        }
    }

    /// Build a `Custom` header without mapping the key to a known kind.
    pub fn custom(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header::Custom {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The wire key, e.g. `"destination"`.
    pub fn key(&self) -> &str {
        match self {
            Header::AcceptVersion(_) => "accept-version",
            Header::HeartBeat(_) => "heart-beat",
            Header::Destination(_) => "destination",
            Header::Id(_) => "id",
            Header::Version(_) => "version",
            Header::Subscription(_) => "subscription",
            Header::MessageId(_) => "message-id",
            Header::ContentLength(_) => "content-length",
            Header::Message(_) => "message",
            Header::ContentType(_) => "content-type",
            Header::Custom { key, .. } => key,
        }
    }

    /// The raw value, exactly as sent or received.
    pub fn value(&self) -> &str {
        match self {
            Header::AcceptVersion(v)
            | Header::HeartBeat(v)
            | Header::Destination(v)
            | Header::Id(v)
            | Header::Version(v)
            | Header::Subscription(v)
            | Header::MessageId(v)
            | Header::ContentLength(v)
            | Header::Message(v)
            | Header::ContentType(v) => v,
            Header::Custom { value, .. } => value,
        }
    }

    /// The known-header tag. A `Custom` header is always
    /// `HeaderKind::Custom`, even when its key names a known header.
    pub fn kind(&self) -> HeaderKind {
        match self {
            Header::Custom { .. } => HeaderKind::Custom,
            other => HeaderKind::from_key(other.key()),
        }
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Header {}

impl Hash for Header {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// The headers of one frame, keyed by header name.
///
/// Inserting a header whose key is already present replaces the previous
/// one. Iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    entries: HashMap<String, Header>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, returning the one it replaced (if any).
    pub fn insert(&mut self, header: Header) -> Option<Header> {
        self.entries.insert(header.key().to_string(), header)
    }

    /// Value of the header named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(Header::value)
    }

    /// The typed header named `key`, for matching on its variant.
    pub fn get_header(&self, key: &str) -> Option<&Header> {
        self.entries.get(key)
    }

    /// Whether a header named `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove and return the header named `key`.
    pub fn remove(&mut self, key: &str) -> Option<Header> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the headers in unspecified order.
    pub fn iter(&self) -> hash_map::Values<'_, String, Header> {
        self.entries.values()
    }
}

// Header equality looks at keys only; two header sets are equal when they
// carry the same keys with the same values.
impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|h| other.get(h.key()) == Some(h.value()))
    }
}

impl Eq for Headers {}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl Extend<Header> for Headers {
    fn extend<I: IntoIterator<Item = Header>>(&mut self, iter: I) {
        for header in iter {
            self.insert(header);
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = hash_map::Values<'a, String, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
