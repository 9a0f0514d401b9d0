use crate::constant::{ATTR_REPLY_CODE, ATTR_REPLY_TEXT, REPLY_CODE_SUCCESS, ReplyTag};

/// Attributes of one element, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Value of the first attribute named `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Status carried by the root `RETS` element or a `RETS-STATUS` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyStatus {
    /// Literal code string, leading zeros preserved
    pub reply_code: String,
    pub reply_text: String,
    pub reply_tag: ReplyTag,
}

impl ReplyStatus {
    pub fn new(reply_code: impl Into<String>, reply_text: impl Into<String>) -> Self {
        let reply_code = reply_code.into();
        Self {
            reply_tag: ReplyTag::from_code(&reply_code),
            reply_text: reply_text.into(),
            reply_code,
        }
    }

    /// Build a status from element attributes; `None` if `ReplyCode` is absent.
    pub fn from_attributes(attrs: &Attributes) -> Option<Self> {
        let code = attrs.get(ATTR_REPLY_CODE)?;
        Some(Self::new(code, attrs.get(ATTR_REPLY_TEXT).unwrap_or_default()))
    }

    pub fn is_success(&self) -> bool {
        self.reply_code == REPLY_CODE_SUCCESS
    }

    /// The reply error this status represents, if the code is non-zero
    pub fn to_error(&self) -> Option<ReplyError> {
        (!self.is_success()).then(|| ReplyError {
            reply_code: self.reply_code.clone(),
            reply_text: self.reply_text.clone(),
            reply_tag: self.reply_tag,
        })
    }
}

/// Non-zero RETS reply code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} ({}): {}", self.reply_code, self.reply_tag, self.reply_text)]
pub struct ReplyError {
    pub reply_code: String,
    pub reply_text: String,
    pub reply_tag: ReplyTag,
}

/// One instance of the tracked metadata element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBlock {
    pub tag: String,
    pub attributes: Attributes,
    /// 1-based position among the tracked blocks of this response
    pub sequence: u32,
}
