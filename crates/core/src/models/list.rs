//! String lists that the backend stores in several shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// A list of strings such as product colors, sizes or image URLs.
///
/// Depending on how a document was written, the backend sends one of:
/// - a JSON array: `["S", "M"]`
/// - a JSON-encoded array inside a string: `"[\"S\",\"M\"]"`
/// - a plain, comma separated string: `"Đỏ, Xanh"`
/// - `null` or nothing at all
///
/// All of these decode to the same list. A string that looks like JSON but
/// fails to parse decodes to an empty list. Serialization always produces
/// a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlexList(Vec<String>);

impl FlexList {
    /// Create a list from already-split values.
    #[must_use]
    pub const fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Decode the textual forms described on [`FlexList`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }

        if text.starts_with('[') {
            return serde_json::from_str::<Vec<String>>(text)
                .map(Self::from_values)
                .unwrap_or_default();
        }

        Self::from_values(text.split(',').map(str::to_owned))
    }

    fn from_values(values: impl IntoIterator<Item = String>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .collect(),
        )
    }

    /// The decoded values.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether the list has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `value` is one of the entries.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    /// Iterate over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FlexList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<String>> for FlexList {
    fn from(values: Vec<String>) -> Self {
        Self::from_values(values)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    List(Vec<String>),
    Text(String),
}

impl<'de> Deserialize<'de> for FlexList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawList>::deserialize(deserializer)? {
            None => Self::default(),
            Some(RawList::List(values)) => Self::from_values(values),
            Some(RawList::Text(text)) => Self::parse(&text),
        })
    }
}
