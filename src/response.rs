// Response data model: the shapes the word-frequency API answers with.
// Every body carries a `page` field naming its shape, so decoding happens
// in two phases: peek the discriminator, then decode the full body into
// the matching type. The endpoint alone does not determine the shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::RequestError;

/// Discriminator envelope: only `page` is read before committing to a
/// concrete shape.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    page: String,
}

/// The word list, in the order the server stored it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Words {
    #[serde(default)]
    pub input: String,
    pub words: Vec<String>,
}

/// Per-word occurrence counts. Keys are held sorted so rendering is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Occurrences {
    pub words: BTreeMap<String, i64>,
}

impl Occurrences {
    /// A greeting worth printing when Scott shows up in the counts.
    pub fn easter_egg(&self) -> Option<&'static str> {
        self.words
            .contains_key("Scott")
            .then_some("> Hey! I found a Scott! 👋")
    }
}

/// A decoded API response, one variant per known `page` kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Words(Words),
    Occurrences(Occurrences),
}

impl Page {
    pub const WORDS: &'static str = "words";
    pub const OCCURRENCE: &'static str = "occurrence";

    /// Decode a response body. Phase one reads the `page` discriminator,
    /// phase two decodes the whole body into the named shape. An absent,
    /// empty or unrecognized discriminator is an error, never a default.
    pub fn decode(url: &str, status: u16, body: &str) -> Result<Page, RequestError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| RequestError::new(url, status, body, format!("invalid JSON: {e}")))?;

        let envelope: Envelope = serde_json::from_value(value.clone()).map_err(|e| {
            RequestError::new(url, status, body, format!("malformed page field: {e}"))
        })?;

        match envelope.page.as_str() {
            Self::WORDS => {
                let words: Words = serde_json::from_value(value).map_err(|e| {
                    RequestError::new(
                        url,
                        status,
                        body,
                        format!("body tagged {:?} did not match that shape: {e}", Self::WORDS),
                    )
                })?;
                Ok(Page::Words(words))
            }
            Self::OCCURRENCE => {
                let occurrences: Occurrences = serde_json::from_value(value).map_err(|e| {
                    RequestError::new(
                        url,
                        status,
                        body,
                        format!(
                            "body tagged {:?} did not match that shape: {e}",
                            Self::OCCURRENCE
                        ),
                    )
                })?;
                Ok(Page::Occurrences(occurrences))
            }
            "" => Err(RequestError::new(
                url,
                status,
                body,
                "unknown page kind: the page field is missing or empty",
            )),
            other => Err(RequestError::new(
                url,
                status,
                body,
                format!("unknown page kind {other:?}"),
            )),
        }
    }

    /// The discriminator value this variant was decoded from.
    pub fn kind(&self) -> &'static str {
        match self {
            Page::Words(_) => Self::WORDS,
            Page::Occurrences(_) => Self::OCCURRENCE,
        }
    }
}

impl fmt::Display for Words {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Words\n-----\n\n{}", self.words.join("\n"))
    }
}

impl fmt::Display for Occurrences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word\tCount\n----\t-----\n\n")?;
        for (word, count) in &self.words {
            writeln!(f, "{word}\t{count}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Words(words) => fmt::Display::fmt(words, f),
            Page::Occurrences(occurrences) => fmt::Display::fmt(occurrences, f),
        }
    }
}
