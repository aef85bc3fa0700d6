use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of trackable content; the backend only distinguishes movies and tv shows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "tv" | "show" => Ok(ContentType::Tv), // accept "show" on the command line
            other => Err(format!(
                "invalid content type '{}' (expected 'movie' or 'tv')",
                other
            )),
        }
    }
}

/// The pair (contentId, contentType) identifying one trackable item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub content_id: String,
    pub content_type: ContentType,
}

impl ContentKey {
    pub fn new(content_id: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            content_id: content_id.into(),
            content_type,
        }
    }

    pub fn movie(content_id: impl Into<String>) -> Self {
        Self::new(content_id, ContentType::Movie)
    }

    pub fn tv(content_id: impl Into<String>) -> Self {
        Self::new(content_id, ContentType::Tv)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_type, self.content_id)
    }
}
