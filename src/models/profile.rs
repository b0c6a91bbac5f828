use serde::{Deserialize, Serialize};

use super::deserialize_nullable_string;

/// A person returned by the people search.
///
/// Identity is the LinkedIn URL. Any field may be `null` on the wire and
/// deserializes as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub linkedin_url: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
}

impl Profile {
    pub fn new(
        linkedin_url: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            linkedin_url: linkedin_url.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            title: title.into(),
        }
    }

    /// "First Last", skipping empty parts
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Link target for this profile, `None` when the backend had no URL
    pub fn link_target(&self) -> Option<&str> {
        if self.linkedin_url.is_empty() {
            None
        } else {
            Some(&self.linkedin_url)
        }
    }
}

/// LinkedIn URLs of all profiles that have one, in order
pub fn linkedin_urls(profiles: &[Profile]) -> Vec<String> {
    profiles
        .iter()
        .filter_map(|p| p.link_target().map(str::to_string))
        .collect()
}
