use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// An organization returned by the organization search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Backend identifier, accepted as string or integer. Empty when the
    /// backend sent null; such rows are listed but cannot be selected.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

impl Organization {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            linkedin_url: None,
        }
    }

    pub fn with_linkedin_url(mut self, url: impl Into<String>) -> Self {
        self.linkedin_url = Some(url.into());
        self
    }
}

/// Find an organization by id
pub fn find_organization<'a>(organizations: &'a [Organization], id: &str) -> Option<&'a Organization> {
    organizations.iter().find(|org| org.id == id)
}
