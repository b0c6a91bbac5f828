use serde::{Deserialize, Serialize};

/// Body for `POST /api/get_orgs`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrgSearchRequest {
    pub org_name: String,
}

impl OrgSearchRequest {
    pub fn new(org_name: impl Into<String>) -> Self {
        Self {
            org_name: org_name.into(),
        }
    }
}

/// Body for `POST /api/get_people`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeopleSearchRequest {
    pub org_id: String,
    pub person_titles: Vec<String>,
}

impl PeopleSearchRequest {
    /// Search one organization for a single title keyword
    pub fn new(org_id: impl Into<String>, title_keyword: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            person_titles: vec![title_keyword.into()],
        }
    }
}

/// Body for `POST /api/summarize_profiles`
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct SummarizeRequest {
    pub linkedin_urls: Vec<String>,
    pub prompt: String,
    pub company_name: String,
    pub email: String,
    pub password: String,
}

// Keep the password out of logs
impl std::fmt::Debug for SummarizeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizeRequest")
            .field("linkedin_urls", &self.linkedin_urls)
            .field("prompt", &self.prompt)
            .field("company_name", &self.company_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
