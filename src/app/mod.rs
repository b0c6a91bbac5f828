//! Session state for the search flow.
//!
//! A [`Session`] holds what the user has found so far (organizations, the
//! selected organization, profiles, the last summary) together with the
//! transcript and display of the request in flight. Requests run one at a
//! time; starting a new one resets the transcript.
//!
//! # Module structure
//! - `request` - Driving one request through the client into the session

mod request;

pub use request::{run_request, run_request_with};

use crate::client::ClientError;
use crate::config::Credentials;
use crate::models::{
    find_organization, linkedin_urls, Organization, OrgSearchRequest, PeopleSearchRequest, Profile,
    SummarizeRequest, SummaryResponse,
};
use crate::reducer::{derive_display, reduce, DisplayValue, Endpoint, PayloadUpdate, Transcript};
use crate::stream::ProtocolEvent;

/// State of one user session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    endpoint: Option<Endpoint>,
    transcript: Transcript,
    display: DisplayValue,
    parse_errors: usize,

    organizations: Vec<Organization>,
    selected_org: Option<String>,
    profiles: Vec<Profile>,
    summary: Option<SummaryResponse>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request to `endpoint`.
    ///
    /// The transcript restarts from the endpoint's initial transcript. State
    /// the new request will replace is cleared: an organization search clears
    /// everything, a people search clears profiles and the summary, a summary
    /// clears the previous summary.
    pub fn begin(&mut self, endpoint: Endpoint) {
        match endpoint {
            Endpoint::Organizations => {
                self.organizations.clear();
                self.selected_org = None;
                self.profiles.clear();
                self.summary = None;
            }
            Endpoint::People => {
                self.profiles.clear();
                self.summary = None;
            }
            Endpoint::Summary => {
                self.summary = None;
            }
        }

        self.endpoint = Some(endpoint);
        self.transcript = endpoint.initial_transcript();
        self.parse_errors = 0;
        self.display = derive_display(&self.transcript, &self.profiles);
        tracing::debug!(endpoint = %endpoint, "Session request started");
    }

    /// Fold a batch of events from the current request.
    ///
    /// Ignored when no request has been started.
    pub fn apply_events(&mut self, events: &[ProtocolEvent]) {
        let Some(endpoint) = self.endpoint else {
            tracing::warn!(count = events.len(), "Events without a request, dropping");
            return;
        };

        let transcript = std::mem::take(&mut self.transcript);
        let reduction = reduce(transcript, endpoint, events, &self.profiles);

        self.transcript = reduction.transcript;
        self.display = reduction.display;
        self.parse_errors += reduction.parse_errors;

        let profiles_changed = reduction
            .updates
            .iter()
            .any(|u| matches!(u, PayloadUpdate::Profiles(_)));
        for update in reduction.updates {
            self.apply(update);
        }
        if profiles_changed {
            self.display = derive_display(&self.transcript, &self.profiles);
        }
    }

    /// Apply a parsed payload. Each payload replaces the previous value.
    pub fn apply(&mut self, update: PayloadUpdate) {
        match update {
            PayloadUpdate::Organizations(organizations) => {
                tracing::debug!(count = organizations.len(), "Organizations set");
                self.organizations = organizations;
                if let Some(id) = &self.selected_org {
                    if !self.organizations.iter().any(|o| &o.id == id) {
                        self.selected_org = None;
                    }
                }
            }
            PayloadUpdate::Profiles(profiles) => {
                tracing::debug!(count = profiles.len(), "Profiles set");
                self.profiles = profiles;
            }
            PayloadUpdate::Summary(summary) => {
                self.summary = Some(summary);
            }
        }
    }

    /// Record a failed request as a transcript line.
    pub fn record_failure(&mut self, error: &ClientError) {
        tracing::warn!(error = %error, "Request failed");
        self.transcript.push_line(format!("Error: {}", error));
        self.display = derive_display(&self.transcript, &self.profiles);
    }

    /// Select an organization by id.
    pub fn select_organization(&mut self, id: &str) -> Result<&Organization, ClientError> {
        let org = find_organization(&self.organizations, id)
            .filter(|org| !org.id.is_empty())
            .ok_or(ClientError::MissingSelection("organization"))?;
        self.selected_org = Some(org.id.clone());
        Ok(org)
    }

    /// Select an organization by its position in the last search result.
    pub fn select_organization_at(&mut self, index: usize) -> Result<&Organization, ClientError> {
        let org = self
            .organizations
            .get(index)
            .filter(|org| !org.id.is_empty())
            .ok_or(ClientError::MissingSelection("organization"))?;
        self.selected_org = Some(org.id.clone());
        Ok(org)
    }

    pub fn selected_organization(&self) -> Option<&Organization> {
        let id = self.selected_org.as_deref()?;
        find_organization(&self.organizations, id)
    }

    pub fn org_search_request(&self, org_name: &str) -> OrgSearchRequest {
        OrgSearchRequest::new(org_name.trim())
    }

    /// People search within the selected organization.
    pub fn people_search_request(
        &self,
        title_keyword: &str,
    ) -> Result<PeopleSearchRequest, ClientError> {
        let org = self
            .selected_organization()
            .ok_or(ClientError::MissingSelection("organization"))?;
        Ok(PeopleSearchRequest::new(org.id.clone(), title_keyword.trim()))
    }

    /// Summary of the current profiles, credited to the selected organization.
    pub fn summarize_request(
        &self,
        prompt: &str,
        credentials: &Credentials,
    ) -> Result<SummarizeRequest, ClientError> {
        let org = self
            .selected_organization()
            .ok_or(ClientError::MissingSelection("organization"))?;
        let urls = linkedin_urls(&self.profiles);
        if urls.is_empty() {
            return Err(ClientError::MissingSelection("profiles"));
        }

        Ok(SummarizeRequest {
            linkedin_urls: urls,
            prompt: prompt.to_string(),
            company_name: org.name.clone(),
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        })
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn display(&self) -> &DisplayValue {
        &self.display
    }

    /// Payload parse failures in the current request
    pub fn parse_errors(&self) -> usize {
        self.parse_errors
    }

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn summary(&self) -> Option<&SummaryResponse> {
        self.summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orgs_session() -> Session {
        let mut session = Session::new();
        session.begin(Endpoint::Organizations);
        session.apply_events(&[
            ProtocolEvent::log("Found 2 organizations").unwrap(),
            ProtocolEvent::payload(
                r#"[{"id":"o1","name":"Acme"},{"id":2,"name":"Acme Labs"}]"#,
            ),
        ]);
        session
    }

    #[test]
    fn test_begin_people_starts_with_initiating_line() {
        let mut session = Session::new();
        session.begin(Endpoint::People);
        assert_eq!(session.transcript().lines(), ["Initiating search..."]);
        assert_eq!(session.display().markdown(), "Initiating search...\n");
    }

    #[test]
    fn test_organizations_applied() {
        let session = orgs_session();
        assert_eq!(session.organizations().len(), 2);
        assert_eq!(session.organizations()[1].id, "2");
        assert_eq!(session.parse_errors(), 0);
        assert_eq!(session.transcript().lines()[0], "Found 2 organizations");
    }

    #[test]
    fn test_events_without_request_are_dropped() {
        let mut session = Session::new();
        session.apply_events(&[ProtocolEvent::payload("[]")]);
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_select_and_build_people_request() {
        let mut session = orgs_session();
        assert!(matches!(
            session.people_search_request("cto"),
            Err(ClientError::MissingSelection("organization"))
        ));

        session.select_organization_at(1).unwrap();
        let request = session.people_search_request(" cto ").unwrap();
        assert_eq!(request, PeopleSearchRequest::new("2", "cto"));
    }

    #[test]
    fn test_select_unknown_organization() {
        let mut session = orgs_session();
        assert!(session.select_organization("missing").is_err());
        assert!(session.select_organization_at(5).is_err());
        assert!(session.selected_organization().is_none());
    }

    #[test]
    fn test_organization_without_id_is_listed_but_not_selectable() {
        let mut session = Session::new();
        session.begin(Endpoint::Organizations);
        session.apply_events(&[ProtocolEvent::payload(
            r#"[{"id":"o1","name":"Acme"},{"id":null,"name":"Ghost"}]"#,
        )]);

        assert_eq!(session.parse_errors(), 0);
        assert_eq!(session.organizations().len(), 2);
        assert!(matches!(
            session.select_organization_at(1),
            Err(ClientError::MissingSelection("organization"))
        ));
        assert!(session.select_organization("").is_err());
        assert!(session.selected_organization().is_none());
        assert_eq!(session.select_organization_at(0).unwrap().name, "Acme");
    }

    #[test]
    fn test_summarize_request_needs_profiles() {
        let mut session = orgs_session();
        session.select_organization("o1").unwrap();
        let creds = Credentials::new("me@example.com", "pw");

        assert!(matches!(
            session.summarize_request("who?", &creds),
            Err(ClientError::MissingSelection("profiles"))
        ));

        session.begin(Endpoint::People);
        session.apply_events(&[ProtocolEvent::payload(
            r#"[{"linkedin_url":"https://li/jane","first_name":"Jane","last_name":"Doe","title":"CEO"},
                {"linkedin_url":null,"first_name":"Ghost","last_name":null,"title":null}]"#,
        )]);
        assert_eq!(session.profiles().len(), 2);

        let request = session.summarize_request("who?", &creds).unwrap();
        assert_eq!(request.linkedin_urls, vec!["https://li/jane".to_string()]);
        assert_eq!(request.company_name, "Acme");
        assert_eq!(request.email, "me@example.com");
    }

    #[test]
    fn test_new_org_search_clears_selection() {
        let mut session = orgs_session();
        session.select_organization("o1").unwrap();
        session.begin(Endpoint::Organizations);
        assert!(session.selected_organization().is_none());
        assert!(session.organizations().is_empty());
    }

    #[test]
    fn test_record_failure_appends_line() {
        let mut session = Session::new();
        session.begin(Endpoint::People);
        session.record_failure(&ClientError::ServerError {
            status: 500,
            message: String::new(),
        });
        assert_eq!(
            session.transcript().lines(),
            ["Initiating search...", "Error: HTTP error! status: 500"]
        );
    }

    #[test]
    fn test_summary_display_uses_profiles() {
        let mut session = orgs_session();
        session.select_organization("o1").unwrap();
        session.apply(PayloadUpdate::Profiles(vec![Profile::new(
            "https://li/john",
            "John",
            "Smith",
            "CEO",
        )]));

        session.begin(Endpoint::Summary);
        session.apply_events(&[ProtocolEvent::payload(
            r#"{"summary":"See <1.1>","citations":{"<1.1>":"Smith, John, CEO"}}"#,
        )]);

        assert!(session.display().is_summary());
        assert_eq!(session.display().markdown(), "See [1.1](https://li/john)");
        assert!(session.summary().is_some());
    }
}
