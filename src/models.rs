use serde::{Deserialize, Serialize};

/// The six recruiting milestones every candidate timeline reports, in their
/// fixed display order.
pub const TIMELINE_MILESTONES: [&str; 6] = [
    "Sourced",
    "Contacted",
    "Replied",
    "Submitted",
    "Interviewed",
    "Placed",
];

/// A professional-network profile as supplied by the caller.
///
/// All fields are untrusted strings straight from the viewed profile page;
/// the URL is normalized before any comparison against CRM data.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProfileRef {
    /// The profile URL as seen in the browser address bar.
    pub url: String,
    /// First name read off the profile page, when the caller has it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_hint: Option<String>,
    /// Last name read off the profile page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_hint: Option<String>,
}

impl ProfileRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            first_name_hint: None,
            last_name_hint: None,
        }
    }

    pub fn with_name_hints(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name_hint = Some(first.into());
        self.last_name_hint = Some(last.into());
        self
    }
}

/// One milestone row of a candidate's recruiting timeline.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Milestone label, one of `TIMELINE_MILESTONES`.
    pub label: String,
    /// `MM/DD/YYYY`-style date, or `"N/A"` when the milestone has not
    /// happened yet.
    pub date: String,
}

/// One row of a candidate's submission history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The role the candidate was submitted for.
    pub role: String,
    /// The hiring company.
    pub company: String,
    /// Current pipeline stage of the submission.
    pub stage: String,
    /// Date range as the CRM renders it.
    pub dates: String,
    /// The recruiter who owns the submission.
    pub owner: String,
}

/// A candidate record as rendered on the CRM's detail page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CandidateRecord {
    /// Numeric id, always recoverable from the record URL's path suffix.
    pub id: u64,
    /// Canonical detail-page URL of the record.
    pub url: String,
    /// Display name from the page heading; empty when the page carries no
    /// heading.
    pub name: String,
    /// Recruiter currently owning the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_owner: Option<String>,
    /// Recruiter who originally sourced the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourced_by: Option<String>,
    /// Candidate location; absent when the CRM shows the `N/A` placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Profile link stored on the record, as rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Always exactly six entries, in `TIMELINE_MILESTONES` order.
    pub timeline: Vec<TimelineEntry>,
    /// Submission history rows; malformed rows are dropped during parsing.
    pub submissions: Vec<Submission>,
}

/// Outcome of resolving a profile URL against the CRM.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum LookupResult {
    /// The CRM already has a record for this profile.
    Found(CandidateRecord),
    /// All strategies exhausted without a match.
    NotFound,
    /// No authenticated session could be established.
    AuthError(String),
    /// Every strategy faulted before producing an answer.
    NetworkError(String),
}

/// Outcome of creating a stub candidate record.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum CreateResult {
    /// A new record was created and parsed back.
    Created(CandidateRecord),
    /// The CRM already had a record for this URL; nothing was submitted.
    AlreadyExists(CandidateRecord),
    /// The CRM rejected the submission, or the flow could not complete.
    ValidationError(String),
    /// No authenticated session could be established.
    AuthError(String),
}
