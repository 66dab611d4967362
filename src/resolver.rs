use crate::client::TalentisClient;
use crate::error::{CrmError, Result};
use crate::models::{CandidateRecord, LookupResult, ProfileRef};
use crate::parsers;
use crate::urls::{detail_page_id, profile_slug, tokens_from_slug};

impl TalentisClient {
    /// Resolves a profile URL to an existing CRM candidate record.
    ///
    /// Three strategies run in order, cheapest signal first; the first hit
    /// wins:
    ///
    /// 1. the CRM's own URL existence check, a form post that redirects
    ///    onto the candidate page when the URL is already on file;
    /// 2. name-contains searches over tokens derived from the profile
    ///    slug;
    /// 3. the same searches over the caller's explicit name hints, for
    ///    slugs that tokenize poorly.
    ///
    /// A strategy that faults is skipped, not fatal. `NetworkError` comes
    /// back only when every strategy faulted and none produced a clean
    /// miss, so `NotFound` always means the CRM was actually consulted.
    pub async fn lookup(&self, profile: &ProfileRef) -> LookupResult {
        if !self.ensure_session().await {
            return LookupResult::AuthError(
                "could not establish an authenticated CRM session".to_string(),
            );
        }

        let mut last_fault: Option<CrmError> = None;
        let mut clean_miss = false;

        match self.check_existing(&profile.url).await {
            Ok(Some(record)) => return LookupResult::Found(record),
            Ok(None) => clean_miss = true,
            Err(e) => {
                tracing::debug!(error = %e, "existence check faulted, falling back to search");
                last_fault = Some(e);
            }
        }

        match self.slug_search(&profile.url).await {
            Ok(Some(record)) => return LookupResult::Found(record),
            Ok(None) => clean_miss = true,
            Err(e) => {
                tracing::debug!(error = %e, "slug search faulted, falling back to name hints");
                last_fault = Some(e);
            }
        }

        let hints: Vec<&str> = [
            profile.first_name_hint.as_deref(),
            profile.last_name_hint.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !hints.is_empty() {
            match self.search_terms(&profile.url, hints.iter().copied()).await {
                Ok(Some(record)) => return LookupResult::Found(record),
                Ok(None) => clean_miss = true,
                Err(e) => {
                    tracing::debug!(error = %e, "name-hint search faulted");
                    last_fault = Some(e);
                }
            }
        }

        match last_fault {
            Some(fault) if !clean_miss => LookupResult::NetworkError(fault.to_string()),
            _ => LookupResult::NotFound,
        }
    }

    /// Posts `url` to the CRM's link existence check. The CRM answers by
    /// redirecting onto the candidate's detail page when it already has
    /// the link; any other landing spot means unknown. Shared with the
    /// creation flow as its duplicate guard.
    pub(crate) async fn check_existing(&self, url: &str) -> Result<Option<CandidateRecord>> {
        let form_page = self.get_page("/candidates/linkedin_url_check").await?;
        let token =
            parsers::token::extract_token(&form_page.body).ok_or(CrmError::TokenNotFound)?;

        let fields = vec![
            ("authenticity_token".to_string(), token),
            ("linkedin_url".to_string(), url.to_string()),
        ];
        let page = self
            .transport
            .post_form(&self.url("/candidates/check_linkedin_url"), &fields)
            .await?;

        if detail_page_id(&page.final_url).is_some() {
            let record = parsers::detail::parse_candidate_page(&page.body, &page.final_url)?;
            return Ok(Some(record));
        }
        Ok(None)
    }

    async fn slug_search(&self, url: &str) -> Result<Option<CandidateRecord>> {
        let Some(slug) = profile_slug(url) else {
            return Ok(None);
        };
        let tokens = tokens_from_slug(&slug);
        if tokens.is_empty() {
            return Ok(None);
        }
        self.search_terms(url, tokens.iter().map(String::as_str))
            .await
    }

    /// Runs a name-contains search per term, in order, scanning each
    /// results listing for a row whose profile link matches `url` and
    /// parsing that row's detail page on a hit.
    async fn search_terms<'a>(
        &self,
        url: &str,
        terms: impl Iterator<Item = &'a str>,
    ) -> Result<Option<CandidateRecord>> {
        for term in terms {
            tracing::debug!(term, "searching candidates by name fragment");
            let listing = self.get_page(&search_path(term)).await?;
            if let Some(detail_path) = parsers::search::find_matching_row(&listing.body, url) {
                let detail = self.get_page(&detail_path).await?;
                let record =
                    parsers::detail::parse_candidate_page(&detail.body, &detail.final_url)?;
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

fn search_path(term: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
    format!("/candidates?q%5Bfirst_name_or_last_name_cont%5D={encoded}&commit=Search")
}
