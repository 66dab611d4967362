use crate::client::TalentisClient;
use crate::error::{CrmError, Result};
use crate::models::CreateResult;
use crate::parsers;
use crate::urls::detail_page_id;
use chrono::NaiveDate;

impl TalentisClient {
    /// Creates a stub candidate record in the CRM.
    ///
    /// The link existence check runs first; when the CRM already knows the
    /// URL this returns `AlreadyExists` with the parsed record and submits
    /// nothing. Ownership is assigned to the configured user when the
    /// creation form's owner select carries an option labelled with their
    /// email; otherwise the record is created unowned.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        url: &str,
        sourced_date: Option<NaiveDate>,
    ) -> CreateResult {
        if !self.ensure_session().await {
            return CreateResult::AuthError(
                "could not establish an authenticated CRM session".to_string(),
            );
        }

        match self.check_existing(url).await {
            Ok(Some(record)) => {
                tracing::debug!(id = record.id, "candidate already on file, skipping creation");
                return CreateResult::AlreadyExists(record);
            }
            Ok(None) => {}
            // A failed check cannot rule out a duplicate; abort instead of
            // submitting blind.
            Err(e) => {
                return CreateResult::ValidationError(format!(
                    "could not verify the URL is new, aborting creation: {e}"
                ));
            }
        }

        match self
            .submit_new_candidate(first_name, last_name, url, sourced_date)
            .await
        {
            Ok(result) => result,
            Err(e) => CreateResult::ValidationError(e.to_string()),
        }
    }

    async fn submit_new_candidate(
        &self,
        first_name: &str,
        last_name: &str,
        url: &str,
        sourced_date: Option<NaiveDate>,
    ) -> Result<CreateResult> {
        let form_page = self.get_page("/candidates/new").await?;
        let token =
            parsers::token::extract_token(&form_page.body).ok_or(CrmError::TokenNotFound)?;

        let mut fields = vec![
            ("authenticity_token".to_string(), token),
            ("candidate[first_name]".to_string(), first_name.to_string()),
            ("candidate[last_name]".to_string(), last_name.to_string()),
            ("candidate[linkedin_url]".to_string(), url.to_string()),
        ];
        if let Some(date) = sourced_date {
            fields.push((
                "candidate[sourced_date]".to_string(),
                date.format("%m/%d/%Y").to_string(),
            ));
        }
        match self.owner_option(&form_page.body).await {
            Some(owner_id) => {
                fields.push(("candidate[current_owner_id]".to_string(), owner_id));
            }
            None => {
                tracing::debug!("no owner option matches the configured email, leaving owner unset");
            }
        }
        fields.push(("commit".to_string(), "Create Candidate".to_string()));

        let page = self
            .transport
            .post_form(&self.url("/candidates"), &fields)
            .await?;

        if detail_page_id(&page.final_url).is_some() {
            let record = parsers::detail::parse_candidate_page(&page.body, &page.final_url)?;
            tracing::debug!(id = record.id, "candidate created");
            return Ok(CreateResult::Created(record));
        }

        let message = parsers::form::error_message(&page.body)
            .unwrap_or_else(|| format!("The CRM rejected the submission (status {})", page.status));
        Ok(CreateResult::ValidationError(message))
    }

    /// Submit value of the owner-select option labelled with the configured
    /// user's email, when both exist.
    async fn owner_option(&self, form_html: &str) -> Option<String> {
        let email = self.owner_email().await?;
        parsers::form::owner_option_value(form_html, &email)
    }
}
