use crate::config::{CredentialStore, EnvCredentialStore};
use crate::error::{CrmError, Result};
use crate::parsers;
use crate::transport::{HttpTransport, Page, Transport};
use crate::urls::is_login_url;
use scraper::{Html, Selector};
use std::sync::Arc;

const SIGN_IN_PATH: &str = "/users/sign_in";

/// Headless client for the Talentis CRM.
///
/// The CRM has no API; every operation here drives the same HTML pages and
/// form posts a browser would. One client value owns one cookie session;
/// dropping the client drops the session.
pub struct TalentisClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) credentials: Arc<dyn CredentialStore>,
    pub(crate) base_url: String,
}

impl TalentisClient {
    /// Client against the given CRM instance, speaking real HTTP with
    /// environment-backed credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_parts(
            base_url,
            Arc::new(HttpTransport::new()),
            Arc::new(EnvCredentialStore::new()),
        )
    }

    /// Client with explicit transport and credential store, the seam the
    /// offline tests plug canned pages into.
    pub fn with_parts(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            credentials,
            base_url,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET relative to the CRM base. Landing on the sign-in page mid-flow
    /// means the cookie session died underneath us.
    pub(crate) async fn get_page(&self, path: &str) -> Result<Page> {
        let page = self.transport.get(&self.url(path)).await?;
        if is_login_url(&page.final_url) {
            return Err(CrmError::SessionExpired);
        }
        Ok(page)
    }

    /// True when the ambient cookie session is still accepted by the CRM.
    ///
    /// The CRM exposes no status endpoint, so this fetches the root page
    /// and applies two heuristics: a redirect onto the sign-in path means
    /// the session is gone, and an authenticated page always carries a
    /// sign-out link.
    pub async fn check_authenticated(&self) -> Result<bool> {
        let page = self.transport.get(&self.url("/")).await?;
        if is_login_url(&page.final_url) {
            return Ok(false);
        }
        Ok(has_logout_link(&page.body))
    }

    /// Logs into the CRM with the given credentials.
    ///
    /// Mirrors the browser flow: fetch the sign-in form, lift its
    /// anti-forgery token, post the filled form. The CRM re-renders the
    /// sign-in page on bad credentials and redirects away on success, so
    /// the final URL is the only success signal.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let form_page = self.transport.get(&self.url(SIGN_IN_PATH)).await?;
        let token =
            parsers::token::extract_token(&form_page.body).ok_or(CrmError::TokenNotFound)?;

        let fields = vec![
            ("authenticity_token".to_string(), token),
            ("user[email]".to_string(), email.to_string()),
            ("user[password]".to_string(), password.to_string()),
            ("commit".to_string(), "Log in".to_string()),
        ];
        let page = self
            .transport
            .post_form(&self.url(SIGN_IN_PATH), &fields)
            .await?;

        if is_login_url(&page.final_url) {
            tracing::warn!(final_url = %page.final_url, "login rejected by the CRM");
            return Err(CrmError::AuthenticationFailed);
        }
        tracing::debug!("CRM session established");
        Ok(())
    }

    /// Makes sure an authenticated session exists, logging in with the
    /// stored credentials when it does not. Never fails: transport trouble,
    /// missing credentials and rejected logins all come back as `false`.
    pub async fn ensure_session(&self) -> bool {
        match self.check_authenticated().await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "could not probe the CRM session");
                return false;
            }
        }

        match self.login_with_stored().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "could not log into the CRM");
                false
            }
        }
    }

    async fn login_with_stored(&self) -> Result<()> {
        let creds = self
            .credentials
            .credentials()
            .await
            .ok_or(CrmError::MissingCredentials)?;
        self.login(&creds.email, &creds.password).await
    }

    /// Email of the user the session belongs to, per the credential store.
    pub(crate) async fn owner_email(&self) -> Option<String> {
        self.credentials.credentials().await.map(|c| c.email)
    }
}

fn has_logout_link(html: &str) -> bool {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").unwrap();
    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .any(|href| href.contains("/users/sign_out"))
}
