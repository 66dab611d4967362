use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Request to the CRM failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Failed to parse CRM markup: {0}")]
    Parsing(String),

    #[error("The CRM session appears to have expired")]
    SessionExpired,

    #[error("Authentication failed. Please check your credentials.")]
    AuthenticationFailed,

    #[error("No CRM credentials are configured")]
    MissingCredentials,

    #[error("Could not find an anti-forgery token on the page")]
    TokenNotFound,
}

pub type Result<T> = std::result::Result<T, CrmError>;
