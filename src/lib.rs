// Declare all our modules
mod client;
mod config;
mod creator;
mod error;
mod models;
mod resolver;
mod transport;
mod urls;

pub mod parsers;

// Publicly export the parts of the library that hosts will need
pub use client::TalentisClient;
pub use config::{CredentialStore, Credentials, EnvCredentialStore, MemoryCredentialStore};
pub use error::{CrmError, Result};
pub use models::*; // Exposes CandidateRecord, LookupResult, CreateResult, etc.
pub use transport::{HttpTransport, Page, Transport};
pub use urls::{
    candidate_id_from_url, detail_page_id, is_profile_url, normalize_profile_url, profile_slug,
    tokens_from_slug,
};
