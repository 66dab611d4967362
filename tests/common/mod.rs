// Shared mock transport for the offline flow tests: canned pages keyed by
// method + URL, with every call recorded so tests can assert on request
// order and submitted form fields.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use talentis_core::{
    CrmError, MemoryCredentialStore, Page, Result, TalentisClient, Transport,
};

pub const BASE: &str = "http://crm.test";

pub const LOGGED_IN_HOME: &str =
    r#"<html><body><a href="/users/sign_out">Log out</a></body></html>"#;

pub const TOKEN_FORM: &str =
    r#"<html><body><form><input type="hidden" name="authenticity_token" value="tok123"></form></body></html>"#;

pub fn detail_page(name: &str) -> String {
    format!("<html><body><h1>{name}</h1></body></html>")
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub url: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(String, String), Page>>,
    failures: Mutex<Vec<(String, String)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned response for `GET url`.
    pub fn on_get(self, url: &str, final_url: &str, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            ("GET".to_string(), url.to_string()),
            Page {
                final_url: final_url.to_string(),
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    /// Canned response for `POST url`.
    pub fn on_post(self, url: &str, final_url: &str, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            ("POST".to_string(), url.to_string()),
            Page {
                final_url: final_url.to_string(),
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    /// Makes `method url` fail with a server-error transport fault.
    pub fn failing(self, method: &str, url: &str) -> Self {
        self.failures
            .lock()
            .unwrap()
            .push((method.to_string(), url.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// How many POSTs went to `url`.
    pub fn posts_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == "POST" && call.url == url)
            .count()
    }

    /// Position of the first call to `url`, any method.
    pub fn call_index(&self, url: &str) -> Option<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .position(|call| call.url == url)
    }

    fn respond(&self, method: &str, url: &str, fields: Vec<(String, String)>) -> Result<Page> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            url: url.to_string(),
            fields,
        });
        if self
            .failures
            .lock()
            .unwrap()
            .iter()
            .any(|(m, u)| m == method && u == url)
        {
            return Err(CrmError::UnexpectedStatus {
                status: 503,
                url: url.to_string(),
            });
        }
        match self
            .routes
            .lock()
            .unwrap()
            .get(&(method.to_string(), url.to_string()))
        {
            Some(page) => Ok(page.clone()),
            // Unrouted requests land nowhere interesting: same URL, empty 404.
            None => Ok(Page {
                final_url: url.to_string(),
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Page> {
        self.respond("GET", url, Vec::new())
    }

    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page> {
        self.respond("POST", url, fields.to_vec())
    }
}

/// Client wired to the mock transport and an in-memory credential store.
pub fn client_with(mock: Arc<MockTransport>, store: MemoryCredentialStore) -> TalentisClient {
    TalentisClient::with_parts(BASE, mock, Arc::new(store))
}
