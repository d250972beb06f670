use std::time::Duration;

use log::{debug, error, info, trace, warn};
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::role::{Role, RoleCatalog, RoleKind};
use crate::session::Session;
use crate::user::User;

const LOGIN_PATH: &str = "token/v2/authenticate";
const LOGOUT_PATH: &str = "token";
const USERS_PATH: &str = "smc-users/rest/v1/users";
const XSRF_HEADER: &str = "X-XSRF-TOKEN";

pub const LOGOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Every list endpoint wraps its records like this.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// An SMC we haven't logged in to yet.
pub struct Smc {
    client: Client,
    base_url: String,
}

/// A logged in session. Dropping this without `logout` leaves the
/// session open on the SMC until it expires.
pub struct SmcAuthed {
    smc: Smc,
    session: Session,
}

impl Smc {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url();

        // SMCs usually run with a self-signed certificate
        warn!("certificate verification is disabled for {base_url}");

        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(config.timeout)
            .build()
            .map_err(|source| {
                error!("couldn't build http client: {source:?}");
                Error::Client { source }
            })?;

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn login(self, username: &str, password: &str) -> Result<SmcAuthed> {
        let url = self.url(LOGIN_PATH);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|source| {
                error!("login request to {url} could not be sent: {source:?}");
                Error::Transport { source }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("login as {username} failed: {status}");
            return Err(Error::Auth { status });
        }

        let session = Session::from_headers(response.headers());
        info!("{username} logged in");

        Ok(SmcAuthed { smc: self, session })
    }
}

impl SmcAuthed {
    fn with_session(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(cookies) = self.session.cookie_header() {
            request = request.header(COOKIE, cookies);
        }
        request
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, resource: &'static str) -> Result<Vec<T>> {
        let url = self.smc.url(path);
        trace!("GET {url}");

        let response = self
            .with_session(self.smc.client.get(&url))
            .send()
            .await
            .map_err(|source| {
                error!("request for {resource} could not be sent: {source:?}");
                Error::Request { resource, source }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("fetching {resource} failed: {status}");
            return Err(Error::Fetch { resource, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| {
                error!("reading {resource} response: {source:?}");
                Error::Request { resource, source }
            })?;

        let Envelope { data } = serde_json::from_slice(&body).map_err(|source| {
            error!("couldn't decode {resource}: {source:?}");
            Error::Decode { resource, source }
        })?;

        info!("fetched {} {resource}", data.len());
        Ok(data)
    }

    pub async fn roles(&self, kind: RoleKind) -> Result<RoleCatalog> {
        let roles: Vec<Role> = self.list(kind.path(), kind.resource()).await?;
        Ok(RoleCatalog::new(kind, roles))
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.list(USERS_PATH, "users").await
    }

    /// Close the session. Always bounded by `LOGOUT_TIMEOUT`, whatever
    /// the configured request timeout.
    pub async fn logout(self) -> Result<()> {
        let url = self.smc.url(LOGOUT_PATH);
        debug!("DELETE {url}");

        let mut request = self
            .with_session(self.smc.client.delete(&url))
            .timeout(LOGOUT_TIMEOUT);

        if let Some(token) = self.session.xsrf_token() {
            match HeaderValue::from_str(token) {
                Ok(token) => request = request.header(XSRF_HEADER, token),
                Err(e) => warn!("unusable xsrf token: {e:?}"),
            }
        }

        let response = request.send().await.map_err(|source| {
            error!("logout request could not be sent: {source:?}");
            Error::LogoutRequest { source }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("logout returned {status}");
            return Err(Error::LogoutStatus { status });
        }

        info!("logged out");
        Ok(())
    }
}
