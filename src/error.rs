use std::path::PathBuf;
use std::result;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("login request could not be sent: {source}")]
    Transport { source: reqwest::Error },

    #[error("an error has occurred while logging in, with the following code: {status}")]
    Auth { status: StatusCode },

    #[error("couldn't build http client: {source}")]
    Client { source: reqwest::Error },

    #[error("an error has occurred while fetching {resource}, with the following code: {status}")]
    Fetch {
        resource: &'static str,
        status: StatusCode,
    },

    #[error("request for {resource} could not be sent: {source}")]
    Request {
        resource: &'static str,
        source: reqwest::Error,
    },

    #[error("unexpected response while fetching {resource}: {source}")]
    Decode {
        resource: &'static str,
        source: serde_json::Error,
    },

    #[error("logout request could not be sent: {source}")]
    LogoutRequest { source: reqwest::Error },

    #[error("logout was refused, with the following code: {status}")]
    LogoutStatus { status: StatusCode },

    #[error("couldn't write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// Failures before a session exists; no report is produced for these.
    pub fn is_login_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Auth { .. } | Self::Client { .. }
        )
    }

    /// Failures after login that cut the report short.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Request { .. } | Self::Decode { .. }
        )
    }
}
