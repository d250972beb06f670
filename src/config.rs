use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

pub const LOCALHOST: &str = "localhost";

// on the appliance itself, this is served at https://<host>/smc/files/smc/tmp
const ON_APPLIANCE_OUTPUT: &str = "/lancope/var/smc/tmp/UserReport.csv";
const OFF_APPLIANCE_OUTPUT: &str = "./UserReport.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ", ",
            Self::Tab => "\t",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub username: String,
    pub password: String,
    pub tenant: Option<String>,
    pub output: PathBuf,
    pub quiet: bool,
    pub delimiter: Delimiter,
    pub timeout: Duration,
}

impl Config {
    /// `host` may be a bare host name, in which case https is assumed,
    /// or a full base url.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');

        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }
}

pub fn default_output(host: &str) -> PathBuf {
    if host == LOCALHOST {
        ON_APPLIANCE_OUTPUT.into()
    } else {
        OFF_APPLIANCE_OUTPUT.into()
    }
}
