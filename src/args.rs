use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{self, Config, Delimiter};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The SMC to report on. Either a host name (https is assumed)
    /// or a full base url.
    #[arg(long, env = "SMC_HOST", default_value = config::LOCALHOST)]
    host: String,

    /// User to log in as.
    #[arg(short, long, env = "SMC_USER", default_value = "admin")]
    user: String,

    /// Password for `user`.
    #[arg(short, long, env = "SMC_PASSWORD", hide_env_values = true)]
    password: String,

    /// Tenant (domain) id, for reference only. On the SMC, run
    /// `ls /lancope/var/smc/config/domain_*` to find it.
    #[arg(short, long, env = "SMC_TENANT_ID")]
    tenant: Option<String>,

    /// Where to write the report. Defaults to the SMC's tmp directory
    /// when run against localhost, otherwise ./UserReport.csv.
    #[arg(short, long, env = "SMC_OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Don't echo the report to stdout.
    #[arg(short, long, env = "SMC_QUIET")]
    quiet: bool,

    /// Column delimiter for the report.
    #[arg(short, long, env = "SMC_DELIMITER", value_enum, default_value_t = Delimiter::Comma)]
    delimiter: Delimiter,

    /// Per-request timeout, in seconds.
    #[arg(long, env = "SMC_TIMEOUT", default_value_t = 30)]
    timeout: u64,
}

impl Args {
    pub fn into_config(self) -> Config {
        let output = self
            .output
            .unwrap_or_else(|| config::default_output(&self.host));

        Config {
            host: self.host,
            username: self.user,
            password: self.password,
            tenant: self.tenant,
            output,
            quiet: self.quiet,
            delimiter: self.delimiter,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
