use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::{Layout, Report};
use crate::role::RoleKind;
use crate::smc::{Smc, SmcAuthed};
use crate::time::Timestamp;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_PARTIAL: u8 = 2;

#[derive(Debug)]
pub struct ReportWritten {
    pub path: PathBuf,
    pub users: usize,
}

/// Log in, collect everything, log out, then write the report, echoing
/// it to `console` unless the config is quiet.
///
/// A failure after login still logs out and writes whatever was
/// collected, marked as partial, before the failure is returned.
pub async fn run(config: &Config, console: &mut impl Write) -> Result<ReportWritten> {
    if let Some(tenant) = &config.tenant {
        info!("tenant {tenant} (for reference only)");
    }

    let smc = Smc::new(config)?
        .login(&config.username, &config.password)
        .await?;

    let mut report = Report::new(Timestamp::now());
    let collected = collect(&smc, &mut report).await;

    if let Err(e) = smc.logout().await {
        warn!("logout failed, session may linger until it expires: {e}");
    }

    if let Err(e) = &collected {
        report.mark_partial(e.to_string());
    }

    if let Err(io) = emit(config, &report, console) {
        // the write failure is what gets returned, so surface the fetch one here
        if let Err(e) = &collected {
            error!("{e}");
            let _ = writeln!(console, "{e}");
        }
        return Err(io);
    }

    let users = collected?;
    Ok(ReportWritten {
        path: config.output.clone(),
        users,
    })
}

async fn collect(smc: &SmcAuthed, report: &mut Report) -> Result<usize> {
    // every catalog must be loaded before users can be joined
    for kind in RoleKind::ALL {
        report.add_catalog(smc.roles(kind).await?);
    }

    let users = smc.users().await?;
    report.add_users(&users);

    Ok(users.len())
}

fn emit(config: &Config, report: &Report, console: &mut impl Write) -> Result<()> {
    let path = &config.output;

    fs::write(path, report.render(config.delimiter, Layout::Plain)).map_err(|source| {
        error!("couldn't write report to {path:?}: {source:?}");
        Error::Io {
            path: path.clone(),
            source,
        }
    })?;
    if report.is_partial() {
        warn!("partial report written to {path:?}");
    } else {
        info!("report written to {path:?}");
    }

    if !config.quiet {
        let padded = report.render(config.delimiter, Layout::Padded);
        if let Err(e) = console
            .write_all(padded.as_bytes())
            .and_then(|()| console.flush())
        {
            warn!("couldn't echo report: {e}");
        }
    }

    Ok(())
}

/// Tell the operator how the run went and pick the exit status.
pub fn conclude(
    outcome: &Result<ReportWritten>,
    config: &Config,
    program: &str,
    console: &mut impl Write,
) -> u8 {
    let (status, lines) = match outcome {
        Ok(_) if config.quiet => (EXIT_OK, vec![]),
        Ok(written) => (EXIT_OK, vec![done_line(program, written)]),
        Err(e) if e.is_login_failure() => (
            EXIT_FAILED,
            vec![e.to_string(), "no report was written".to_string()],
        ),
        Err(e) if e.is_partial() => (
            EXIT_PARTIAL,
            vec![e.to_string(), partial_line(&config.output)],
        ),
        Err(e) => (EXIT_FAILED, vec![e.to_string()]),
    };

    if let Err(e) = &outcome {
        error!("{e}");
    }
    for line in lines {
        if let Err(e) = writeln!(console, "{line}") {
            warn!("couldn't write to console: {e}");
        }
    }

    status
}

fn done_line(program: &str, written: &ReportWritten) -> String {
    format!(
        "\n  {program} done.  {} users. Check for output in {}",
        written.users,
        written.path.display()
    )
}

fn partial_line(path: &Path) -> String {
    format!("partial report written to {}", path.display())
}
