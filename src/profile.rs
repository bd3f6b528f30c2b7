use std::io::{self, Write};

use crate::error::{FolioError, Result};
use crate::fetch::{FetchJson, HttpFetcher};
use console::style;
use serde::{Deserialize, Serialize};

pub const GITHUB_API: &str = "https://api.github.com";

/// The four counters the profile widget shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub login: Option<String>,
    pub public_repos: u64,
    pub public_gists: u64,
    pub followers: u64,
    pub following: u64,
}

const MAX_USERNAME_LEN: usize = 39;

/// Profile endpoint for `username`. Only ASCII letters, digits and hyphens are
/// accepted, so nothing can leak into the path or query.
pub fn profile_url(username: &str) -> Result<String> {
    let name = username.trim();
    let valid = !name.is_empty()
        && name.len() <= MAX_USERNAME_LEN
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if !valid {
        return Err(FolioError::InvalidUsername(username.to_string()));
    }
    Ok(format!("{GITHUB_API}/users/{name}"))
}

pub fn fetch_profile(fetcher: &dyn FetchJson, username: &str) -> Result<ProfileStats> {
    let value = fetcher.fetch_json(&profile_url(username)?)?;
    Ok(serde_json::from_value(value)?)
}

/// Best-effort load: failures are logged and hide the widget.
pub fn load_profile(fetcher: &dyn FetchJson, username: &str) -> Option<ProfileStats> {
    match fetch_profile(fetcher, username) {
        Ok(stats) => Some(stats),
        Err(err) => {
            tracing::warn!(username, %err, "could not load GitHub profile");
            None
        }
    }
}

pub fn exec(username: &str, json: bool) -> anyhow::Result<()> {
    write_profile(&HttpFetcher::new(), username, json, &mut io::stdout().lock())?;
    Ok(())
}

/// Print the widget. A failed load prints a dim notice (or `null` in JSON mode)
/// and still succeeds.
fn write_profile(
    fetcher: &dyn FetchJson,
    username: &str,
    json: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    let stats = load_profile(fetcher, username);

    if json {
        let text = serde_json::to_string_pretty(&stats).map_err(io::Error::from)?;
        return writeln!(out, "{text}");
    }

    let Some(stats) = stats else {
        return writeln!(out, "{}", style("Profile unavailable").dim());
    };

    let login = stats.login.as_deref().unwrap_or(username);
    writeln!(out, "{}", style(format!("GitHub: {login}")).bold())?;
    writeln!(out, "{}", "─".repeat(30))?;
    writeln!(out, "{:<16} {:>8}", "Public repos", stats.public_repos)?;
    writeln!(out, "{:<16} {:>8}", "Public gists", stats.public_gists)?;
    writeln!(out, "{:<16} {:>8}", "Followers", stats.followers)?;
    writeln!(out, "{:<16} {:>8}", "Following", stats.following)
}
