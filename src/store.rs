use crate::cli::CommonArgs;
use crate::error::{FolioError, Result};
use anyhow::Context;
use console::style;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const STORE_SCHEMA_VERSION: i64 = 1;
pub const COLOR_SCHEME_KEY: &str = "colorScheme";

/// Colour scheme preference, stored as its CSS `color-scheme` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Automatic,
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_css(&self) -> &'static str {
        match self {
            ColorScheme::Automatic => "light dark",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Automatic => "Automatic",
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }

    /// Automatic → Light → Dark → Automatic.
    pub fn next(self) -> Self {
        match self {
            ColorScheme::Automatic => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Automatic,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

impl FromStr for ColorScheme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light dark" | "auto" | "automatic" => Ok(ColorScheme::Automatic),
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(FolioError::InvalidPreference(format!(
                "unknown color scheme '{other}' (expected light, dark or auto)"
            ))),
        }
    }
}

/// Local key/value preference store backed by SQLite.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new<P: AsRef<Path>>(store_dir: Option<P>) -> Result<Self> {
        let dir = match store_dir {
            Some(path) => path.as_ref().to_path_buf(),
            None => std::env::current_dir()?.join(".folio"),
        };
        std::fs::create_dir_all(&dir)?;
        let conn = Connection::open(dir.join("preferences.db"))?;
        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            ",
        )?;
        self.check_schema_version()
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            self.conn
                .execute_batch(&format!("PRAGMA user_version = {STORE_SCHEMA_VERSION};"))?;
        } else if user_version != STORE_SCHEMA_VERSION {
            return Err(FolioError::Store(format!(
                "Schema version mismatch: expected {}, found {}",
                STORE_SCHEMA_VERSION, user_version
            )));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM preferences WHERE key = ?",
            params![key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Stored scheme, or automatic when unset or unreadable.
    pub fn color_scheme(&self) -> ColorScheme {
        match self.get(COLOR_SCHEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring stored color scheme");
                ColorScheme::default()
            }),
            Ok(None) => ColorScheme::default(),
            Err(err) => {
                tracing::warn!(%err, "could not read color scheme preference");
                ColorScheme::default()
            }
        }
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) -> Result<()> {
        self.set(COLOR_SCHEME_KEY, scheme.as_css())?;
        tracing::info!(scheme = scheme.as_css(), "color scheme changed");
        Ok(())
    }
}

/// Print the stored scheme, or store a new one.
pub fn exec_theme(common: &CommonArgs, scheme: Option<&str>) -> anyhow::Result<()> {
    let mut store = Store::new(common.store.as_ref()).context("Failed to open preference store")?;

    match scheme {
        Some(raw) => {
            let scheme: ColorScheme = raw.parse()?;
            store
                .set_color_scheme(scheme)
                .context("Failed to save color scheme")?;
            println!("Theme set to {}", style(scheme.label()).bold());
        }
        None => {
            let scheme = store.color_scheme();
            println!("{} ({})", style(scheme.label()).bold(), scheme.as_css());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn unset_scheme_defaults_to_automatic() {
        let dir = tempdir().unwrap();
        let store = Store::new(Some(dir.path())).unwrap();
        assert_eq!(store.color_scheme(), ColorScheme::Automatic);
        assert_eq!(store.color_scheme().as_css(), "light dark");
    }

    #[test]
    fn scheme_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = Store::new(Some(dir.path())).unwrap();
            store.set_color_scheme(ColorScheme::Dark).unwrap();
        }
        let store = Store::new(Some(dir.path())).unwrap();
        assert_eq!(store.color_scheme(), ColorScheme::Dark);
        assert_eq!(store.get(COLOR_SCHEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn garbage_in_the_store_reads_as_default() {
        let dir = tempdir().unwrap();
        let mut store = Store::new(Some(dir.path())).unwrap();
        store.set(COLOR_SCHEME_KEY, "sepia").unwrap();
        assert_eq!(store.color_scheme(), ColorScheme::Automatic);
    }

    #[test]
    fn schemes_parse_and_cycle() {
        assert_eq!("light dark".parse::<ColorScheme>().unwrap(), ColorScheme::Automatic);
        assert_eq!("Auto".parse::<ColorScheme>().unwrap(), ColorScheme::Automatic);
        assert_eq!("DARK".parse::<ColorScheme>().unwrap(), ColorScheme::Dark);
        assert!("blue".parse::<ColorScheme>().is_err());
        assert_eq!(ColorScheme::Dark.next(), ColorScheme::Automatic);
    }

    #[test]
    fn schema_mismatch_is_reported() {
        let dir = tempdir().unwrap();
        {
            let conn = Connection::open(dir.path().join("preferences.db")).unwrap();
            conn.execute_batch("PRAGMA user_version = 7;").unwrap();
        }
        assert!(matches!(Store::new(Some(dir.path())), Err(FolioError::Store(_))));
    }
}
