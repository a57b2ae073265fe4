//! Credential resolution for the Table API
//!
//! Credentials come from exactly one source, checked in this order:
//! 1. `--instance` together with `--user` (`name` or `name:password`)
//! 2. `SNOWY_INSTANCE_URL`, `SNOWY_USERNAME` and `SNOWY_PASSWORD`, all set
//! 3. the file given with `--auth-file`
//! 4. `~/.snowy`
//!
//! A credential file holds the instance URL, username and password on its
//! first three lines. Sources are never merged.

use crate::{
    constants::{DEFAULT_AUTH_FILE, ENV_INSTANCE_URL, ENV_PASSWORD, ENV_USERNAME},
    options::AuthOverrides,
};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// Instance URL, username and password, all non-empty.
///
/// The password is redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    instance_url: String,
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("instance_url", &self.instance_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        instance_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            instance_url: instance_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_valid(&self) -> bool {
        !self.instance_url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to read password: {0}")]
    Prompt(#[source] io::Error),

    #[error("invalid --user value: {0}")]
    InvalidUser(&'static str),

    #[error("could not read auth file {}", .path.display())]
    ReadAuthFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "auth file {} must hold the instance URL, username and password on three non-empty lines",
        .path.display()
    )]
    MalformedAuthFile { path: PathBuf },

    #[error(
        "no credentials found: use --instance with --user, set SNOWY_INSTANCE_URL, SNOWY_USERNAME and SNOWY_PASSWORD, or create {}",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("no home directory to look for ~/.snowy in")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, CredentialError>;

/// Reads a secret from the user without echoing it.
pub trait PasswordPrompt {
    fn read_password(&self, prompt: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, prompt: &str) -> io::Result<String> {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(io::Error::other)
    }
}

type EnvLookup<'a> = Box<dyn Fn(&str) -> Option<String> + 'a>;

pub struct CredentialResolver<'a> {
    prompt: &'a dyn PasswordPrompt,
    env: EnvLookup<'a>,
    home: Option<PathBuf>,
}

impl<'a> CredentialResolver<'a> {
    /// A resolver reading the process environment and the user's real home
    /// directory.
    pub fn new(prompt: &'a dyn PasswordPrompt) -> Self {
        Self {
            prompt,
            env: Box::new(|key: &str| std::env::var(key).ok()),
            home: dirs::home_dir(),
        }
    }

    /// Replace the environment lookup.
    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String> + 'a) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Replace the directory searched for the default credential file.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn resolve(&self, auth: &AuthOverrides) -> Result<Credentials> {
        if let Some(creds) = self.from_flags(auth)? {
            tracing::debug!(
                source = "flags",
                instance = creds.instance_url(),
                "resolved credentials"
            );
            return Ok(creds);
        }

        if let Some(creds) = self.from_env() {
            tracing::debug!(
                source = "environment",
                instance = creds.instance_url(),
                "resolved credentials"
            );
            return Ok(creds);
        }

        if let Some(path) = &auth.auth_file {
            let creds = read_auth_file(path)?;
            tracing::debug!(
                source = %path.display(),
                instance = creds.instance_url(),
                "resolved credentials"
            );
            return Ok(creds);
        }

        let home = self.home.as_ref().ok_or(CredentialError::NoHomeDir)?;
        let path = home.join(DEFAULT_AUTH_FILE);
        if !path.exists() {
            return Err(CredentialError::NotFound { path });
        }
        let creds = read_auth_file(&path)?;
        tracing::debug!(
            source = %path.display(),
            instance = creds.instance_url(),
            "resolved credentials"
        );
        Ok(creds)
    }

    fn from_flags(&self, auth: &AuthOverrides) -> Result<Option<Credentials>> {
        let (instance, user) = match (&auth.instance, &auth.user) {
            (Some(i), Some(u)) => (i, u),
            (None, None) => return Ok(None),
            _ => {
                tracing::warn!("--instance and --user must be used together; ignoring them");
                return Ok(None);
            }
        };

        let (username, password) = match user.split_once(':') {
            Some((name, pw)) => (name.to_string(), pw.to_string()),
            None => {
                let pw = self
                    .prompt
                    .read_password("Password")
                    .map_err(CredentialError::Prompt)?;
                (user.clone(), pw.trim().to_string())
            }
        };

        if username.is_empty() {
            return Err(CredentialError::InvalidUser("username is empty"));
        }
        if password.is_empty() {
            return Err(CredentialError::InvalidUser("password is empty"));
        }

        Ok(Some(Credentials::new(
            normalize_instance(instance),
            username,
            password,
        )))
    }

    fn from_env(&self) -> Option<Credentials> {
        let lookup = |key: &str| {
            let value = (self.env)(key).filter(|v| !v.is_empty());
            if value.is_none() {
                tracing::debug!("environment variable {key} is not set");
            }
            value
        };

        let instance_url = lookup(ENV_INSTANCE_URL)?;
        let username = lookup(ENV_USERNAME)?;
        let password = lookup(ENV_PASSWORD)?;
        Some(Credentials::new(instance_url, username, password))
    }
}

/// Prefix `https://` unless the value already carries a scheme.
pub fn normalize_instance(instance: &str) -> String {
    if instance.contains("://") {
        instance.to_string()
    } else {
        format!("https://{instance}")
    }
}

pub fn read_auth_file(path: &Path) -> Result<Credentials> {
    let contents = fs::read_to_string(path).map_err(|source| CredentialError::ReadAuthFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_auth_file(&contents).ok_or_else(|| CredentialError::MalformedAuthFile {
        path: path.to_path_buf(),
    })
}

/// Parse the three-line credential format. Lines are taken as written apart
/// from the line terminator; lines past the third are ignored.
pub fn parse_auth_file(contents: &str) -> Option<Credentials> {
    let mut lines = contents.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));
    let instance_url = lines.next()?;
    let username = lines.next()?;
    let password = lines.next()?;
    let creds = Credentials::new(instance_url, username, password);
    creds.is_valid().then_some(creds)
}
