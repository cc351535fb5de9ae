//! Line-oriented login and journal screens.
//!
//! Everything reads from a `BufRead` and writes to a `Write` so the whole
//! flow can be scripted in tests.

use std::io::{self, BufRead, Write};

use chrono::Local;
use reflect_auth::{CredentialError, CredentialStore};
use reflect_journal::EntryStore;
use reflect_types::models::Entry;
use tracing::{info, warn};

pub const MAX_LOGIN_ATTEMPTS: u32 = 3;
pub const QUIT_COMMAND: &str = ":q";

const DISPLAY_FORMAT: &str = "%b %d, %Y at %I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    Rejected,
    Closed,
}

/// Login, then the journal if login succeeded.
pub fn run<R, W>(
    credentials: &CredentialStore,
    entries: &EntryStore,
    mut input: R,
    mut out: W,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    match login(credentials, &mut input, &mut out)? {
        LoginOutcome::LoggedIn => journal(entries, &mut input, &mut out),
        LoginOutcome::Rejected => {
            writeln!(out, "Too many failed attempts.")?;
            Ok(())
        }
        LoginOutcome::Closed => Ok(()),
    }
}

pub fn login<R, W>(credentials: &CredentialStore, input: &mut R, out: &mut W) -> io::Result<LoginOutcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Welcome to Your Journal!")?;

    if !credentials.exists() {
        writeln!(out, "No account yet. Create one to get started.")?;
        if !register(credentials, input, out)? {
            return Ok(LoginOutcome::Closed);
        }
    }

    for _ in 0..MAX_LOGIN_ATTEMPTS {
        let Some((username, password)) = read_credentials(input, out)? else {
            return Ok(LoginOutcome::Closed);
        };

        if credentials.authenticate(&username, &password) {
            writeln!(out, "Login successful!")?;
            info!("User {} logged in", username);
            return Ok(LoginOutcome::LoggedIn);
        }
        writeln!(out, "Invalid username or password!")?;
    }

    warn!("Login abandoned after {} failed attempts", MAX_LOGIN_ATTEMPTS);
    Ok(LoginOutcome::Rejected)
}

/// Prompt until an account is created. Returns false if input ran out first.
fn register<R, W>(credentials: &CredentialStore, input: &mut R, out: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    loop {
        let Some((username, password)) = read_credentials(input, out)? else {
            return Ok(false);
        };

        if username.is_empty() || password.is_empty() {
            writeln!(out, "Username and password cannot be empty!")?;
            continue;
        }

        match credentials.register(&username, &password) {
            Ok(()) => {
                writeln!(out, "Account created! Please login.")?;
                return Ok(true);
            }
            Err(CredentialError::AlreadyExists(_)) => {
                writeln!(out, "Username already exists!")?;
            }
            Err(_) => {
                writeln!(out, "Could not create account.")?;
            }
        }
    }
}

/// Show the journal and post every non-empty line until `:q` or end of input.
pub fn journal<R, W>(store: &EntryStore, input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    // A failed load still lets the user write; the error is in the log.
    let entries = store.load_all().unwrap_or_default();

    writeln!(out, "=== My Journal ===")?;
    render(&entries, out)?;
    writeln!(out, "Type an entry and press Enter to post it, {} to quit.", QUIT_COMMAND)?;

    loop {
        let Some(line) = prompt(input, out, "> ")? else {
            return Ok(());
        };
        if line == QUIT_COMMAND {
            return Ok(());
        }
        if line.is_empty() {
            writeln!(out, "Entry cannot be empty")?;
            continue;
        }

        match store.append_now(&line) {
            Ok(entry) => render_entry(&entry, out)?,
            Err(_) => writeln!(out, "Failed to save entry.")?,
        }
    }
}

/// Most recent first.
pub fn render<W: Write>(entries: &[Entry], out: &mut W) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "Your journal is empty. Start writing!");
    }
    for entry in entries.iter().rev() {
        render_entry(entry, out)?;
    }
    Ok(())
}

fn render_entry<W: Write>(entry: &Entry, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format_timestamp(entry))?;
    for line in entry.body.lines() {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

pub fn format_timestamp(entry: &Entry) -> String {
    entry
        .timestamp
        .with_timezone(&Local)
        .format(DISPLAY_FORMAT)
        .to_string()
}

fn read_credentials<R, W>(input: &mut R, out: &mut W) -> io::Result<Option<(String, String)>>
where
    R: BufRead,
    W: Write,
{
    let Some(username) = prompt(input, out, "Username: ")? else {
        return Ok(None);
    };
    let Some(password) = prompt(input, out, "Password: ")? else {
        return Ok(None);
    };
    Ok(Some((username, password)))
}

/// Print `label`, read one line, and trim it. `None` at end of input.
fn prompt<R, W>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
