//! Login prompt and credential check.

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::session::read_line;

/// Wrong logins allowed before the program gives up.
pub const MAX_ATTEMPTS: u32 = 3;

/// Where the password is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    /// Hidden prompt on the controlling terminal.
    Terminal,
    /// The next line of the session input, echoed.
    Input,
}

impl PasswordSource {
    /// `Terminal` when stdin is a TTY.
    pub fn detect() -> Self {
        if io::stdin().is_terminal() {
            PasswordSource::Terminal
        } else {
            PasswordSource::Input
        }
    }
}

/// True if both values equal the configured credentials.
pub fn credentials_match(config: &AppConfig, username: &str, password: &str) -> bool {
    config.username == username && config.password == password
}

/// Asks for a username and a password.
///
/// Returns `None` when the input ends before both were given.
pub fn prompt_credentials<R, W>(
    input: &mut R,
    output: &mut W,
    source: PasswordSource,
) -> io::Result<Option<(String, String)>>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Username: ")?;
    output.flush()?;
    let Some(username) = read_line(input)? else {
        return Ok(None);
    };

    let password = match source {
        PasswordSource::Terminal => rpassword::prompt_password("Password: ")?,
        PasswordSource::Input => {
            write!(output, "Password: ")?;
            output.flush()?;
            match read_line(input)? {
                Some(password) => password,
                None => return Ok(None),
            }
        }
    };

    Ok(Some((username.trim().to_string(), password)))
}

/// Runs the login prompt until the credentials match or
/// [`MAX_ATTEMPTS`] wrong attempts were made.
pub fn login<R, W>(
    config: &AppConfig,
    input: &mut R,
    output: &mut W,
    source: PasswordSource,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    let mut failed = 0;

    while failed < MAX_ATTEMPTS {
        let Some((username, password)) = prompt_credentials(input, output, source)? else {
            break;
        };

        if credentials_match(config, &username, &password) {
            info!(username = %username, "Login succeeded");
            return Ok(());
        }

        failed += 1;
        warn!(username = %username, attempt = failed, "Login failed");
        writeln!(output, "Username or password is incorrect.")?;
    }

    Err(CliError::AuthFailed { attempts: failed })
}
