//! Subcommand execution and output rendering.

use std::io::{Read, Write};

use common::protocol::{DecryptResponse, EncryptResponse, ErrorResponse, KeyResponse};
use common::ServiceError;
use cryptohelper::{CipherError, RandomSource, SecretboxCodec};
use tracing::debug;

use crate::cli::{Command, OutputFormat};
use crate::config::{Config, ENV_PREFIX};

/// Result of a successful subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Key(KeyResponse),
    Encrypted(EncryptResponse),
    Decrypted(DecryptResponse),
}

impl Output {
    /// Render for stdout in the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Internal`] if JSON serialisation fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, ServiceError> {
        if format == OutputFormat::Text {
            return Ok(match self {
                Output::Key(r) => r.key.clone(),
                Output::Encrypted(r) => r.ciphertext.clone(),
                Output::Decrypted(r) => r.plaintext.clone(),
            });
        }
        let json = match self {
            Output::Key(r) => serde_json::to_string(r),
            Output::Encrypted(r) => serde_json::to_string(r),
            Output::Decrypted(r) => serde_json::to_string(r),
        };
        json.map_err(|e| ServiceError::Internal(e.to_string()))
    }

    /// Write the rendered output to `out`.
    ///
    /// Decrypted plaintext in text mode is written verbatim so it round-trips
    /// byte-for-byte; everything else is followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] if `out` cannot be written.
    pub fn write_to<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<(), ServiceError> {
        let rendered = self.render(format)?;
        let verbatim = format == OutputFormat::Text && matches!(self, Output::Decrypted(_));
        let written = if verbatim {
            out.write_all(rendered.as_bytes())
        } else {
            writeln!(out, "{rendered}")
        };
        written
            .and_then(|()| out.flush())
            .map_err(|e| ServiceError::Unavailable(format!("failed to write stdout: {e}")))
    }
}

/// Log a failed command at debug level and render it for stderr.
///
/// The rendered error is the only thing written to stderr at the default
/// log level.
pub fn report_error(err: &ServiceError, format: OutputFormat) -> String {
    debug!(code = err.code(), "command failed");
    render_error(err, format)
}

/// Render an error for stderr in the requested format.
pub fn render_error(err: &ServiceError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("ERROR: {err}"),
        OutputFormat::Json => serde_json::to_string(&ErrorResponse::from(err))
            .unwrap_or_else(|_| format!("ERROR: {err}")),
    }
}

/// Execute `command`, reading omitted positional input from `stdin`.
///
/// # Errors
///
/// Returns a [`ServiceError`] classifying the failure; see [`classify`].
pub fn run<R, I>(
    codec: &SecretboxCodec<R>,
    command: Command,
    cfg: &Config,
    stdin: I,
) -> Result<Output, ServiceError>
where
    R: RandomSource,
    I: Read,
{
    match command {
        Command::GenerateKey => {
            let key = codec.generate_key().map_err(classify)?;
            Ok(Output::Key(KeyResponse { key }))
        }
        Command::Encrypt { key, plaintext } => {
            let key = resolve_key(key, cfg)?;
            let plaintext = match plaintext {
                Some(p) => p,
                None => read_stdin(stdin)?,
            };
            let ciphertext = codec.encrypt(&plaintext, &key).map_err(classify)?;
            Ok(Output::Encrypted(EncryptResponse { ciphertext }))
        }
        Command::Decrypt { key, ciphertext } => {
            let key = resolve_key(key, cfg)?;
            let ciphertext = match ciphertext {
                Some(c) => c,
                None => read_stdin(stdin)?,
            };
            let plaintext = codec
                .decrypt(ciphertext.trim(), &key)
                .map_err(classify)?;
            Ok(Output::Decrypted(DecryptResponse { plaintext }))
        }
    }
}

/// Map a library error onto the CLI's error classes.
pub fn classify(err: CipherError) -> ServiceError {
    match err {
        CipherError::RandomSourceFailure(_) => ServiceError::Unavailable(err.to_string()),
        CipherError::InvalidKey | CipherError::MalformedCiphertext => {
            ServiceError::BadInput(err.to_string())
        }
        CipherError::AuthenticationFailure => ServiceError::AuthenticationFailed(err.to_string()),
        CipherError::InvalidUtf8Plaintext => ServiceError::BadInput(err.to_string()),
        CipherError::SealFailure => ServiceError::Internal(err.to_string()),
    }
}

/// `--key` wins over `CRYPTOHELPER_KEY`.
fn resolve_key(flag: Option<String>, cfg: &Config) -> Result<String, ServiceError> {
    flag.or_else(|| cfg.key.clone()).ok_or_else(|| {
        ServiceError::BadInput(format!("no key given: pass --key or set {ENV_PREFIX}_KEY"))
    })
}

fn read_stdin<I: Read>(mut stdin: I) -> Result<String, ServiceError> {
    let mut buf = String::new();
    match stdin.read_to_string(&mut buf) {
        Ok(n) => {
            debug!(bytes = n, "read input from stdin");
            Ok(buf)
        }
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            Err(ServiceError::BadInput("stdin is not valid UTF-8".into()))
        }
        Err(e) => Err(ServiceError::Unavailable(format!("failed to read stdin: {e}"))),
    }
}
