//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};

/// Generate secretbox keys and encrypt or decrypt strings as base64 blobs.
///
/// Keys may be passed with `--key` or, to keep them out of the process list,
/// through the `CRYPTOHELPER_KEY` environment variable.
#[derive(Debug, Parser)]
#[command(name = "cryptohelper")]
#[command(version)]
pub struct Cli {
    /// Output format for results and errors.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The bare value on a single line.
    Text,
    /// One JSON object per invocation.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print a fresh random 32-byte key, base64-encoded.
    GenerateKey,

    /// Encrypt PLAINTEXT (or stdin, verbatim) into a base64 blob.
    Encrypt {
        /// Base64 key; defaults to `CRYPTOHELPER_KEY`.
        #[arg(long)]
        key: Option<String>,

        /// Text to encrypt. Read from stdin when omitted.
        plaintext: Option<String>,
    },

    /// Decrypt a base64 blob given as CIPHERTEXT (or on stdin).
    Decrypt {
        /// Base64 key; defaults to `CRYPTOHELPER_KEY`.
        #[arg(long)]
        key: Option<String>,

        /// Blob produced by `encrypt`. Read from stdin when omitted.
        ciphertext: Option<String>,
    },
}

impl Command {
    /// Subcommand name, for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GenerateKey => "generate-key",
            Command::Encrypt { .. } => "encrypt",
            Command::Decrypt { .. } => "decrypt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_with_key_and_positional() {
        let cli = Cli::try_parse_from(["cryptohelper", "encrypt", "--key", "k", "hello"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(
            cli.command,
            Command::Encrypt {
                key: Some("k".into()),
                plaintext: Some("hello".into()),
            }
        );
    }

    #[test]
    fn format_flag_is_global() {
        let cli = Cli::try_parse_from(["cryptohelper", "decrypt", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.command.name(), "decrypt");
    }

    #[test]
    fn generate_key_takes_no_arguments() {
        assert!(Cli::try_parse_from(["cryptohelper", "generate-key", "extra"]).is_err());
    }
}
