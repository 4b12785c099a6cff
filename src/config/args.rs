use clap::Parser;
use std::path::PathBuf;

/// Terminal client for a remote video collection
#[derive(Parser, Clone, Debug, Default, PartialEq, Eq)]
#[command(name = "vidman", version, long_about = None)]
pub struct CommandLine {
    /// Read settings from this file instead of the default config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Talk to the video API at this base URL
    #[arg(long, value_name = "BASE_URL")]
    pub server: Option<String>,

    /// Create videos by uploading files instead of linking URLs
    #[arg(long)]
    pub upload: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    #[test]
    fn definition_is_valid() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn parses_all_overrides() {
        let command_line = CommandLine::try_parse_from([
            "vidman",
            "--config",
            "/tmp/vidman.toml",
            "--server",
            "http://localhost:8080/api",
            "--upload",
        ])
        .unwrap();

        assert_eq!(command_line.config, Some(PathBuf::from("/tmp/vidman.toml")));
        assert_eq!(command_line.server.as_deref(), Some("http://localhost:8080/api"));
        assert!(command_line.upload);
    }

    #[test]
    fn no_arguments_means_no_overrides() {
        let command_line = CommandLine::try_parse_from(["vidman"]).unwrap();
        assert_eq!(command_line, CommandLine::default());
    }

    #[test]
    fn flag_without_value_is_an_error() {
        let error = CommandLine::try_parse_from(["vidman", "--server"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let error = CommandLine::try_parse_from(["vidman", "--verbose"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownArgument);
    }
}
