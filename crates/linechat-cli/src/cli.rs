//! Command-line surface.

use clap::Parser;

use linechat_core::{ClientConfig, Target};

#[derive(Parser, Debug)]
#[command(name = "linechat")]
#[command(version, about = "Line-based TCP chat client", long_about = None)]
pub struct Cli {
    /// Remote `<HOST> <PORT>`. Any other number of values connects to
    /// localhost:6666.
    #[arg(value_name = "HOST PORT")]
    pub endpoint: Vec<String>,

    /// End the session if the peer sends nothing for this many seconds
    /// (0 or unset waits forever).
    #[arg(long, env = "LINECHAT_READ_TIMEOUT", value_name = "SECS")]
    pub read_timeout: Option<u64>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long, env = "LINECHAT_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    /// Resolve the session configuration. Fails on a malformed port.
    pub fn client_config(&self) -> linechat_core::Result<ClientConfig> {
        let target = Target::from_args(self.endpoint.as_slice())?;
        Ok(ClientConfig::new(target).with_read_timeout_secs(self.read_timeout))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use linechat_core::Error;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("linechat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_args_targets_localhost() {
        let config = parse(&[]).client_config().unwrap();
        assert_eq!(config.target, Target::new("localhost", 6666));
        assert!(config.read_timeout.is_none());
    }

    #[test]
    fn host_and_port() {
        let config = parse(&["example.com", "1234"]).client_config().unwrap();
        assert_eq!(config.target, Target::new("example.com", 1234));
    }

    #[test]
    fn single_stray_arg_falls_back_to_defaults() {
        let config = parse(&["example.com"]).client_config().unwrap();
        assert_eq!(config.target, Target::default());
    }

    #[test]
    fn three_args_fall_back_to_defaults() {
        let config = parse(&["a", "1", "b"]).client_config().unwrap();
        assert_eq!(config.target, Target::default());
    }

    #[test]
    fn bad_port_fails_before_connecting() {
        let err = parse(&["host", "abc"]).client_config().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn read_timeout_flag() {
        let cli = parse(&["--read-timeout", "15", "chat.local", "7000"]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.read_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.target.port, 7000);
    }

    #[test]
    fn log_json_defaults_off() {
        assert!(!parse(&[]).log_json);
        assert!(parse(&["--log-json"]).log_json);
    }
}
