use clap::Parser;
use std::path::PathBuf;

/// Run a banking session script against the ledger engine
#[derive(Parser, Debug)]
#[command(name = "atm-ledger")]
#[command(about = "Run a banking session script against the ledger engine", long_about = None)]
pub struct CliArgs {
    /// Session script file to execute
    #[arg(value_name = "SCRIPT", help = "Path to the session script file")]
    pub script: PathBuf,

    /// External store path for best-effort event mirroring
    #[arg(
        long = "store",
        value_name = "PATH",
        help = "Append ledger events to this JSON-lines store; omitted, the store is treated as unavailable"
    )]
    pub store: Option<PathBuf>,

    /// Default cheque clearing delay
    #[arg(
        long = "cheque-delay-ms",
        value_name = "MILLIS",
        default_value_t = 5000,
        help = "Clearing delay for cheque commands that do not specify their own"
    )]
    pub cheque_delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program", "session.txt"]).unwrap();

        assert_eq!(parsed.script, PathBuf::from("session.txt"));
        assert_eq!(parsed.store, None);
        assert_eq!(parsed.cheque_delay_ms, 5000);
    }

    #[rstest]
    #[case::store(
        &["program", "--store", "events.jsonl", "session.txt"],
        Some("events.jsonl"),
        5000
    )]
    #[case::delay(&["program", "--cheque-delay-ms", "50", "session.txt"], None, 50)]
    #[case::both(
        &["program", "--store", "events.jsonl", "--cheque-delay-ms", "50", "session.txt"],
        Some("events.jsonl"),
        50
    )]
    fn test_options(
        #[case] args: &[&str],
        #[case] store: Option<&str>,
        #[case] delay_ms: u64,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();

        assert_eq!(parsed.store, store.map(PathBuf::from));
        assert_eq!(parsed.cheque_delay_ms, delay_ms);
    }

    #[rstest]
    #[case::missing_script(&["program"])]
    #[case::bad_delay(&["program", "--cheque-delay-ms", "soon", "session.txt"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
