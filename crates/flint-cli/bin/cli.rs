use clap::{Args, Parser, Subcommand, ValueEnum};
use flint_generator::random::DEFAULT_LENGTH;
use flint_snowflake::DEFAULT_EPOCH;
use jiff::Timestamp;
use std::fmt::{Display, Formatter};

pub const WORKER_ID_ENV: &str = "FLINT_WORKER_ID";
pub const DATACENTER_ID_ENV: &str = "FLINT_DATACENTER_ID";
pub const EPOCH_ENV: &str = "FLINT_EPOCH";
pub const LOG_FORMAT_ENV: &str = "FLINT_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "flint", version, about = "Snowflake and random identifier generator")]
pub struct CLI {
    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Issue Snowflake IDs, one per line.
    Next {
        #[command(flatten)]
        generator: GeneratorArgs,

        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Decode Snowflake IDs into their fields.
    Decode {
        #[arg(long, env = EPOCH_ENV, default_value_t = DEFAULT_EPOCH)]
        epoch: Timestamp,

        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Print random v4 UUIDs.
    Uuid {
        #[arg(long)]
        hyphenated: bool,

        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Print random lowercase alphanumeric strings.
    Random {
        #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
        length: usize,

        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

#[derive(Debug, Args)]
pub struct GeneratorArgs {
    #[arg(long, env = WORKER_ID_ENV)]
    pub worker_id: u8,

    #[arg(long, env = DATACENTER_ID_ENV)]
    pub datacenter_id: u8,

    #[arg(long, env = EPOCH_ENV, default_value_t = DEFAULT_EPOCH)]
    pub epoch: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_parses_coordinates_and_defaults() {
        let cli = CLI::try_parse_from([
            "flint",
            "next",
            "--worker-id",
            "31",
            "--datacenter-id",
            "7",
        ])
        .unwrap();

        assert_eq!(cli.log_format, LogFormat::Text);
        match cli.command {
            Command::Next { generator, count } => {
                assert_eq!(generator.worker_id, 31);
                assert_eq!(generator.datacenter_id, 7);
                assert_eq!(generator.epoch, DEFAULT_EPOCH);
                assert_eq!(count, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn decode_requires_at_least_one_id() {
        assert!(CLI::try_parse_from(["flint", "decode"]).is_err());

        let cli = CLI::try_parse_from(["flint", "--log-format", "json", "decode", "1", "2"])
            .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Command::Decode { ids, .. } if ids == vec![1, 2]));
    }

    #[test]
    fn random_defaults_to_sixteen_characters() {
        let cli = CLI::try_parse_from(["flint", "random", "-n", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Random { length: 16, count: 3 }
        ));
    }

    #[test]
    fn custom_epoch_is_parsed() {
        let cli = CLI::try_parse_from([
            "flint",
            "next",
            "--worker-id",
            "0",
            "--datacenter-id",
            "0",
            "--epoch",
            "2020-01-01T00:00:00Z",
        ])
        .unwrap();
        match cli.command {
            Command::Next { generator, .. } => {
                assert_eq!(generator.epoch.as_second(), 1_577_836_800);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
