use crate::cli::{Command, GeneratorArgs};
use anyhow::{bail, Context};
use flint_generator::{Generator, RandomStringGenerator, UuidGenerator};
use flint_snowflake::{Snowflake, SnowflakeId, SnowflakeSettings, SystemClock};
use jiff::Timestamp;
use std::io::Write;
use tracing::{debug, info};

pub fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Next { generator, count } => {
            let snowflake = build_snowflake(&generator)?;
            emit(&snowflake, count, out)
        }
        Command::Decode { epoch, ids } => {
            for raw in ids {
                decode(raw, epoch, out)?;
            }
            Ok(())
        }
        Command::Uuid { hyphenated, count } => {
            emit(&UuidGenerator::builder().hyphenated(hyphenated).build(), count, out)
        }
        Command::Random { length, count } => {
            emit(&RandomStringGenerator::builder().length(length).build(), count, out)
        }
    }
}

fn build_snowflake(args: &GeneratorArgs) -> anyhow::Result<Snowflake<SystemClock>> {
    let settings = SnowflakeSettings::builder()
        .worker_id(args.worker_id)
        .datacenter_id(args.datacenter_id)
        .epoch(args.epoch)
        .build();

    info!(
        worker_id = args.worker_id,
        datacenter_id = args.datacenter_id,
        epoch = %args.epoch,
        "starting snowflake generator"
    );

    Snowflake::new(settings).context("failed to create snowflake generator")
}

fn emit<G: Generator>(generator: &G, count: usize, out: &mut impl Write) -> anyhow::Result<()> {
    for _ in 0..count {
        let id = generator.generate()?;
        writeln!(out, "{id}")?;
    }
    debug!(count, "identifiers emitted");
    Ok(())
}

fn decode(raw: u64, epoch: Timestamp, out: &mut impl Write) -> anyhow::Result<()> {
    if raw >> 63 != 0 {
        bail!("{raw} is not a snowflake id: sign bit is set");
    }
    let id = SnowflakeId::from(raw);
    let issued_at = id
        .created_at(epoch)
        .with_context(|| format!("{raw} decodes outside the supported time range"))?;

    writeln!(
        out,
        "{raw}\ttimestamp={issued_at}\tdatacenter_id={}\tworker_id={}\tsequence={}",
        id.datacenter_id(),
        id.worker_id(),
        id.sequence()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CLI;
    use clap::Parser;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = CLI::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn next_prints_increasing_ids() {
        let output = run_args(&[
            "flint",
            "next",
            "--worker-id",
            "3",
            "--datacenter-id",
            "4",
            "-n",
            "5",
        ])
        .unwrap();

        let ids: Vec<u64> = output.lines().map(|line| line.parse().unwrap()).collect();
        assert_eq!(ids.len(), 5);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(ids
            .iter()
            .all(|&raw| SnowflakeId::from(raw).worker_id() == 3));
    }

    #[test]
    fn next_rejects_out_of_range_worker() {
        let err = run_args(&[
            "flint",
            "next",
            "--worker-id",
            "32",
            "--datacenter-id",
            "0",
        ])
        .unwrap_err();

        let err = err
            .downcast_ref::<flint_snowflake::Error>()
            .expect("generator error is preserved");
        assert!(matches!(
            err,
            flint_snowflake::Error::InvalidCoordinate { value: 32, .. }
        ));
    }

    #[test]
    fn decode_prints_fields() {
        let raw = (1_500_u64 << 22) | (2 << 17) | (9 << 12) | 7;
        let output = run_args(&["flint", "decode", &raw.to_string()]).unwrap();

        let fields = [
            "timestamp=2024-12-31T16:00:01.5Z",
            "datacenter_id=2",
            "worker_id=9",
            "sequence=7",
        ];
        assert_eq!(output, format!("{raw}\t{}\n", fields.join("\t")));
    }

    #[test]
    fn decode_rejects_sign_bit() {
        let raw = 1_u64 << 63;
        assert!(run_args(&["flint", "decode", &raw.to_string()]).is_err());
    }

    #[test]
    fn uuid_and_random_emit_requested_counts() {
        let output = run_args(&["flint", "uuid", "--hyphenated", "-n", "3"]).unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.lines().all(|line| line.len() == 36));

        let output = run_args(&["flint", "random", "--length", "10", "-n", "2"]).unwrap();
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().all(|line| line.len() == 10));
    }
}
