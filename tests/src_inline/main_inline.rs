use clap::Parser;

use super::*;

#[test]
fn test_simulate_args_parse() {
    let cli = Cli::try_parse_from([
        "mmwave-har-demo",
        "simulate",
        "--ticks",
        "5",
        "--force",
        "fall",
        "--seed",
        "9",
        "--no-wait",
        "--format",
        "json",
    ])
    .unwrap();
    match cli.command {
        Command::Simulate(args) => {
            assert_eq!(args.ticks, 5);
            assert_eq!(args.force, Some(ActivityLabel::Fall));
            assert_eq!(args.common.seed, Some(9));
            assert!(args.no_wait);
            assert_eq!(args.common.format, OutputFormat::Json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_unknown_force_label_rejected() {
    let res = Cli::try_parse_from(["mmwave-har-demo", "simulate", "--force", "moonwalk"]);
    assert!(res.is_err());
}

#[test]
fn test_resolve_config_overrides() {
    let cli = Cli::try_parse_from([
        "mmwave-har-demo",
        "session",
        "--interval-ms",
        "50",
        "--sample",
        "data/walk/s.json",
    ])
    .unwrap();
    let Command::Session(args) = cli.command else {
        panic!("expected session");
    };
    let config = resolve_config(
        args.common.config.as_ref(),
        Some(&args.common),
        args.model.as_ref(),
        args.sample.as_ref(),
    )
    .unwrap();
    assert_eq!(config.tick_interval_ms, 50);
    assert_eq!(config.sample_path, PathBuf::from("data/walk/s.json"));
    assert_eq!(config.history_capacity, 50);
}

#[test]
fn test_resolve_config_rejects_zero_interval() {
    let cli = Cli::try_parse_from(["mmwave-har-demo", "simulate", "--interval-ms", "0"]).unwrap();
    let Command::Simulate(args) = cli.command else {
        panic!("expected simulate");
    };
    assert!(resolve_config(None, Some(&args.common), None, None).is_err());
}

#[test]
fn test_seeded_rng_repeats() {
    use rand::Rng;
    let a: u64 = make_rng(Some(5)).gen_range(0..u64::MAX);
    let b: u64 = make_rng(Some(5)).gen_range(0..u64::MAX);
    assert_eq!(a, b);
}
