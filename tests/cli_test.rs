use clap::Parser;
use demo_seeder::{Action, Cli};
use std::path::PathBuf;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("demo-seeder").chain(args.iter().copied()))
}

#[test]
fn test_each_action_flag() {
    let cases = [
        ("--insert", Action::Insert),
        ("--create-tables", Action::CreateTables),
        ("--drop-tables", Action::DropTables),
        ("--recreate", Action::Recreate),
        ("--validate", Action::Validate),
    ];
    for (flag, action) in cases {
        let cli = parse(&["--config", "config.json", flag]).unwrap();
        assert_eq!(cli.action(), action, "{flag}");
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(!cli.yes);
    }
}

#[test]
fn test_action_is_required() {
    let err = parse(&["--config", "config.json"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_only_one_action_allowed() {
    let err = parse(&["--config", "config.json", "--insert", "--validate"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn test_yes_flag() {
    let cli = parse(&["--config", "config.json", "--drop-tables", "-y"]).unwrap();
    assert_eq!(cli.action(), Action::DropTables);
    assert!(cli.yes);
}
