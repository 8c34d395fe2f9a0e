//! Tests for command-line parsing.

use clap::Parser;
use t3::{AiDifficulty, Cli, CliCommand, GameMode};
use t3_engine::Player;

#[test]
fn test_play_flags() {
    let cli = Cli::try_parse_from([
        "t3",
        "play",
        "--board-size",
        "5",
        "-m",
        "4",
        "--mode",
        "two",
        "--ai-plays-as",
        "x",
        "--difficulty",
        "hard",
    ])
    .unwrap();

    let CliCommand::Play(args) = cli.command else {
        panic!("expected play");
    };
    assert_eq!(args.board_size, Some(5));
    assert_eq!(args.match_size, Some(4));
    assert_eq!(args.mode, Some(GameMode::TwoPlayer));
    assert_eq!(args.ai_plays_as, Some(Player::X));
    assert_eq!(args.difficulty, Some(AiDifficulty::Hard));
    assert_eq!(args.settings.to_str(), Some("t3.toml"));
    assert_eq!(args.load, None);
    assert!(!args.save_settings);
}

#[test]
fn test_play_defaults() {
    let cli = Cli::try_parse_from(["t3", "play"]).unwrap();
    let CliCommand::Play(args) = cli.command else {
        panic!("expected play");
    };
    assert_eq!(args.board_size, None);
    assert_eq!(args.mode, None);
}

#[test]
fn test_save_settings_flag() {
    let cli = Cli::try_parse_from(["t3", "play", "--settings", "mine.toml", "--save-settings"])
        .unwrap();
    let CliCommand::Play(args) = cli.command else {
        panic!("expected play");
    };
    assert!(args.save_settings);
    assert_eq!(args.settings.to_str(), Some("mine.toml"));
}

#[test]
fn test_rejects_unknown_side() {
    assert!(Cli::try_parse_from(["t3", "play", "--ai-plays-as", "z"]).is_err());
    assert!(Cli::try_parse_from(["t3", "play", "--mode", "solo"]).is_err());
}

#[test]
fn test_options_subcommand() {
    let cli = Cli::try_parse_from(["t3", "options", "--board-size", "6"]).unwrap();
    assert!(matches!(cli.command, CliCommand::Options { board_size: 6 }));
}
