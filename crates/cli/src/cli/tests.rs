use std::path::PathBuf;

use clap::Parser;

use super::*;

#[test]
fn parse_run_with_selection() {
	let cli = Cli::try_parse_from(["storeshot", "run", "--only", "3,4,9", "--clean"]).unwrap();

	match cli.command {
		Commands::Run(args) => {
			assert_eq!(args.only, vec![3, 4, 9]);
			assert!(args.clean);
		}
		_ => panic!("Expected Run command"),
	}
}

#[test]
fn parse_global_flags_after_subcommand() {
	let cli = Cli::try_parse_from([
		"storeshot",
		"guard",
		"-vv",
		"-f",
		"text",
		"--server",
		"http://10.0.2.2:4723",
		"--output",
		"/tmp/shots",
	])
	.unwrap();

	assert_eq!(cli.verbose, 2);
	assert_eq!(cli.format, OutputFormat::Text);
	assert_eq!(cli.server.as_deref(), Some("http://10.0.2.2:4723"));
	assert_eq!(cli.output, Some(PathBuf::from("/tmp/shots")));
	assert!(matches!(cli.command, Commands::Guard));
}

#[test]
fn parse_find_default_bound() {
	let cli = Cli::try_parse_from(["storeshot", "find", "Tide Information"]).unwrap();

	match cli.command {
		Commands::Find(args) => {
			assert_eq!(args.text, "Tide Information");
			assert_eq!(args.max_swipes, 8);
		}
		_ => panic!("Expected Find command"),
	}
}

#[test]
fn verify_requires_text() {
	assert!(Cli::try_parse_from(["storeshot", "verify"]).is_err());
}

#[test]
fn locate_accepts_preset_or_coordinates() {
	let cli = Cli::try_parse_from(["storeshot", "locate", "neuse-river"]).unwrap();
	assert!(matches!(cli.command, Commands::Locate(LocateArgs { preset: Some(ref p), .. }) if p == "neuse-river"));

	let cli = Cli::try_parse_from(["storeshot", "locate", "--lat", "33.4863", "--lon", "-77.5891"]).unwrap();
	match cli.command {
		Commands::Locate(args) => {
			assert_eq!(args.preset, None);
			assert_eq!(args.lat, Some(33.4863));
			assert_eq!(args.lon, Some(-77.5891));
		}
		_ => panic!("Expected Locate command"),
	}
}

#[test]
fn locate_rejects_half_coordinates_and_mixed_input() {
	assert!(Cli::try_parse_from(["storeshot", "locate", "--lat", "33.4"]).is_err());
	assert!(Cli::try_parse_from(["storeshot", "locate", "gulf-coast", "--lat", "1", "--lon", "2"]).is_err());
	assert!(Cli::try_parse_from(["storeshot", "locate"]).is_err());
}

#[test]
fn command_names_match_subcommands() {
	let cli = Cli::try_parse_from(["storeshot", "clean"]).unwrap();
	assert_eq!(cli.command.name(), "clean");
}
