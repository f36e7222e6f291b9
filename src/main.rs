use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use m3uc::commands;

fn build_cli() -> Command {
    Command::new("m3uc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check the streams of an M3U playlist and clean out the dead ones")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("check")
                .about("Test every stream in a playlist")
                .arg(
                    Arg::new("file")
                        .help("Path to the M3U/M3U8 playlist")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Per-stream timeout in seconds (default: from config, 10)")
                        .value_parser(clap::value_parser!(u64))
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .value_name("N")
                        .help("Number of concurrent probes (default: from config, 10)")
                        .value_parser(clap::value_parser!(usize))
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("REPORT")
                        .help("Write a detailed text report to this file")
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Only print the summary")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("split")
                        .long("split")
                        .help("Write working and not working streams to separate files")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("update-original")
                        .long("update-original")
                        .help("Remove not working streams from the playlist itself")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("no-backup")
                        .long("no-backup")
                        .help("Skip the .backup copy when updating the original")
                        .requires("update-original")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("working-file")
                        .long("working-file")
                        .value_name("FILE")
                        .help("Output path for working streams (with --split)")
                )
                .arg(
                    Arg::new("notworking-file")
                        .long("notworking-file")
                        .value_name("FILE")
                        .help("Output path for not working streams")
                )
                .arg(
                    Arg::new("strict-schemes")
                        .long("strict-schemes")
                        .help("Mark rtmp/rtsp/udp and other unprobed schemes as failed")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("convert")
                .about("Build a playlist from JSON channel dumps, then test it")
                .arg(
                    Arg::new("json-folder")
                        .long("json-folder")
                        .value_name("DIR")
                        .help("Folder holding the JSON files (default: json)")
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Playlist to write (default: from_json.m3u)")
                )
                .arg(
                    Arg::new("no-test")
                        .long("no-test")
                        .help("Only convert, do not test the streams")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Per-stream timeout in seconds (default: 8)")
                        .value_parser(clap::value_parser!(u64))
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .value_name("N")
                        .help("Number of concurrent probes (default: 15)")
                        .value_parser(clap::value_parser!(usize))
                )
        )
        .subcommand(
            Command::new("config")
                .about("Show or change the saved defaults (use 'm3uc config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("timeout, workers, max-redirects, user-agent, strict-schemes or denylist")
                                .required(true)
                                .index(1)
                        )
                        .arg(
                            Arg::new("value")
                                .help("New value (denylist takes a comma separated list)")
                                .required(true)
                                .index(2)
                        )
                )
                .subcommand(Command::new("reset").about("Restore the default configuration"))
                .subcommand(Command::new("path").about("Print the configuration file location"))
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("bash, zsh, fish, powershell or elvish")
                        .required(true)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("version")
                .about("Shows version information")
        )
}

fn main() -> Result<()> {
    m3uc::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("check", sub_matches)) => commands::check(sub_matches)?,
        Some(("convert", sub_matches)) => commands::convert(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::execute(sub_matches)?,
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            commands::completions::execute(sub_matches, &mut cli)?;
        }
        Some(("version", _)) => commands::version()?,
        _ => {
            println!("Welcome to m3uc!");
            println!("Use 'm3uc --help' for more information.");
        }
    }

    Ok(())
}
