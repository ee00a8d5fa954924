// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("yarp")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Yarp Contributors")
        .about("Resolve and inspect pacman configuration")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .default_value("/etc/pacman.conf")
                .global(true)
                .help("Configuration file to resolve"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .global(true)
                .help("Override the installation root (RootDir)"),
        )
        .arg(
            Arg::new("dbpath")
                .short('b')
                .long("dbpath")
                .value_name("DIR")
                .global(true)
                .help("Override the database location (DBPath)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("dump")
                .about("Print the resolved global options and repositories")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit JSON instead of pacman.conf-style text"),
                ),
        )
        .subcommand(
            Command::new("repos").about("List repositories with their servers and signature levels"),
        )
        .subcommand(
            Command::new("siglevel")
                .about("Decode a signature level expression")
                .arg(
                    Arg::new("expression")
                        .required(true)
                        .num_args(1..)
                        .help("Keywords, e.g. Required DatabaseOptional"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Rendered into OUT_DIR/man
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("yarp.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
