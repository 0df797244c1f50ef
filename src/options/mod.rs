pub mod verbose;
pub mod version;

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use crate::error::{HeadersError, Result};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(override_usage = "node-headers [OPTIONS] [<vscode_exe> | electron:<X.Y.Z> | node:<X.Y.Z>] <output_dir>")]
pub struct Cli {
    /// Optional version source followed by the output directory
    #[arg(value_name = "ARGS", num_args = 0..=2)]
    pub args: Vec<String>,

    /// Base URL of the Node.js release mirror
    #[arg(long, env = "NODEJS_ORG_MIRROR")]
    pub mirror: Option<String>,

    /// URL of the Electron release catalog
    #[arg(long, env = "ELECTRON_RELEASES_URL")]
    pub releases_url: Option<String>,

    /// How the headers archive is unpacked
    #[arg(long, value_enum)]
    pub extractor: Option<ExtractorKind>,

    #[arg(short = 'V', long, action = ArgAction::SetTrue)]
    pub version: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// System `tar` executable
    #[default]
    Tar,
    /// In-process gzip + tar unpacking
    Builtin,
}

/// Where the Node.js version comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(String),
    Electron(String),
    VsCode(PathBuf),
    Runtime,
}

impl Target {
    pub fn parse(arg: &str) -> Target {
        if let Some(version) = arg.strip_prefix("node:") {
            Target::Node(version.to_string())
        } else if let Some(version) = arg.strip_prefix("electron:") {
            Target::Electron(version.to_string())
        } else {
            Target::VsCode(PathBuf::from(arg))
        }
    }
}

/// Splits the positional arguments into a version source and the output directory.
pub fn parse_targets(args: &[String]) -> Result<(Target, PathBuf)> {
    match args {
        [] => Err(HeadersError::MissingArguments),
        [output] => Ok((Target::Runtime, PathBuf::from(output))),
        [target, output, ..] => Ok((Target::parse(target), PathBuf::from(output))),
    }
}
