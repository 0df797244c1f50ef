mod commands;
mod config;
mod error;
mod options;
mod utils;

#[cfg(test)]
mod test_server;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use error::HeadersError;

fn main() -> anyhow::Result<()> {
    let cli = options::Cli::parse();

    options::verbose::set_verbose(cli.verbose);

    if cli.version {
        options::version::show();
        return Ok(());
    }

    let (target, out_dir) = match options::parse_targets(&cli.args) {
        Ok(parsed) => parsed,
        Err(HeadersError::MissingArguments) => {
            let mut cmd = options::Cli::command();
            cmd.print_help()?;
            println!();
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let settings = config::Settings::merge(&cli, config::load_config()?);
    options::verbose::log(&format!("Settings: {:?}", settings));
    options::verbose::log(&format!("Target: {:?}", target));

    let client = utils::download::http_client()?;
    let resolver = commands::resolve::Resolver::new(&client, &settings.releases_url);
    let version = resolver.resolve(&target, utils::runtime_node_version)?;

    println!("Fetching headers for Node.js {}", version.green());
    commands::fetch::fetch_artifacts(
        &client,
        &settings.mirror,
        settings.extractor,
        &version,
        &out_dir,
    )?;

    Ok(())
}
