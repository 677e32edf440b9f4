//! Command line definition built from the provider table
//!
//! Every provider becomes a subcommand and each of its parameters a
//! `--long` option taking the textual form [`ProviderArgs`] parses.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use fakefile::providers::{PROVIDERS, ParamSpec, ProviderArgs, ProviderSpec};

pub fn command() -> Command {
    let mut command = Command::new("fakefile")
        .version(fakefile::version())
        .about("Generate synthetic files: PDF, images, audio, documents, archives and e-mails")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .long("root")
                .global(true)
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Storage root, overrides FAKEFILE_ROOT"),
        )
        .arg(
            Arg::new("rel-path")
                .long("rel-path")
                .global(true)
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory below the root, overrides FAKEFILE_REL_PATH"),
        )
        .arg(
            Arg::new("clean-up")
                .long("clean-up")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Delete generated files again before exiting, overrides FAKEFILE_CLEAN_UP"),
        )
        .subcommand(
            Command::new("list").about("List providers by category").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print the full provider table as JSON"),
            ),
        );
    for provider in PROVIDERS {
        command = command.subcommand(provider_command(provider));
    }
    command
}

fn provider_command(provider: &ProviderSpec) -> Command {
    let about = format!("{} [{}]", provider.summary, provider.tags.join(", "));
    provider
        .params
        .iter()
        .fold(Command::new(provider.name).about(about), |command, param| {
            command.arg(param_arg(param))
        })
}

fn param_arg(param: &ParamSpec) -> Arg {
    let help = match param.default {
        Some(default) => format!("{} [default: {}]", param.help, default),
        None => param.help.to_string(),
    };
    Arg::new(param.name)
        .long(param.name.replace('_', "-"))
        .value_name(param.kind.to_string())
        .help(help)
}

/// Collect the options given to a provider subcommand
pub fn provider_args(provider: &ProviderSpec, matches: &ArgMatches) -> ProviderArgs {
    let mut args = ProviderArgs::new();
    for param in provider.params {
        if let Some(value) = matches.get_one::<String>(param.name) {
            args.set(param.name, value.clone());
        }
    }
    args
}
