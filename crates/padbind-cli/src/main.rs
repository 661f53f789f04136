mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use padbind_db::{MappingDb, SemanticInput};
use padbind_overrides::Console;
use padbind_resolve::{
    AccessApi, Compass, MappingRegistry, PadIdentity, Resolver,
    ResolutionContext, UserOptions, VirtualSubtype,
};

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup(cli.verbose, cli.no_color);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            print_error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Check { db } => {
            let input = std::fs::read_to_string(&db)
                .map_err(|e| format!("cannot read {}: {e}", db.display()))?;
            let (_, report) = MappingDb::parse_report(&input);
            print_info!(
                "{} models, {} duplicate GUIDs, {} lines skipped, {} directives skipped",
                report.models,
                report.duplicate_guids,
                report.skipped_lines,
                report.skipped_directives
            );
            Ok(())
        }
        Command::Resolve {
            db,
            overrides,
            guid,
            console,
            driver,
            virtual_pad,
            subtype,
            index,
            virtual_count,
            activation_switch,
            analog_dpad,
            arcade_stick,
        } => {
            let community = MappingDb::load(&db);
            let mut registry = MappingRegistry::new(community);
            if let Some(dir) = overrides {
                registry = registry.load_overrides_dir(&dir);
            }

            let mut options = UserOptions {
                analog_dpad,
                arcade_stick,
                ..Default::default()
            };
            if activation_switch {
                if let Some(special) = Console::parse(&console) {
                    options.activation_switches.insert(special);
                }
            }

            let mut ctx = ResolutionContext::new(&console, &driver, options);
            ctx.virtual_count = virtual_count;

            let api = if virtual_pad {
                AccessApi::VirtualFixedLayout
            } else {
                AccessApi::RawDevice
            };
            let mut pad = PadIdentity::new(&guid, api, index);
            pad.subtype = subtype.map(VirtualSubtype::from);

            let resolver = Resolver::new(&registry);
            print_info!(
                "pad {} (device index {})",
                pad.guid,
                pad.target_index(&ctx)
            );

            for input in SemanticInput::ALL {
                let res = resolver.resolve(&pad, input, &mut ctx);
                if res.input.is_mapped() {
                    print_info!("{:>20} -> {}", input.as_str(), res.input);
                    if let Some(cancel) = res.cancel {
                        print_info!("{:>20}    cancel: {cancel}", "");
                    }
                } else {
                    print_debug!("{:>20} -> unmapped", input.as_str());
                }
            }

            if analog_dpad {
                for direction in Compass::ALL {
                    let axes = resolver.resolve_analog_dpad(&pad, direction, &mut ctx);
                    let parts: Vec<String> = [axes.horizontal, axes.vertical]
                        .into_iter()
                        .flatten()
                        .map(|d| d.to_string())
                        .collect();
                    if !parts.is_empty() {
                        print_info!(
                            "{:>20} -> {}",
                            format!("stick {}", direction.as_str()),
                            parts.join(" + ")
                        );
                    }
                }
            }

            if let Some(hotkeys) = resolver.hotkeys(&pad, &mut ctx) {
                for (name, descriptor) in &hotkeys {
                    print_info!("{name:>20} -> {descriptor}");
                }
            }

            Ok(())
        }
    }
}
