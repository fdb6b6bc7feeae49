//! `skiplinks` - CLI for skiplinks
//!
//! This binary renders skip links, checks routes against the configured
//! whitelist, and installs the skip links partial into a project.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use skiplinks::cli::{
    validate_config_file, CheckCommand, Cli, Command, ConfigCommand, InstallCommand,
    RenderCommand,
};
use skiplinks::install::post_install_message;
use skiplinks::{
    init_logging, Config, ContentSlots, ExecutionMode, Installer, Renderer, SkipLinksChecker,
};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Configuration is loaded per command so `install` and `config validate`
    // still run when the config file is broken
    match &cli.command {
        Command::Render(render_cmd) => handle_render(&cli.load_config()?, render_cmd),
        Command::Check(check_cmd) => handle_check(&cli.load_config()?, check_cmd),
        Command::Install(install_cmd) => handle_install(install_cmd),
        Command::Config(config_cmd) => handle_config(&cli, config_cmd),
    }
}

fn handle_render(
    config: &Config,
    cmd: &RenderCommand,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let slots: ContentSlots = cmd.slots.iter().cloned().collect();
    let mode = if cmd.test {
        ExecutionMode::Test
    } else {
        ExecutionMode::Production
    };

    let mut renderer = Renderer::new(config, &slots).with_mode(mode);
    if let Some(route) = &cmd.route {
        renderer = renderer.with_route(route.clone());
    }

    let rendered = if cmd.block {
        renderer.render_block()
    } else {
        renderer.skip_links_content()
    };

    match rendered {
        Ok(html) => {
            println!("{html}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_missing_skip_links() => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn handle_check(
    config: &Config,
    cmd: &CheckCommand,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let checker = SkipLinksChecker::new(cmd.route.clone(), cmd.has_skip_links);
    let result = checker.perform(config);

    if cmd.json {
        let status = serde_json::json!({
            "route": checker.route(),
            "has_skip_links": checker.has_skip_links(),
            "whitelisted": checker.is_whitelisted(config),
            "passed": result.is_ok(),
            "error": result.as_ref().err().map(ToString::to_string),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        match &result {
            Ok(()) => println!("{}: ok", checker.route()),
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_install(cmd: &InstallCommand) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let report = Installer::new(&cmd.root)
        .force(cmd.force)
        .skip_layout(cmd.skip_layout)
        .run()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", post_install_message(&report));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(cli: &Cli, cmd: &ConfigCommand) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = cli.load_config()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("  Disable validation: {}", config.disable_validation);
                println!("  Whitelisted routes: {}", config.whitelisted_routes.len());
                for route in &config.whitelisted_routes {
                    println!("    - {route}");
                }
            }
        }
        ConfigCommand::Path => {
            let project = cli.config.clone().unwrap_or_else(Config::default_config_path);
            println!("project: {}", project.display());
            println!("user:    {}", Config::user_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .clone()
                .or_else(|| cli.config.clone())
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            let (valid, message) = validate_config_file(path);
            println!("{message}");
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
