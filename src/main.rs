use clap::Parser;
use grocery::app::report;
use grocery::config::Settings;
use grocery::utils::{logger, validation::Validate};
use grocery::{CliConfig, Command, OrderError, OrderRegistry, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    let toml = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(toml) => toml.unwrap_or_default(),
        Err(e) => exit_with(&e),
    };

    let settings = match Settings::resolve(cli.file.as_deref(), cli.json, &toml) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    logger::init_cli_logger(cli.verbose, settings.log_level.as_deref(), settings.log_format);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = toml.validate().and_then(|_| settings.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(&cli.command, &settings) {
        tracing::error!("{} (Category: {:?})", e, e.category());
        exit_with(&e);
    }
}

fn run(command: &Command, settings: &Settings) -> grocery::Result<()> {
    let registry = OrderRegistry::read(&settings.orders_file)?;

    let output = match command {
        Command::List => report::render_list(&registry, settings.output_format)?,
        Command::Show { id } => report::render_order(registry.find(*id)?, settings.output_format)?,
        Command::Summary => report::render_summary(&registry, settings.output_format)?,
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn exit_with(e: &OrderError) -> ! {
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
