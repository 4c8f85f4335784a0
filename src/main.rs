use nasalstage::cli::commands::{CliArgs, Commands};
use nasalstage::cli::handlers::{handle_classify, handle_config, handle_normals};
use nasalstage::util::logging::{init_logging, parse_level, LoggingConfig};
use nasalstage::{NasalstageConfig, VERSION};

use clap::Parser;
use tracing::{debug, error, Level};

fn main() {
    let args = CliArgs::parse();
    let config = NasalstageConfig::default();
    init_logging_from_args(&args, &config);

    debug!("nasalstage v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(2);
    }

    let exit_code = match &args.command {
        Commands::Classify(classify_args) => handle_classify(classify_args, &config),
        Commands::Normals(normals_args) => handle_normals(normals_args, &config),
        Commands::Config(config_args) => handle_config(config_args, &config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &NasalstageConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    init_logging(LoggingConfig {
        level,
        ..LoggingConfig::from(config)
    });
}
