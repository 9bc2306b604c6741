use anyhow::Context;
use clap::Parser;
use flowkit::config::{CliConfig, Command, SdkConfig};
use flowkit::utils::{logger, validation::Validate};
use flowkit::{dump_as, fs_read, fs_write, import_flow_snapshot, load_value, ErrorCategory, Mode, SdkError};
use std::path::{Path, PathBuf};

fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the config file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli.command, &config) {
        let exit_code = match e.downcast_ref::<SdkError>() {
            Some(sdk_error) => {
                tracing::error!(
                    "❌ {} (Category: {:?})",
                    sdk_error,
                    sdk_error.category()
                );
                eprintln!("💡 Suggestion: {}", sdk_error.recovery_suggestion());
                exit_code(sdk_error.category())
            }
            None => 1,
        };
        eprintln!("❌ {:#}", e);
        std::process::exit(exit_code);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SdkConfig> {
    let config = match path {
        Some(path) => SdkConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => SdkConfig::default(),
    };
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run(command: &Command, config: &SdkConfig) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            input,
            mode,
            output,
        } => convert(input, mode.as_deref(), output.as_deref(), config),
        Command::Inspect { input } => inspect(input),
    }
}

fn convert(
    input: &Path,
    mode: Option<&str>,
    output: Option<&Path>,
    config: &SdkConfig,
) -> anyhow::Result<()> {
    let mode = match mode {
        Some(mode) => mode.parse::<Mode>()?,
        None => config.default_mode()?,
    };

    let text = fs_read(input)?;
    let value = load_value(&text)?;
    let converted = dump_as(&value, mode)?;

    let target = output
        .map(Path::to_path_buf)
        .or_else(|| export_target(input, mode, config));

    match target {
        Some(path) => {
            fs_write(converted, &path)?;
            tracing::info!("✅ Converted {} to {}", input.display(), path.display());
            println!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", converted),
    }
    Ok(())
}

fn export_target(input: &Path, mode: Mode, config: &SdkConfig) -> Option<PathBuf> {
    let dir = config.export_directory()?;
    let stem = input.file_stem()?;
    Some(dir.join(stem).with_extension(mode.to_string()))
}

fn inspect(input: &Path) -> anyhow::Result<()> {
    let snapshot = import_flow_snapshot(input)?;
    let metadata = snapshot.snapshot_metadata();
    let contents = snapshot.flow_contents();

    let flow_name = snapshot
        .flow()
        .map(|flow| flow.name())
        .or(contents.name.as_deref())
        .unwrap_or("<unnamed>");

    println!("Flow:           {}", flow_name);
    println!("Flow id:        {}", metadata.flow_identifier());
    println!("Bucket id:      {}", metadata.bucket_identifier());
    println!("Version:        {}", metadata.version());
    if let Some(author) = metadata.author() {
        println!("Author:         {}", author);
    }
    println!("Process groups: {}", contents.group_count());
    println!("Processors:     {}", contents.processor_count());
    Ok(())
}

fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::InvalidArgument | ErrorCategory::Type => 2,
        ErrorCategory::StreamFormat => 3,
        ErrorCategory::Permission | ErrorCategory::NotFound => 4,
        ErrorCategory::Io => 5,
    }
}
