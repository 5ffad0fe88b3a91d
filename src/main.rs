use clap::Parser;
use plist2xlsx::core::preview::{render_json, render_source, render_table};
use plist2xlsx::core::ConfigProvider;
use plist2xlsx::utils::{logger, validation::Validate};
use plist2xlsx::{
    CliConfig, Conversion, ConversionEngine, ConvertError, LocalStorage, PreviewMode,
    TabularExporter,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting plist2xlsx");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<(), ConvertError> {
    config.validate()?;
    let settings = config.settings()?;

    let mut engine = ConversionEngine::new(
        LocalStorage::new("."),
        LocalStorage::new(settings.output_dir()),
        TabularExporter::from_config(&settings),
    );

    let conversion = engine.load_file(&config.input).await?;
    println_preview(config.preview, conversion)?;

    if config.no_export {
        tracing::info!("Export skipped (--no-export)");
        return Ok(());
    }

    match engine.save().await? {
        Some(name) => {
            let path = Path::new(settings.output_dir()).join(name);
            tracing::info!("✅ Conversion completed successfully!");
            println!("📁 Output saved to: {}", path.display());
            Ok(())
        }
        None => Err(ConvertError::NothingToExportError),
    }
}

fn println_preview(mode: Option<PreviewMode>, conversion: &Conversion) -> Result<(), ConvertError> {
    match mode {
        Some(PreviewMode::Table) => println!("{}", render_table(&conversion.records)),
        Some(PreviewMode::Json) => println!("{}", render_json(&conversion.records)?),
        Some(PreviewMode::Source) => println!("{}", render_source(&conversion.document)?),
        None => {}
    }
    Ok(())
}
