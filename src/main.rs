use clap::Parser;
use sparkify_dwh::core::Storage;
use sparkify_dwh::utils::error::DwhError;
use sparkify_dwh::utils::{logger, validation::Validate};
use sparkify_dwh::{
    CliConfig, LocalStorage, Phase, QueryCatalog, RenderEngine, ScriptPipeline, WarehouseConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting sparkify-dwh");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    if config.print || config.dry_run {
        let warehouse = match config.load_warehouse() {
            Ok(warehouse) => warehouse,
            Err(e) => fail("Loading warehouse config failed", &e),
        };
        let catalog = QueryCatalog::build(&warehouse);

        if config.print {
            print!("{}", catalog.script(config.stage));
        } else {
            display_dry_run(&config, &warehouse, &catalog);
        }
        return Ok(());
    }

    #[cfg(feature = "s3")]
    if let Some(bucket) = config.s3_bucket.clone() {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_s3::Client::new(&sdk_config);
        let storage = sparkify_dwh::S3Storage::new(client, bucket, config.s3_prefix.clone());
        report(run(storage, config).await);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path.clone());
    report(run(storage, config).await);
    Ok(())
}

async fn run<S: Storage>(storage: S, config: CliConfig) -> sparkify_dwh::Result<String> {
    let pipeline = ScriptPipeline::new(storage, config);
    RenderEngine::new(pipeline).run().await
}

fn report(result: sparkify_dwh::Result<String>) {
    match result {
        Ok(location) => {
            println!("✅ SQL rendered successfully!");
            println!("📁 Output saved to: {}", location);
        }
        Err(e) => fail("Rendering failed", &e),
    }
}

/// 依錯誤嚴重程度退出
fn fail(context: &str, e: &DwhError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn display_dry_run(config: &CliConfig, warehouse: &WarehouseConfig, catalog: &QueryCatalog) {
    println!("📋 Configuration Summary:");
    println!("  Config: {}", config.config);
    println!("  Log data: {}", warehouse.s3.log_data);
    println!("  Song data: {}", warehouse.s3.song_data);
    println!("  JSON paths: {}", warehouse.s3.log_jsonpath);
    println!("  Region: {}", warehouse.region());
    println!("  Stage: {:?}", config.stage);
    println!("  Output: {}", config.output_path);
    println!("  Formats: {:?}", config.formats);
    if config.bundle {
        println!("  Bundle: dwh_sql.zip");
    }
    println!();

    println!("🔍 Statements (in execution order):");
    for phase in config.stage.phases() {
        println!("  [{}] {}", phase.position(), phase_title(*phase));
        for statement in catalog.phase(*phase) {
            println!("    - {} ({})", statement.name, statement.table);
        }
    }
    println!();
    println!(
        "✅ Dry run complete: {} statements. Nothing was written.",
        catalog.len(config.stage)
    );
}

fn phase_title(phase: Phase) -> &'static str {
    match phase {
        Phase::Drop => "drop tables",
        Phase::Create => "create tables",
        Phase::Copy => "copy into staging tables",
        Phase::Insert => "insert into star schema",
    }
}
