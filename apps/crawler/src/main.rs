// [apps/crawler/src/main.rs]
/*!
 * APARATO: CRAWLER MAIN ENTRY POINT
 * RESPONSABILIDAD: IGNICIÓN DEL PROCESO WORKER
 */

use catalog_crawler::CrawlerKernel;
use catalog_domain_models::CrawlerConfig;
use catalog_shared_telemetry::init_tracing;
use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("catalog_crawler");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let config = CrawlerConfig::from_env().unwrap_or_else(|e| {
            error!("configuration error: {}", e);
            std::process::exit(1);
        });

        info!("crawler igniting");

        let kernel = match CrawlerKernel::ignite(config).await {
            Ok(kernel) => kernel,
            Err(e) => {
                error!("crawler ignition failed: {}", e);
                std::process::exit(1);
            }
        };

        kernel.launch();

        // The scheduler tick and stale sweep run as detached background
        // tasks; keep the process alive indefinitely.
        std::future::pending::<()>().await;
    });

    Ok(())
}
