use ma_lens::config::{AppConfig, load_or_default};
use ma_lens::fetcher::YahooSource;
use ma_lens::model::HistoryRequest;
use ma_lens::pipeline;
use ma_lens::visualizer::{HeadlessDisplay, TerminalDisplay, restore_terminal};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = restore_terminal();
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config: AppConfig = match load_or_default("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            process::exit(1);
        }
    };

    let source = match YahooSource::new(&config.base_url, config.request_timeout_seconds) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create market data client: {}", e);
            process::exit(1);
        }
    };

    let request = HistoryRequest {
        ticker: config.ticker.clone(),
        period: config.period.clone(),
    };

    // Charts are drawn on stderr; without a terminal there they are only logged.
    let interactive = config.interactive && std::io::stderr().is_terminal();
    if config.interactive && !interactive {
        warn!("No terminal on stderr, logging chart summaries instead");
    }

    let mut stdout = std::io::stdout();
    let result = if interactive {
        pipeline::run(&source, &request, &mut TerminalDisplay::new(), &mut stdout).await
    } else {
        pipeline::run(&source, &request, &mut HeadlessDisplay, &mut stdout).await
    };

    match result {
        Ok(table) => info!(
            "Finished analysis of {}: {} bars, {} monthly points",
            table.ticker,
            table.bars.len(),
            table.monthly.len()
        ),
        Err(e) => {
            error!("Analysis of {} failed: {}", request.ticker, e);
            process::exit(1);
        }
    }
}
