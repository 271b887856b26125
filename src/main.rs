//! newstrade: headline sentiment -> direction model -> BUY/SELL signal.

use anyhow::Result;
use clap::Parser;
use newstrade::application::Pipeline;
use newstrade::config::{Config, NewsSource};
use newstrade::infrastructure::ServiceFactory;
use newstrade::interfaces::console;
use std::str::FromStr;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "News sentiment trading signal", long_about = None)]
struct Cli {
    /// Ticker to evaluate (overrides TICKER)
    #[arg(short, long)]
    ticker: Option<String>,

    /// Headline search keyword (overrides NEWS_KEYWORD)
    #[arg(short, long)]
    keyword: Option<String>,

    /// Number of headlines to request (overrides NEWS_PAGE_SIZE)
    #[arg(long)]
    page_size: Option<usize>,

    /// Train/test split seed (overrides SPLIT_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Headline provider: newsapi, rss or mock (overrides NEWS_SOURCE)
    #[arg(long)]
    news_source: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(ticker) = self.ticker {
            config.pipeline.ticker = ticker.to_uppercase();
        }
        if let Some(keyword) = self.keyword {
            config.pipeline.keyword = keyword;
        }
        if let Some(page_size) = self.page_size {
            config.pipeline.page_size = page_size;
        }
        if let Some(seed) = self.seed {
            config.pipeline.seed = seed;
        }
        if let Some(source) = self.news_source {
            config.news.source = NewsSource::from_str(&source)?;
        }
        config.pipeline.validate()
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    cli.apply(&mut config)?;

    let (news, market) = ServiceFactory::create_services(&config);
    let pipeline = Pipeline::new(news, market, config.pipeline);
    let report = pipeline.run().await?;

    print!("{}", console::render_report(&report));
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs on stderr, report on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting newstrade v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
