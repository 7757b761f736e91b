//! snare — check rental listings against the SNARE detection service
//!
//! Usage:
//!   snare status                      Show configuration and backend connectivity
//!   snare health                      Ping the detection service
//!   snare check <URL>                 Analyze a listing by URL
//!   snare manual --name ... [...]     Analyze manually entered listing details

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use snare_client::{
    ApiClient, ApiClientBuilder, AppConfig, ListingField, PageController, SubmitOutcome,
};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "snare")]
#[command(version, about = "Check rental listings for signs of fraud", long_about = None)]
struct Cli {
    /// Override VITE_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request deadline in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configuration and backend connectivity
    Status,
    /// Ping the detection service
    Health,
    /// Analyze a listing by URL
    Check {
        /// Listing URL
        url: String,
    },
    /// Analyze manually entered listing details
    Manual(ManualArgs),
}

#[derive(Args)]
struct ManualArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    #[arg(long)]
    square_feet: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl ManualArgs {
    fn fields(&self) -> Vec<(ListingField, &'static str, Option<&str>)> {
        vec![
            (ListingField::Name, "--name", self.name.as_deref()),
            (ListingField::Price, "--price", self.price.as_deref()),
            (ListingField::Address, "--address", self.address.as_deref()),
            (ListingField::City, "--city", self.city.as_deref()),
            (ListingField::State, "--state", self.state.as_deref()),
            (ListingField::PostalCode, "--postal-code", self.postal_code.as_deref()),
            (ListingField::Bedrooms, "--bedrooms", self.bedrooms.as_deref()),
            (ListingField::Bathrooms, "--bathrooms", self.bathrooms.as_deref()),
            (ListingField::SquareFootage, "--square-feet", self.square_feet.as_deref()),
            (ListingField::Description, "--description", self.description.as_deref()),
        ]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("snare_client=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    let cli = Cli::parse();

    let config = AppConfig::from_env().context("loading configuration")?;
    config.log_config();

    let mut builder = ApiClientBuilder::new()
        .config(config)
        .timeout(Duration::from_secs(cli.timeout_secs.max(1)));
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.as_str());
    }
    let client = builder.build().context("building API client")?;
    let page = PageController::new(client);

    match cli.command {
        Commands::Status => cmd_status(&page).await,
        Commands::Health => cmd_health(&page).await,
        Commands::Check { url } => {
            page.set_url(&url);
            finish(&page, page.submit_url().await)
        }
        Commands::Manual(args) => {
            for (field, flag, value) in args.fields() {
                if let Some(value) = value {
                    if !page.set_field(field, value) {
                        bail!("invalid value for {}: {:?}", flag, value);
                    }
                }
            }
            finish(&page, page.submit_manual().await)
        }
    }
}

async fn cmd_status(page: &PageController<ApiClient>) -> anyhow::Result<()> {
    let config = page.service().config();
    let connected = page.check_backend().await;
    println!("{} v{}", config.app_name, config.app_version);
    println!("API base URL: {}", config.api_base_url);
    println!("Environment:  {}", config.environment.as_str());
    println!(
        "Backend:      {}",
        if connected { "connected" } else { "not reachable" }
    );
    Ok(())
}

async fn cmd_health(page: &PageController<ApiClient>) -> anyhow::Result<()> {
    match page.service().health_check().await {
        Ok(()) => {
            println!("OK {}", page.service().base_url());
            Ok(())
        }
        Err(e) => bail!("{}", e),
    }
}

fn finish(page: &PageController<ApiClient>, outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Completed => {
            println!("{}", page.render());
            Ok(())
        }
        SubmitOutcome::Failed(_) => bail!("{}", page.render()),
        SubmitOutcome::Empty => bail!("nothing to check: the listing URL is empty"),
        SubmitOutcome::Busy => bail!("another check is already running"),
    }
}
