use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use battery_cost_projection::{
    io,
    models::{ProjectionConfig, ProjectionInputs, Technology},
    visualization::{print_cost_chart, print_ledger_table, print_summary_table, print_yearly_table},
    Analyzer,
};

#[derive(Parser)]
#[command(
    name = "battery-tco",
    about = "Battery Cost Projection - lead-acid vs. lithium total cost of ownership",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by every projecting subcommand.
#[derive(Args)]
struct InputArgs {
    /// Load all inputs from a TOML or JSON file instead of the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// First month of the projection (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// USD per Turkish lira
    #[arg(long)]
    conversion_rate: Option<f64>,

    /// Lead-acid purchase price (USD)
    #[arg(long, default_value = "1400.0")]
    lead_acid_price: f64,

    /// Lead-acid lifespan (years)
    #[arg(long, default_value = "4")]
    lead_acid_lifespan: u32,

    /// Years between lead-acid maintenance visits (0.1 steps)
    #[arg(long, default_value = "1.0")]
    maintenance_interval: f64,

    /// Cost of one maintenance visit (TRY)
    #[arg(long, default_value = "2000.0")]
    maintenance_cost: f64,

    /// Value recovered from a retired lead-acid battery (USD)
    #[arg(long, default_value = "150.0")]
    salvage_value: f64,

    /// Lithium purchase price (USD)
    #[arg(long, default_value = "1600.0")]
    lithium_price: f64,

    /// Lithium lifespan (years)
    #[arg(long, default_value = "8")]
    lithium_lifespan: u32,

    /// Lithium energy use relative to lead-acid (-0.3 = 30% less)
    #[arg(long, default_value = "-0.3", allow_hyphen_values = true)]
    efficiency_factor: f64,

    /// Electricity price (TRY per kWh)
    #[arg(long, default_value = "4.53")]
    electricity_price: f64,

    /// Monthly consumption on lead-acid (kWh)
    #[arg(long, default_value = "80.0")]
    usage_kwh: f64,

    /// Years to display (5-30)
    #[arg(short, long, default_value = "10")]
    display_years: u32,
}

impl InputArgs {
    fn inputs(&self) -> Result<ProjectionInputs> {
        if let Some(path) = &self.config {
            return Ok(io::read_inputs(path)?);
        }
        let mut inputs = ProjectionInputs::default();
        inputs.lead_acid.price_usd = self.lead_acid_price;
        inputs.lead_acid.lifespan_years = self.lead_acid_lifespan;
        inputs.lead_acid.maintenance_interval_years = self.maintenance_interval;
        inputs.lead_acid.maintenance_cost_try = self.maintenance_cost;
        inputs.lead_acid.salvage_value_usd = self.salvage_value;
        inputs.lithium.price_usd = self.lithium_price;
        inputs.lithium.lifespan_years = self.lithium_lifespan;
        inputs.lithium.efficiency_factor = self.efficiency_factor;
        inputs.electricity.price_try_per_kwh = self.electricity_price;
        inputs.electricity.usage_kwh_per_month = self.usage_kwh;
        inputs.display_years = self.display_years;
        Ok(inputs)
    }

    fn config(&self) -> ProjectionConfig {
        let mut config = ProjectionConfig::default();
        if let Some(rate) = self.conversion_rate {
            config.conversion_rate = rate;
        }
        config
    }

    fn start_date(&self) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn analyze(&self) -> Result<Analyzer> {
        let analyzer = Analyzer::new(self.inputs()?, self.config(), self.start_date())?;
        Ok(analyzer)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare cumulative costs over the display window
    Project {
        #[command(flatten)]
        inputs: InputArgs,

        /// Chart width in columns
        #[arg(long, default_value = "72")]
        chart_width: usize,

        /// Chart height in rows
        #[arg(long, default_value = "16")]
        chart_height: usize,
    },

    /// Show the month-by-month cost breakdown of one technology
    Ledger {
        #[command(flatten)]
        inputs: InputArgs,

        /// Battery technology: lead-acid or lithium
        #[arg(short, long, default_value = "lead-acid")]
        technology: Technology,

        /// Number of months to show
        #[arg(short, long, default_value = "24")]
        months: usize,
    },

    /// Export the in-window months to CSV, JSON or Excel
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output file path (.csv, .json or .xlsx)
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Start the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// USD per Turkish lira
        #[arg(long)]
        conversion_rate: Option<f64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project {
            inputs,
            chart_width,
            chart_height,
        } => {
            let analyzer = inputs.analyze()?;
            let window = analyzer.inputs().display_window()?;

            println!(
                "\n{}",
                format!("Battery Cost Projection: {} years", window.years())
                    .bold()
                    .cyan()
            );

            print_summary_table(&analyzer.summary()?);
            print_yearly_table(&analyzer.yearly_snapshots()?);
            print_cost_chart(analyzer.projection(), &window, chart_width, chart_height);
        }

        Commands::Ledger {
            inputs,
            technology,
            months,
        } => {
            let analyzer = inputs.analyze()?;
            print_ledger_table(analyzer.projection().ledger(technology), months);
        }

        Commands::Export {
            inputs,
            output,
            pretty,
        } => {
            let analyzer = inputs.analyze()?;
            let window = analyzer.inputs().display_window()?;
            let writer = io::writer_for(&output, pretty)?;
            writer.write(analyzer.projection(), &window, &output)?;

            println!(
                "{} Exported {} months -> {}",
                "Success:".green().bold(),
                analyzer.projection().window_len(&window),
                output.display()
            );
        }

        #[cfg(feature = "web")]
        Commands::Serve {
            port,
            conversion_rate,
        } => {
            let mut config = ProjectionConfig::default();
            if let Some(rate) = conversion_rate {
                config.conversion_rate = rate;
            }
            config.validate()?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(battery_cost_projection::web::start_server(port, config))?;
        }
    }

    Ok(())
}
