mod canonical;
mod duplicates;
mod error;
mod output;
mod parser;
mod records;
mod settings;
mod sources;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use duplicates::{find_duplicates, DuplicateReport};
use records::DomainRecord;
use settings::Settings;

#[derive(Parser)]
#[command(name = "tw_site_rank", about = "Country website rankings from AhrefsTop, Tranco and Cloudflare Radar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the AhrefsTop country ranking and parse its table
    Ahrefs {
        /// Output file (default: <output_dir>/ahrefs_top_<tld>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a saved AhrefsTop page instead of downloading it
    Extract {
        /// HTML file to parse
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Download the Tranco top-1m list and keep domains under the country TLD
    Tranco {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Query Cloudflare Radar top domains (needs CLOUDFLARE_API_TOKEN)
    Cloudflare {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Find entries of a saved list that collapse to the same site without "www."
    Duplicates {
        /// Ranking list to check (default: <output_dir>/tranco_list_<tld>.json)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Report file (default: <output_dir>/duplicates-check.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Ahrefs { output } => {
            let client = sources::http::client(&settings)?;
            let sites = sources::ahrefs::fetch_ranking(&client, &settings).await?;
            let path = output.unwrap_or_else(|| settings.output_file(&format!("ahrefs_top_{}.json", settings.tld)));
            output::write_json(&path, &sites)?;
            print_saved("website rankings", sites.len(), &path);
            println!("First 5: {}", output::preview(&sites, 5));
            Ok(())
        }
        Commands::Extract { input, output } => {
            let html = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let sites = parser::extract_table(&html)?;
            if sites.is_empty() {
                anyhow::bail!("No ranking rows parsed from {}", input.display());
            }
            let path = output.unwrap_or_else(|| settings.output_file(&format!("ahrefs_top_{}.json", settings.tld)));
            output::write_json(&path, &sites)?;
            print_saved("website rankings", sites.len(), &path);
            Ok(())
        }
        Commands::Tranco { output } => {
            let client = sources::http::client(&settings)?;
            let list = sources::tranco::fetch_list(&client, &settings).await?;
            let path = output.unwrap_or_else(|| settings.output_file(&format!("tranco_list_{}.json", settings.tld)));
            output::write_json(&path, &list.entries)?;
            println!("Lines in list (incl. blank): {}", list.lines);
            print_saved(&format!(".{} domains", settings.tld), list.entries.len(), &path);
            println!("First 5: {}", output::preview(&list.entries, 5));
            Ok(())
        }
        Commands::Cloudflare { output } => {
            let client = sources::http::client(&settings)?;
            let domains = sources::cloudflare::fetch_top_domains(&client, &settings).await?;
            let path = output.unwrap_or_else(|| settings.output_file(&format!("cloudflare_radar_{}.json", settings.tld)));
            output::write_json(&path, &domains)?;
            print_saved("ranked domains", domains.len(), &path);
            println!("First 5: {}", output::preview(&domains, 5));
            Ok(())
        }
        Commands::Duplicates { input, output } => {
            let input = input.unwrap_or_else(|| settings.output_file(&format!("tranco_list_{}.json", settings.tld)));
            let records: Vec<DomainRecord> = output::read_json(&input)?;
            let report = find_duplicates(&records, DomainRecord::domain);
            print_report(&report);
            let path = output.unwrap_or_else(|| settings.output_file("duplicates-check.json"));
            output::write_json(&path, &report)?;
            println!("\nFull report written to {}", path.display());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_saved(what: &str, count: usize, path: &std::path::Path) {
    println!("{}", "-".repeat(48));
    println!("Saved {} {} to {}", count, what, path.display());
}

fn print_report(report: &DuplicateReport<DomainRecord>) {
    println!("Total records:            {}", report.total);
    println!("Unique after normalizing: {}", report.unique);
    println!("Duplicated sites:         {}", report.duplicates);
    println!("Redundant entries:        {}", report.redundant());
    if report.duplicate_list.is_empty() {
        return;
    }

    println!();
    for (i, cluster) in report.duplicate_list.iter().enumerate() {
        println!("{:>3}. {}", i + 1, cluster.normalized);
        for d in &cluster.domains {
            println!(
                "     - {} (rank: {}, url: {})",
                d.domain(),
                d.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".into()),
                d.url.as_deref().unwrap_or("-")
            );
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
