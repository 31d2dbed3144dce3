use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "grocery")]
#[command(about = "Load grocery orders from CSV and query them")]
pub struct CliConfig {
    /// CSV file with one `id,name:price;name:price` order per line
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every loaded order with its total
    List,
    /// Show the products and total of one order
    Show { id: i64 },
    /// Print the order count and the sum of all totals
    Summary,
}
