pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use roster_core::config::{AppConfig, LoadOptions};
use std::process::ExitCode;

use commands::customers::CustomerFields;

#[derive(Debug, Parser)]
#[command(
    name = "roster",
    about = "Roster customer directory CLI",
    long_about = "Manage customer records and operate the roster database: migrations, seed data, config inspection, and readiness checks.",
    after_help = "Examples:\n  roster migrate\n  roster customers list\n  roster customers find --email penatibus.et@lectusa.com\n  roster doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load and verify the deterministic customer seed dataset")]
    Seed,
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config, DB connectivity, and customer table readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(subcommand, about = "Read and write customer records")]
    Customers(CustomerCommand),
}

#[derive(Debug, Subcommand)]
enum CustomerCommand {
    #[command(about = "List every customer in storage order")]
    List,
    #[command(about = "Look up a customer by exact email address")]
    Find {
        #[arg(long = "email")]
        email_address: String,
    },
    #[command(about = "Look up a customer by identifier")]
    Get {
        #[arg(long = "id")]
        customer_id: String,
    },
    #[command(about = "Add a customer, generating an identifier unless --id is given")]
    Add {
        #[arg(long = "id")]
        customer_id: Option<String>,
        #[command(flatten)]
        fields: CustomerFields,
    },
    #[command(about = "Overwrite every field of the customer with the given identifier")]
    Update {
        #[arg(long = "id")]
        customer_id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        logging::init_logging(&config.logging);
    }

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Customers(command) => match command {
            CustomerCommand::List => commands::customers::list(),
            CustomerCommand::Find { email_address } => commands::customers::find(email_address),
            CustomerCommand::Get { customer_id } => commands::customers::get(customer_id),
            CustomerCommand::Add { customer_id, fields } => {
                commands::customers::add(fields, customer_id)
            }
            CustomerCommand::Update { customer_id, fields } => {
                commands::customers::update(customer_id, fields)
            }
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
