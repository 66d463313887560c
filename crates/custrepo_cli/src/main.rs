//! `custrepo` command-line entry point.
//!
//! # Responsibility
//! - Load layered configuration and start logging.
//! - Expose the connection check and customer CRUD as subcommands.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use custrepo_core::db::ensure_schema;
use custrepo_core::{
    init_logging, AppConfig, ConnectionProvider, Customer, CustomerService, NewCustomer,
    SqliteConnectionProvider, SqliteCustomerRepository,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "custrepo",
    version,
    about = "Customer records over a SQLite database"
)]
struct Cli {
    /// TOML configuration file; `CUSTREPO_*` environment variables override it
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding configuration
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Acquire one connection and report whether it is open
    Check,
    /// Create the customers table if it does not exist (creates the database file)
    Init,
    /// Insert a customer and print its id
    Add {
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Show one customer
    Get { id: i64 },
    /// List all customers
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Replace name and email of a customer
    Update {
        id: i64,
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Delete a customer
    Delete { id: i64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if matches!(cli.command, Commands::Init) {
        config.database.create_if_missing = true;
    }

    let log_dir = config
        .logging
        .dir
        .as_ref()
        .map(|dir| dir.to_string_lossy().into_owned());
    init_logging(&config.logging.level, log_dir.as_deref())
        .context("failed to initialize logging")?;
    info!(
        "event=cli_start module=cli status=ok version={} database={}",
        custrepo_core::core_version(),
        config.database.path.display()
    );

    let provider = SqliteConnectionProvider::new(config.database);
    let service = CustomerService::new(SqliteCustomerRepository::new(&provider));

    match cli.command {
        Commands::Check => {
            let conn = provider
                .get_connection()
                .context("failed to acquire a connection")?;
            let open = conn
                .query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))
                .is_ok();
            println!("connection open={open}");
        }
        Commands::Init => {
            let conn = provider
                .get_connection()
                .context("failed to acquire a connection")?;
            ensure_schema(&conn).context("failed to create customers table")?;
            println!(
                "customers table ready in {}",
                provider.config().path.display()
            );
        }
        Commands::Add {
            first_name,
            last_name,
            email,
        } => {
            let id = service.register(first_name, last_name, email)?;
            println!("{id}");
        }
        Commands::Get { id } => match service.get(id)? {
            Some(customer) => print_customer(&customer),
            None => bail!("customer {id} not found"),
        },
        Commands::List { json } => {
            let customers = service.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&customers)?);
            } else {
                customers.iter().for_each(print_customer);
            }
        }
        Commands::Update {
            id,
            first_name,
            last_name,
            email,
        } => {
            let contact = NewCustomer::new(first_name, last_name, email);
            if !service.change_contact(id, &contact)? {
                bail!("customer {id} not found");
            }
            println!("updated {id}");
        }
        Commands::Delete { id } => {
            if !service.remove(id)? {
                bail!("customer {id} not found");
            }
            println!("deleted {id}");
        }
    }

    Ok(())
}

fn print_customer(customer: &Customer) {
    println!(
        "{}\t{}\t{}\t{}\t{}",
        customer.id,
        customer.first_name,
        customer.last_name,
        customer.email,
        customer.registration_date
    );
}
