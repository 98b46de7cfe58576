use clap::{Parser, Subcommand};
use serde_json::json;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use mercado::config::{DEFAULT_MERCHANT_CITY, DEFAULT_MERCHANT_NAME};
use mercado::generate_charge_payload;
use mercado::payment::uri::{qr_code_url, DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = DEFAULT_QR_SERVICE_URL, help = "QR image service used by --qr")]
    qr_service_url: String,

    #[arg(long, help = "Output only JSON without any formatting or messages")]
    json: bool,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PIX copy-and-pay payload
    Payload {
        #[arg(short, long, env = "PIX_KEY", help = "Destination PIX key")]
        key: String,

        #[arg(short, long, env = "MERCHANT_NAME", default_value = DEFAULT_MERCHANT_NAME, help = "Merchant name (max 25 chars)")]
        name: String,

        #[arg(short, long, env = "MERCHANT_CITY", default_value = DEFAULT_MERCHANT_CITY, help = "Merchant city (max 15 chars)")]
        city: String,

        #[arg(short, long, default_value = "", help = "Transaction id, *** when omitted")]
        txid: String,

        #[arg(short, long, help = "Amount in BRL")]
        amount: f64,

        #[arg(long, help = "Also print a link to the QR image")]
        qr: bool,
    },
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Payload { key, name, city, txid, amount, qr } => {
            let payload = match generate_charge_payload(&key, &name, &city, &txid, amount) {
                Ok(payload) => payload,
                Err(e) => {
                    error!("Failed to generate payload: {}", e);
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            let link = if qr || cli.json {
                match qr_code_url(&cli.qr_service_url, DEFAULT_QR_SIZE, &payload) {
                    Ok(link) => Some(link),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                None
            };

            if cli.json {
                println!("{}", json!({ "payload": payload, "qr_code_url": link }));
            } else {
                println!("{}", payload);
                if let Some(link) = link {
                    println!("{}", link);
                }
            }
        }
    }

    ExitCode::SUCCESS
}
