use clap::{Parser, Subcommand};
use egress_probe::ProbeStatus;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "Query a running egress-probe", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:80")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the latest probe status; exits non-zero when unhealthy
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => match fetch_status(&cli.url).await {
            Ok(status) => {
                match serde_json::to_string_pretty(&status) {
                    Ok(text) => println!("{}", text),
                    Err(e) => eprintln!("Error: {}", e),
                }
                if status.ok {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },
    }
}

async fn fetch_status(base: &str) -> Result<ProbeStatus, Box<dyn std::error::Error>> {
    let url = format!("{}{}", base.trim_end_matches('/'), egress_probe::http::STATUS_PATH);
    let res = reqwest::get(&url).await?;

    let status = res.status();
    if !status.is_success() {
        return Err(format!("status API returned {}", status).into());
    }

    Ok(res.json::<ProbeStatus>().await?)
}
