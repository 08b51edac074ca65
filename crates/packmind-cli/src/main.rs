//! Packmind command line interface.
//!
//! Thin surface over the stores, the weather/geocoding clients, and the
//! reminder engine. All user-visible output goes through println!;
//! structured logs go through tracing.

mod commands;

use packmind_core::AppError;

#[tokio::main]
async fn main() {
    if let Err(e) = packmind_core::init() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = commands::run(args).await {
        report(&e);
        std::process::exit(1);
    }
}

fn report(err: &AppError) {
    tracing::error!("{}", err);
    eprintln!("Error: {}", err.user_message());
}
