mod cli;
mod infra;
mod routes;
mod server;
mod stress;

use econ_risk::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
