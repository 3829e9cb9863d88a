mod cli;
mod identify;
mod infra;
mod routes;
mod server;

use mineral_id::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
