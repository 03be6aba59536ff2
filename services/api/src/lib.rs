mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use method_eval::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
