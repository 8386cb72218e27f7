use std::{env, str::FromStr};

use actix_web::{
    middleware,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    SqlitePool,
};

mod db;
mod errors;
mod routes;
mod seed;
mod structs;

#[cfg(test)]
mod tests;

use errors::ErrorResponse;

#[derive(Debug, Clone)]
pub struct AppState {
    db_pool: SqlitePool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://staylist.db".to_string());

    let opts = SqliteConnectOptions::from_str(&database_url)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .read_only(false)
        .busy_timeout(std::time::Duration::from_secs(5));

    let db_pool = SqlitePool::connect_with(opts)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    sqlx::migrate!().run(&db_pool).await.expect("Migrate Error");

    info!("Database migrated successfully");

    // `staylist seed` wipes and repopulates sample data, then exits.
    if env::args().nth(1).as_deref() == Some("seed") {
        if let Err(e) = seed::run(&db_pool).await {
            log::error!("Seeding failed: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    info!("Starting HTTP server on http://localhost:8080/");

    HttpServer::new(move || {
        App::new()
            // enable automatic response compression - usually register this first
            .wrap(middleware::Compress::default())
            // enable logger - always register Actix Web Logger middleware last
            .wrap(middleware::Logger::default())
            .service(routes::list_listings)
            .service(routes::get_listing)
            .service(routes::create_listing)
            .service(routes::delete_listing)
            .service(routes::list_bookings)
            .service(routes::get_booking)
            .service(routes::create_booking)
            .service(routes::list_reviews)
            .service(routes::create_review)
            .app_data(Data::new(AppState {
                db_pool: db_pool.clone(),
            }))
            .default_service(web::to(default_handler))
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}

async fn default_handler() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Not found".to_string(),
    })
}
