use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use jourj::config::AppConfig;
use jourj::store::{PgBackend, StoreRegistry, spawn_refresh_scheduler};
use jourj::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    let pool = db::init_pool(&config).await.map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
    db::seed_admin(&pool, &config.admin_password).await.map_err(std::io::Error::other)?;

    // Session encryption key: load from SESSION_KEY for sessions that survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let backend = PgBackend::new(pool.clone());
    let registry = StoreRegistry::new();
    spawn_refresh_scheduler(backend.clone(), registry.clone(), config.refresh_interval);
    log::info!("Refreshing open events every {}s", config.refresh_interval.as_secs());

    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);
    let backend = web::Data::new(backend);
    let registry = web::Data::new(registry);

    log::info!("Starting server at http://{}", bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
            .cookie_secure(false)
            .cookie_http_only(true)
            .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .app_data(backend.clone())
            .app_data(registry.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes::configure)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
