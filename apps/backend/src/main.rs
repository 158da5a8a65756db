use actix_web::{web, App, HttpServer};
use classroom_api::config::db::DbKind;
use classroom_api::infra::state::build_state;
use classroom_api::middleware::cors::cors_middleware;
use classroom_api::middleware::request_trace::RequestTrace;
use classroom_api::middleware::structured_logger::StructuredLogger;
use classroom_api::middleware::trace_span::TraceSpan;
use classroom_api::routes;
use classroom_api::state::security_config::SecurityConfig;

mod telemetry;

/// `APP_JWT_SECRET`, or the older `SECRET_KEY` name.
fn jwt_secret() -> Option<String> {
    ["APP_JWT_SECRET", "SECRET_KEY"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let Some(secret) = jwt_secret() else {
        eprintln!("❌ APP_JWT_SECRET must be set");
        std::process::exit(1);
    };
    let security_config = SecurityConfig::new(secret.into_bytes());

    let builder = match build_state()
        .with_db(DbKind::Postgres)
        .with_security(security_config)
        .with_google_from_env()
    {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("❌ Failed to configure identity provider: {e}");
            std::process::exit(1);
        }
    };

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(%host, port, "starting classroom api");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
