use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::{routing::get, Router};
use bookings::{Bookings, BookingsConfig};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use url::Url;

mod request_id;

const MODULE_NAME: &str = "bookings";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` when no query is given so the file is created on first start.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    out.push('?');
    out.push_str(query.unwrap_or("mode=rwc"));
    Ok(out)
}

/// Detect DB backend from URL scheme (sqlite/postgres).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim().to_owned();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(&raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Bookings Server - barber appointment booking backend
#[derive(Parser)]
#[command(name = "bookings-server")]
#[command(about = "Bookings Server - barber appointment booking backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Bookings Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// Final DSN: in-memory SQLite under `--mock`, otherwise the configured URL.
fn resolve_dsn(config: &AppConfig, args: &CliArgs) -> Result<String> {
    if args.mock {
        return Ok("sqlite::memory:".to_string());
    }
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("Database configuration required (or pass --mock)"))?;
    detect_from_dsn(db_config)?;

    let dsn = db_config.url.trim().to_owned();
    if dsn.starts_with("sqlite://") {
        absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir), true)
    } else {
        Ok(dsn)
    }
}

async fn connect(config: &AppConfig, dsn: String) -> Result<DatabaseConnection> {
    let db_config = config.database.as_ref();
    // Every connection to sqlite::memory: opens its own empty database.
    let max_conns = match db_config {
        _ if dsn == "sqlite::memory:" => 1,
        Some(d) => d.max_conns(),
        None => 10,
    };

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.max_connections(max_conns)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if let Some(busy) = db_config.map(|d| d.busy_timeout()) {
        opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy));
    }

    tracing::info!("Connecting to database: {}", dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {dsn}"))
}

fn build_router(module: &Bookings, config: &AppConfig) -> Result<Router> {
    let mut router = Router::new().route("/health", get(|| async { "ok" }));
    router = module.register_routes(router)?;

    // Innermost first: Timeout -> CORS -> Trace -> PropagateRequestId -> SetRequestId
    if let Some(timeout) = config.server.request_timeout() {
        router = router.layer(TimeoutLayer::new(timeout));
    }
    router = router.layer(CorsLayer::permissive());
    router = router.layer(request_id::create_trace_layer());

    let x_request_id = request_id::header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    Ok(router)
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let module_cfg: BookingsConfig = config.module_config(MODULE_NAME)?;
    let addr = config.server.bind_addr()?;

    let dsn = resolve_dsn(&config, &args)?;
    let db = connect(&config, dsn).await?;

    tracing::info!("Initializing modules...");
    let module = Bookings::default();
    module.init(db, module_cfg).await?;
    let app = build_router(&module, &config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: BookingsConfig = config.module_config(MODULE_NAME)?;
    if !module_cfg.graphql_path.starts_with('/') {
        return Err(anyhow!(
            "modules.{MODULE_NAME}.graphql_path must start with '/' (got: {})",
            module_cfg.graphql_path
        ));
    }
    let dsn = resolve_dsn(&config, &args)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Database: {dsn}");
    println!("GraphQL endpoint: {}", module_cfg.graphql_path);
    println!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_dsn_is_made_absolute() {
        let tmp = tempfile::tempdir().unwrap();
        let dsn = absolutize_sqlite_dsn("sqlite://database/b.db", tmp.path(), true).unwrap();
        assert!(dsn.starts_with("sqlite://"));
        assert!(dsn.ends_with("database/b.db?mode=rwc"));
        assert!(tmp.path().join("database").exists());

        let dsn = absolutize_sqlite_dsn("sqlite://x.db?mode=ro", tmp.path(), false).unwrap();
        assert!(dsn.ends_with("x.db?mode=ro"));

        assert_eq!(
            absolutize_sqlite_dsn("sqlite::memory:", tmp.path(), false).unwrap(),
            "sqlite::memory:"
        );
        assert!(absolutize_sqlite_dsn("postgres://h/db", tmp.path(), false).is_err());
    }

    #[test]
    fn backend_detected_from_scheme() {
        let cfg = |url: &str| DatabaseConfig {
            url: url.into(),
            max_conns: None,
            busy_timeout_ms: None,
        };
        assert_eq!(detect_from_dsn(&cfg("sqlite://a.db")).unwrap(), "sqlite");
        assert_eq!(detect_from_dsn(&cfg("postgresql://h/db")).unwrap(), "postgres");
        assert!(detect_from_dsn(&cfg("mysql://h/db")).is_err());
        assert!(detect_from_dsn(&cfg("  ")).is_err());
    }
}
