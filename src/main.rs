use std::path::PathBuf;

use actix_web::{middleware, App, HttpServer};
use clap::Parser;
use log::{debug, error, info};

mod config;
mod error;
mod greeting;
mod http;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct CliArgs {
    /// Path to the config file. Defaults to config.yml when present
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Port of the HTTP server, overrides the config file
    #[clap(short, long, value_parser)]
    port: Option<u16>,
}

fn load_config(args: &CliArgs) -> Result<config::AppConfig, error::ConfigError> {
    let mut app_config = config::read_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        app_config.server.port = config::Port(port);
    }
    Ok(app_config)
}

/// Installs env_logger behind the Sentry logger, so that error records also
/// reach Sentry when it is enabled.
fn init_logging(logging_config: &config::LoggingConfig) -> Result<(), log::SetLoggerError> {
    let logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&logging_config.level),
    )
    .build();
    let max_level = logger.filter();

    log::set_boxed_logger(Box::new(
        sentry::integrations::log::SentryLogger::with_dest(logger),
    ))?;
    log::set_max_level(max_level);
    Ok(())
}

fn init_sentry(
    sentry_config: &config::SentryConfig,
) -> Result<Option<sentry::ClientInitGuard>, error::ConfigError> {
    let Some(dsn) = &sentry_config.dsn else {
        return Ok(None);
    };
    let dsn = dsn
        .parse::<sentry::types::Dsn>()
        .map_err(|e| error::ConfigError::SentryDsn(e.to_string()))?;

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        traces_sample_rate: sentry_config.traces_sample_rate.unwrap_or(0.0),
        ..Default::default()
    });
    Ok(Some(guard))
}

async fn serve(server_config: config::ServerConfig) -> std::io::Result<()> {
    let http_server = HttpServer::new(|| {
        App::new()
            .wrap(sentry_actix::Sentry::new())
            // enable logger - always register actix-web Logger middleware last
            .wrap(middleware::Logger::default())
            // register HTTP requests handlers
            .configure(http::config)
    });
    let http_server = match server_config.workers {
        Some(workers) => http_server.workers(workers.get()),
        None => http_server,
    };
    let http_server = http_server.bind(server_config.bind_address())?;

    info!("HTTP server listening on: {:?}", http_server.addrs());

    http_server.run().await
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let app_config = load_config(&args)?;

    init_logging(&app_config.logging)?;
    debug!("CLI args: {:?}", args);
    debug!("Config: {:?}", app_config);

    // Sentry must be initialised before the actix system starts its worker threads.
    let sentry_guard = init_sentry(&app_config.sentry)?;
    if sentry_guard.is_some() {
        info!("Sentry error reporting enabled");
    }

    if let Err(e) = actix_web::rt::System::new().block_on(serve(app_config.server)) {
        error!("HTTP server stopped: {:?}", e);
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn port_flag_overrides_config() {
        let path = std::env::temp_dir().join(format!(
            "hello-world-service-{}-cli.yml",
            std::process::id()
        ));
        std::fs::write(&path, "server:\n  host: 127.0.0.1\n  port: 3000\n").unwrap();

        let config_arg = path.to_string_lossy().into_owned();
        let args = CliArgs::try_parse_from([
            "hello-world-service",
            "--config",
            config_arg.as_str(),
            "-p",
            "9000",
        ])
        .unwrap();
        let app_config = load_config(&args);
        std::fs::remove_file(&path).unwrap();

        let app_config = app_config.unwrap();
        assert_eq!(app_config.server.port, config::Port(9000));
        assert_eq!(app_config.server.host, "127.0.0.1");
    }

    #[test]
    fn missing_config_file_given_on_command_line() {
        let args = CliArgs::try_parse_from([
            "hello-world-service",
            "--config",
            "/nonexistent/hello-world-service.yml",
        ])
        .unwrap();
        assert!(matches!(
            load_config(&args),
            Err(error::ConfigError::Read { .. })
        ));
    }

    #[test]
    fn invalid_sentry_dsn_is_rejected() {
        let sentry_config = config::SentryConfig {
            dsn: Some("not a dsn".to_string()),
            traces_sample_rate: None,
        };
        assert!(matches!(
            init_sentry(&sentry_config),
            Err(error::ConfigError::SentryDsn(_))
        ));
    }

    #[test]
    fn sentry_disabled_without_dsn() {
        let guard = init_sentry(&config::SentryConfig::default()).unwrap();
        assert!(guard.is_none());
    }
}
