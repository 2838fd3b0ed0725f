use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::config::StoreBackend;
use user_service::domain::authentication::ports::AuthServicePort;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::UserGrpcService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;
use user_service::proto::user_service_server::UserServiceServer;

type Services = (Arc<dyn AuthServicePort>, Arc<dyn UserServicePort>);

fn build_services<UR: UserRepository>(
    repository: UR,
    authenticator: Arc<Authenticator>,
) -> Services {
    let repository = Arc::new(repository);
    (
        Arc::new(AuthService::new(Arc::clone(&repository), authenticator)),
        Arc::new(UserService::new(repository)),
    )
}

async fn shutdown_signal(server: &'static str) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!(server, "Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        token_ttl_seconds = config.jwt.ttl_seconds,
        password_cost = config.password.cost,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(&config.auth_config())?);

    let (auth_service, user_service) = match config.database.backend {
        StoreBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(PostgresUserRepository::new(pg_pool), authenticator)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            build_services(InMemoryUserRepository::new(), authenticator)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&auth_service), Arc::clone(&user_service));
    let http_server = tokio::spawn(async move {
        axum::serve(http_listener, http_application)
            .with_graceful_shutdown(shutdown_signal("http"))
            .await
    });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = UserGrpcService::new(auth_service, user_service);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(UserServiceServer::new(grpc_service))
            .serve_with_shutdown(grpc_address, shutdown_signal("grpc"))
            .await
    });

    let (http_result, grpc_result) = tokio::try_join!(http_server, grpc_server)?;
    if let Err(e) = http_result {
        tracing::error!(error = %e, "Http server error");
    }
    if let Err(e) = grpc_result {
        tracing::error!(error = %e, "gRpc server error");
    }

    tracing::info!("Servers stopped");

    Ok(())
}
