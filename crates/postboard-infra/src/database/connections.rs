use std::fmt;
use std::sync::Arc;
#[cfg(any(feature = "mongodb", feature = "postgres"))]
use std::time::Duration;

use postboard_core::RepoError;
use postboard_core::ports::PostRepository;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn};

/// Store backend, picked from the scheme of the database URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    MongoDb,
    Postgres,
}

impl DatabaseBackend {
    /// Detect the backend from a connection URL.
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split_once("://")?.0.to_ascii_lowercase();
        match scheme.as_str() {
            "mongodb" | "mongodb+srv" => Some(Self::MongoDb),
            "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MongoDb => "mongodb",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Database to use when the URL does not name one (MongoDB only).
    pub database_name: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn backend(&self) -> Option<DatabaseBackend> {
        DatabaseBackend::from_url(&self.url)
    }
}

/// Process-wide handle to the posts database.
///
/// Opened once with [`DatabaseConnections::init`] before the server starts
/// and released with [`DatabaseConnections::close`] after it stops. The
/// driver handles inside are connection pools and cheap to clone into
/// repositories.
pub enum DatabaseConnections {
    #[cfg(feature = "mongodb")]
    MongoDb {
        client: mongodb::Client,
        database: mongodb::Database,
    },
    #[cfg(feature = "postgres")]
    Postgres(Arc<DbConn>),
}

impl DatabaseConnections {
    /// Connect to the database named by `config.url`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let backend = config.backend().ok_or_else(|| {
            RepoError::Connection(format!(
                "Unsupported database URL scheme: {}",
                config.url.split_once("://").map_or("<none>", |(s, _)| s)
            ))
        })?;

        tracing::info!(%backend, "Initializing database connection...");

        match backend {
            #[cfg(feature = "mongodb")]
            DatabaseBackend::MongoDb => Self::init_mongodb(config).await,
            #[cfg(feature = "postgres")]
            DatabaseBackend::Postgres => Self::init_postgres(config).await,
            #[allow(unreachable_patterns)]
            other => Err(RepoError::Connection(format!(
                "{other} support is not compiled in"
            ))),
        }
    }

    #[cfg(feature = "mongodb")]
    async fn init_mongodb(config: &DatabaseConfig) -> Result<Self, RepoError> {
        use mongodb::options::ClientOptions;

        let connection_error = |e: mongodb::error::Error| RepoError::Connection(e.to_string());

        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(connection_error)?;
        options.max_pool_size = Some(config.max_connections);
        options.min_pool_size = Some(config.min_connections);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.max_idle_time = Some(Duration::from_secs(300));

        let name = options
            .default_database
            .clone()
            .unwrap_or_else(|| config.database_name.clone());

        let client = mongodb::Client::with_options(options).map_err(connection_error)?;
        let database = client.database(&name);

        // The driver connects lazily; ping so a bad URL fails at startup.
        database
            .run_command(bson::doc! { "ping": 1 }, None)
            .await
            .map_err(connection_error)?;

        tracing::info!(
            database = %name,
            "MongoDB connected (pool: {})",
            config.max_connections
        );

        Ok(Self::MongoDb { client, database })
    }

    #[cfg(feature = "postgres")]
    async fn init_postgres(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;
        tracing::info!("PostgreSQL connected (pool: {})", config.max_connections);

        Ok(Self::Postgres(Arc::new(conn)))
    }

    pub fn backend(&self) -> DatabaseBackend {
        match *self {
            #[cfg(feature = "mongodb")]
            Self::MongoDb { .. } => DatabaseBackend::MongoDb,
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Build the post repository backed by this connection.
    pub fn post_repository(&self) -> Arc<dyn PostRepository> {
        match *self {
            #[cfg(feature = "mongodb")]
            Self::MongoDb { ref database, .. } => {
                Arc::new(super::mongo::MongoPostRepository::new(database))
            }
            #[cfg(feature = "postgres")]
            Self::Postgres(ref conn) => Arc::new(super::postgres::PostgresPostRepository::new(
                Arc::clone(conn),
            )),
        }
    }

    /// Close the connection pool. Call after the server has stopped.
    pub async fn close(self) {
        match self {
            #[cfg(feature = "mongodb")]
            Self::MongoDb { client, .. } => {
                client.shutdown().await;
                tracing::info!("MongoDB connection closed");
            }
            #[cfg(feature = "postgres")]
            // Repositories still holding the pool keep it open until dropped.
            Self::Postgres(conn) => match Arc::try_unwrap(conn) {
                Ok(conn) => match conn.close().await {
                    Ok(()) => tracing::info!("PostgreSQL connection closed"),
                    Err(e) => tracing::warn!(error = %e, "Error while closing PostgreSQL pool"),
                },
                Err(_) => tracing::warn!("PostgreSQL pool still in use, not closed explicitly"),
            },
        }
    }
}
