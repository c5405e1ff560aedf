use std::net::IpAddr;
use std::time::Duration;

/// The configuration parameters for the application.
///
/// These can either be passed on the command line, or pulled from environment variables.
/// The latter is preferred as environment variables are one of the recommended ways to
/// get configuration from Kubernetes Secrets in deployment.
///
/// For development convenience, these can also be read from a `.env` file in the working
/// directory where the application is started.
///
/// See `.env.sample` in the repository root for details.
#[derive(clap::Parser, Debug, Clone)]
pub struct Config {
    /// The connection URL for the Postgres database this application should use.
    ///
    /// When unset the service keeps users in process memory, which is only useful
    /// for local experiments since everything is lost on restart.
    #[clap(long, env)]
    pub database_url: Option<String>,

    /// Address the HTTP server binds to.
    #[clap(long, env, default_value = "0.0.0.0")]
    pub bind_addr: IpAddr,

    #[clap(long, env, default_value_t = 3000)]
    pub port: u16,

    /// Upper bound on pooled database connections.
    #[clap(long, env, default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds a single store call may take before the request fails.
    #[clap(long, env, default_value_t = 5)]
    pub store_timeout_secs: u64,

    /// Message reported by the health check at `GET /`.
    #[clap(long, env, default_value = "Rust + sqlx CRUD API")]
    pub app_name: String,
}

impl Config {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}
