use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    /// Directory holding per-user legacy journal exports awaiting migration,
    /// one `<user_id>.json` file per user.
    pub legacy_import_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            legacy_import_dir: env::var("LEGACY_IMPORT_DIR")
                .unwrap_or_else(|_| "./legacy-imports".into())
                .into(),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
