/// Port the HTTP server listens on when `PORT` is not set
pub const DEFAULT_PORT: u16 = 5002;

/// Address the HTTP server binds to when `HOST` is not set
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// SQLite database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite:postboard.db";

/// Connection pool size when `DATABASE_MAX_CONNECTIONS` is not set
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Directory served as static content
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Directory uploaded post images are written to
pub const DEFAULT_UPLOAD_DIR: &str = "public/uploads";

/// URL prefix uploaded files are served under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Upper bound for a multipart post submission (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
