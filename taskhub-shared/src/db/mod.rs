/// Database access layer
///
/// - `pool`: PostgreSQL connection pool setup and health checks
/// - `migrations`: embedded migration runner

pub mod migrations;
pub mod pool;
