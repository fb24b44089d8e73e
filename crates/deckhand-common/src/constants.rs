//! Workspace-wide constants and defaults.

use std::time::Duration;

/// Environment variable holding the bearer token for the platform API.
pub const API_KEY_ENV: &str = "DECKHAND_API_KEY";

/// Fixed timeout applied to every HTTP request.
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool acquisition timeout used when an environment leaves
/// `connection_timeout` empty.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool size used when an environment sets neither
/// `max_open_connections` nor `max_connections`.
pub const DEFAULT_MAX_OPEN_CONNECTIONS: u32 = 10;

/// Default page size for `deployments list` and `containers list`.
pub const DEFAULT_API_PAGE_SIZE: u32 = 20;

/// Default row cap for `db list-containers` and `db list-deployments`.
pub const DEFAULT_DB_LIST_LIMIT: u32 = 10;

/// Default path of the platform API environment document.
pub const DEFAULT_API_CONFIG_PATH: &str = "config/platform.yaml";

/// Default path of the MySQL environment document.
pub const DEFAULT_DB_CONFIG_PATH: &str = "config/mysql.yaml";

/// Default database environment used by the `db` commands.
pub const DEFAULT_DB_ENVIRONMENT: &str = "production";

/// Application name used in CLI output.
pub const APP_NAME: &str = "deckhand";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "deckhand";
