use std::time::Duration;

pub const ENV_INSTANCE_URL: &str = "SNOWY_INSTANCE_URL";
pub const ENV_USERNAME: &str = "SNOWY_USERNAME";
pub const ENV_PASSWORD: &str = "SNOWY_PASSWORD";

/// Log filter directive, takes precedence over `-v`
pub const ENV_LOG: &str = "SNOWY_LOG";

/// Credential file name, relative to the user's home directory
pub const DEFAULT_AUTH_FILE: &str = ".snowy";

pub const TABLE_API_PATH: &str = "/api/now/table";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_LIMIT: i64 = 100;
