/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Workspaces endpoint
    pub const WORKSPACES: &str = "workspaces";

    /// Runs endpoint (nested under a workspace)
    pub const RUNS: &str = "runs";

    /// Configuration versions endpoint (nested under a workspace)
    pub const CONFIGURATION_VERSIONS: &str = "configuration-versions";

    /// State versions endpoint (top level, filtered by workspace and org)
    pub const STATE_VERSIONS: &str = "state-versions";

    /// JSON:API media type sent with every request
    pub const CONTENT_TYPE: &str = "application/vnd.api+json";

    /// Default page size for collection requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Upper bound on pages followed through `links.next` for one collection
    pub const MAX_PAGES: u32 = 500;

    /// Configuration versions requested per workspace (the diffed head pair)
    pub const CONFIGURATION_VERSION_PAGE_SIZE: u32 = 2;

    /// Number of state versions reported per workspace
    pub const STATE_VERSION_PAGE_SIZE: u32 = 2;

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Environment variables read by the configuration resolver
pub mod env {
    /// API address (scheme optional)
    pub const ADDR: &str = "TFE_ADDR";

    /// API bearer token
    pub const TOKEN: &str = "TFE_TOKEN";

    /// Optional PEM bundle with extra trusted CA certificates
    pub const CACERT: &str = "TFE_CACERT";

    /// Organization name (the --org flag takes precedence)
    pub const ORG: &str = "TFE_ORG";
}

/// Resource id prefixes
pub mod ids {
    /// Configuration version ids
    pub const CONFIGURATION_VERSION_PREFIX: &str = "cv-";

    /// State version ids
    pub const STATE_VERSION_PREFIX: &str = "sv-";
}

/// Scratch space layout for configuration diffs
pub mod scratch {
    /// Application directory below the platform data dir
    pub const APP_DIR: &str = "tfx-probe";

    /// Fallback application directory below $HOME
    pub const HOME_APP_DIR: &str = ".tfx-probe";

    /// Scratch root below the application directory
    pub const ROOT_DIR: &str = "scratch";

    /// Extraction directory for the newest configuration version
    pub const LATEST_DIR: &str = "latest";

    /// Extraction directory for the previous configuration version
    pub const PREVIOUS_DIR: &str = "previous";

    /// Decompressed archive of the newest configuration version
    pub const LATEST_ARCHIVE: &str = "latest.tar";

    /// Decompressed archive of the previous configuration version
    pub const PREVIOUS_ARCHIVE: &str = "previous.tar";
}

/// Default values for CLI
pub mod defaults {
    /// Scheme prepended to addresses given without one
    pub const SCHEME: &str = "https://";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Width of banner separators
    pub const SEPARATOR_WIDTH: usize = 80;

    /// Context lines around each diff hunk
    pub const DIFF_CONTEXT_LINES: usize = 0;
}
