// Application configuration
//
// Fixed tuning constants for the scene and the feed, plus the one piece of
// environment configuration: where the feed lives.

use std::env;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// How often the feed is polled
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// HTTP timeout for a single poll. Also bounds how long teardown can wait
/// on an in-flight request.
pub const FEED_TIMEOUT: Duration = Duration::from_secs(3);

/// Frame interval for the render loop (idle motion runs once per frame)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// How long a pick notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(6);

/// Bubbles spawn uniformly inside [-SPAWN_EXTENT, SPAWN_EXTENT)^3
pub const SPAWN_EXTENT: f64 = 50.0;

/// Bubble radius range [min, max)
pub const BUBBLE_RADIUS_MIN: f64 = 1.0;
pub const BUBBLE_RADIUS_MAX: f64 = 4.0;

/// Idle motion: per-axis delta drawn from [-JITTER_STEP/2, JITTER_STEP/2)
pub const JITTER_STEP: f64 = 0.2;

/// Vertical field of view in degrees
pub const CAMERA_FOV_DEG: f64 = 75.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 1000.0;

/// Initial camera distance from the origin
pub const CAMERA_DISTANCE: f64 = 200.0;
pub const CAMERA_MIN_DISTANCE: f64 = 20.0;
pub const CAMERA_MAX_DISTANCE: f64 = 600.0;

/// Camera orbit step for arrow keys (radians)
pub const ORBIT_STEP: f64 = 0.08;

/// Camera orbit per terminal cell dragged (radians)
pub const DRAG_ORBIT_PER_CELL: f64 = 0.03;

/// Zoom step for +/- and the scroll wheel (multiplicative)
pub const ZOOM_FACTOR: f64 = 1.1;

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f64 = 2.0;

/// Default feed location
pub const DEFAULT_FEED_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the feed location
pub const FEED_URL_ENV: &str = "NETBUBBLES_FEED_URL";

/// Environment variable naming a log file (logging is off when unset)
pub const LOG_FILE_ENV: &str = "NETBUBBLES_LOG";

// ============================================================================
// Configuration Structs
// ============================================================================

/// Where and how often to poll for connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub base_url: String,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl FeedConfig {
    /// Read the feed location from the environment, falling back to the
    /// default local endpoint
    pub fn from_env() -> Self {
        Self::with_base_url(env::var(FEED_URL_ENV).ok())
    }

    fn with_base_url(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_string(),
            poll_interval: POLL_INTERVAL,
            timeout: FEED_TIMEOUT,
        }
    }
}

/// Visual settings toggled at runtime
#[derive(Debug, Clone)]
pub struct SceneSettings {
    /// Idle motion of bubbles (toggle with 'm' key)
    pub motion_enabled: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            motion_enabled: true,
        }
    }
}
