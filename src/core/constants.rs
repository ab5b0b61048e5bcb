//! Defaults and fixed strings shared by the controller, the services and the renderers.

use super::geo::Coordinate;

/// Where the map starts before the user picks anything.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(0.0, 0.0);

/// World overview zoom used on page load.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Zoom applied whenever a location is selected or submitted.
pub const FOCUSED_ZOOM: f64 = 15.0;

/// Zoom range supported by Mapbox GL.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

/// Queries with this many characters or fewer are not geocoded.
pub const MIN_QUERY_CHARS: usize = 2;

/// Default map container element id.
pub const DEFAULT_CONTAINER: &str = "map";

/// Default Mapbox style.
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v11";

/// Mapbox geocoding API host.
pub const DEFAULT_GEOCODING_URL: &str = "https://api.mapbox.com";

/// Development address of the prediction backend.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// JSON `<script>` whose content overrides page detection in the browser.
pub const OPTIONS_SCRIPT_ID: &str = "firemap-options";

/// Environment variable holding the Mapbox access token.
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_TOKEN";

pub const ALERT_PATH: &str = "/alert";
pub const SATELLITE_PREDICT_PATH: &str = "/satellite_predict";
pub const CAMERA_PREDICT_PATH: &str = "/camera_predict";

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const USER_AGENT: &str = concat!("firemap/", env!("CARGO_PKG_VERSION"));

pub const MSG_MISSING_ALERT_FIELDS: &str = "Please provide your email and select a location.";
pub const MSG_ALERT_SUCCESS: &str =
    "Alert subscription successful! You will now receive wildfire alerts.";
pub const MSG_GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again later.";
pub const MSG_MISSING_IMAGE: &str = "Please upload an image first.";
pub const MSG_EMPTY_QUERY: &str = "Please enter a location to search.";
pub const MSG_NO_RESULTS: &str = "No matching locations found.";
pub const MSG_INVALID_LOCATION: &str = "Please select a valid location on the map.";

pub const VERDICT_WILDFIRE: &str = "THERE IS A WILDFIRE";
pub const VERDICT_NO_WILDFIRE: &str = "THERE IS NO WILDFIRE";
