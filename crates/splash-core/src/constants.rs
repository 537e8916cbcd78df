/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const LOCATIONS_ROUTE_COMPONENT: &str = "locations";
pub const LOCATIONS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", LOCATIONS_ROUTE_COMPONENT);

pub const SESSIONS_ROUTE_COMPONENT: &str = "sessions";
pub const SESSIONS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SESSIONS_ROUTE_COMPONENT);

pub const RESERVATIONS_ROUTE_COMPONENT: &str = "reservations";
pub const RESERVATIONS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", RESERVATIONS_ROUTE_COMPONENT);

/// Default horizon for validating recurring reservations (two years).
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 730;

/// Default largest calendar window a single generation call may cover.
pub const DEFAULT_MAX_WINDOW_DAYS: u32 = 366;

/// Default cap on rule expansion per query.
pub const DEFAULT_MAX_OCCURRENCES: u16 = 1000;
