/// Crate version, handy when reporting which secrets layout was flashed
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default MQTT over TLS port used by AWS IoT Core
pub const MQTT_TLS_PORT: u16 = 8883;

/// Maximum size for TLS processing buffer (for PEM blocks handed to the TLS stack)
pub const TLS_BUFFER_MAX: usize = 4096;

/// Maximum thing name length accepted by AWS IoT
pub const THING_NAME_MAX_LEN: usize = 128;
/// Capacity of the DHCP hostname derived from the thing name
pub const DHCP_HOSTNAME_MAX_LEN: usize = 32;

/// Maximum hostname length (RFC 1123)
pub const HOSTNAME_MAX_LEN: usize = 253;
/// Maximum length of a single hostname label
pub const HOSTNAME_LABEL_MAX_LEN: usize = 63;

/// Maximum SSID length in bytes (802.11)
pub const WIFI_SSID_MAX_LEN: usize = 32;
/// WPA2 passphrase length bounds, 64 allows a raw hex PSK
pub const WIFI_PASSWORD_MIN_LEN: usize = 8;
pub const WIFI_PASSWORD_MAX_LEN: usize = 64;
