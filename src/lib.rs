//! Per-device secrets for an AWS IoT connected microcontroller.
//!
//! Values come from `cfg.toml` and are baked in by the build script, see
//! `cfg.toml.example` for the expected keys. The consuming firmware reads
//! [`config::CONFIG`] (or the header style aliases such as
//! [`config::AWS_CERT_CA`]) when bringing up Wi-Fi and the TLS session to the
//! broker.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod cstr;
pub mod naming;
pub mod pem;

pub use config::{
    Config, AWS_CERT_CA, AWS_CERT_CRT, AWS_CERT_PRIVATE, AWS_IOT_ENDPOINT, CONFIG, THING_NAME,
    WIFI_PASSWORD, WIFI_SSID,
};
