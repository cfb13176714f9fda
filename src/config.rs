use core::ffi::CStr;
use heapless::{String, Vec};

use crate::constants::{
    DHCP_HOSTNAME_MAX_LEN, TLS_BUFFER_MAX, VERSION, WIFI_PASSWORD_MAX_LEN, WIFI_PASSWORD_MIN_LEN,
    WIFI_SSID_MAX_LEN,
};
use crate::cstr;
use crate::naming;
use crate::pem::{self, Material, PemBlock, PemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // Thing name (MQTT client id, also used as DHCP hostname)
    pub thing_name: &'static str,

    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'static str,

    // Wi-Fi password (WPA2 passphrase)
    pub wifi_password: &'static str,

    // AWS IoT device data endpoint
    pub aws_iot_endpoint: &'static str,

    // MQTT port (8883 for MQTT over TLS)
    pub mqtt_port: u16,

    // Root CA the broker certificate chains to (Amazon Root CA 1)
    pub aws_cert_ca: &'static str,

    // Device certificate presented for mutual TLS
    pub aws_cert_crt: &'static str,

    // Device RSA private key matching `aws_cert_crt`
    pub aws_cert_private: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    ThingName(naming::Error),
    WifiSsidLength,
    WifiPasswordLength,
    Endpoint(naming::Error),
    InvalidPort,
    RootCa(pem::Error),
    DeviceCertificate(pem::Error),
    PrivateKey(pem::Error),
    HostnameTooLong,
    InvalidHostname(naming::Error),
    TlsBuffer(cstr::Error),
}

/// The PEM values handed to the TLS stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    RootCa,
    DeviceCertificate,
    PrivateKey,
}

impl Credential {
    pub const ALL: [Credential; 3] = [
        Credential::RootCa,
        Credential::DeviceCertificate,
        Credential::PrivateKey,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Credential::RootCa => "root CA",
            Credential::DeviceCertificate => "device certificate",
            Credential::PrivateKey => "private key",
        }
    }

    pub const fn pem_kind(self) -> PemKind {
        match self {
            Credential::RootCa | Credential::DeviceCertificate => PemKind::Certificate,
            Credential::PrivateKey => PemKind::RsaPrivateKey,
        }
    }

    fn error(self, e: pem::Error) -> Error {
        match self {
            Credential::RootCa => Error::RootCa(e),
            Credential::DeviceCertificate => Error::DeviceCertificate(e),
            Credential::PrivateKey => Error::PrivateKey(e),
        }
    }
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

pub const THING_NAME: &str = CONFIG.thing_name;
pub const WIFI_SSID: &str = CONFIG.wifi_ssid;
pub const WIFI_PASSWORD: &str = CONFIG.wifi_password;
pub const AWS_IOT_ENDPOINT: &str = CONFIG.aws_iot_endpoint;
pub const AWS_CERT_CA: &str = CONFIG.aws_cert_ca;
pub const AWS_CERT_CRT: &str = CONFIG.aws_cert_crt;
pub const AWS_CERT_PRIVATE: &str = CONFIG.aws_cert_private;

impl Config {
    pub fn credential(&self, credential: Credential) -> &'static str {
        match credential {
            Credential::RootCa => self.aws_cert_ca,
            Credential::DeviceCertificate => self.aws_cert_crt,
            Credential::PrivateKey => self.aws_cert_private,
        }
    }

    fn pem_block(&self, credential: Credential) -> Result<PemBlock<'static>, Error> {
        pem::parse(self.credential(credential), credential.pem_kind())
            .map_err(|e| credential.error(e))
    }

    /// Checks every value against the rules the broker and the Wi-Fi stack
    /// will apply, stopping at the first failure.
    ///
    /// Placeholder PEM bodies pass, see [`Config::is_provisioned`].
    pub fn validate(&self) -> Result<(), Error> {
        self.check().map_err(|e| {
            log::error!("Invalid device configuration: {:?}", e);
            e
        })
    }

    fn check(&self) -> Result<(), Error> {
        naming::validate_thing_name(self.thing_name).map_err(Error::ThingName)?;

        if self.wifi_ssid.is_empty() || self.wifi_ssid.len() > WIFI_SSID_MAX_LEN {
            return Err(Error::WifiSsidLength);
        }
        if !(WIFI_PASSWORD_MIN_LEN..=WIFI_PASSWORD_MAX_LEN).contains(&self.wifi_password.len()) {
            return Err(Error::WifiPasswordLength);
        }

        naming::validate_hostname(self.aws_iot_endpoint).map_err(Error::Endpoint)?;
        if self.mqtt_port == 0 {
            return Err(Error::InvalidPort);
        }

        for credential in Credential::ALL {
            self.pem_block(credential)?;
        }

        Ok(())
    }

    /// True once the template credentials have been replaced with real material.
    pub fn is_provisioned(&self) -> bool {
        if self.check().is_err() {
            return false;
        }

        let mut provisioned = true;
        for credential in Credential::ALL {
            let material = pem::classify(self.credential(credential), credential.pem_kind());
            if material == Ok(Material::Placeholder) {
                log::warn!("The {} is still placeholder text", credential.name());
                provisioned = false;
            }
        }
        provisioned
    }

    /// Thing name as a DHCP hostname.
    ///
    /// `:` and `_` are legal in thing names but not in hostnames, both become `-`.
    pub fn dhcp_hostname(&self) -> Result<String<DHCP_HOSTNAME_MAX_LEN>, Error> {
        let mut hostname = String::<DHCP_HOSTNAME_MAX_LEN>::new();
        for c in self.thing_name.chars() {
            let c = if matches!(c, ':' | '_') { '-' } else { c };
            hostname.push(c).map_err(|_| Error::HostnameTooLong)?;
        }

        naming::validate_hostname(&hostname).map_err(Error::InvalidHostname)?;
        Ok(hostname)
    }

    /// Writes a checked credential into `buffer` as the NUL-terminated PEM
    /// string mbedTLS expects.
    pub fn write_credential<'buf>(
        &self,
        credential: Credential,
        buffer: &'buf mut [u8],
    ) -> Result<&'buf CStr, Error> {
        self.pem_block(credential)?;
        cstr::write_c_str(self.credential(credential), buffer).map_err(Error::TlsBuffer)
    }

    /// Same as [`Config::write_credential`], into an owned TLS sized buffer.
    pub fn credential_c_str(
        &self,
        credential: Credential,
    ) -> Result<Vec<u8, TLS_BUFFER_MAX>, Error> {
        self.pem_block(credential)?;
        cstr::c_str_vec(self.credential(credential)).map_err(Error::TlsBuffer)
    }

    /// Logs the configuration without revealing secrets.
    pub fn log_summary(&self) {
        log::info!("Device secrets v{}", VERSION);
        log::info!("Thing name: {}", self.thing_name);
        log::info!(
            "Wi-Fi SSID: {:?} (password: {} chars)",
            self.wifi_ssid,
            self.wifi_password.len()
        );
        match naming::aws_region(self.aws_iot_endpoint) {
            Some(region) => log::info!(
                "Broker: {}:{} (AWS region {})",
                self.aws_iot_endpoint,
                self.mqtt_port,
                region
            ),
            None => log::info!("Broker: {}:{}", self.aws_iot_endpoint, self.mqtt_port),
        }

        for credential in Credential::ALL {
            let name = credential.name();
            match self.pem_block(credential) {
                Ok(block) if block.is_placeholder() => {
                    log::warn!("{}: placeholder, replace before flashing", name)
                }
                Ok(block) => log::info!(
                    "{}: {} (~{} bytes DER)",
                    name,
                    block.kind.label(),
                    block.decoded_len_estimate()
                ),
                Err(e) => log::error!("{}: malformed PEM: {:?}", name, e),
            }
        }
    }
}
