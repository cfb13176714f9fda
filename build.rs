use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

#[allow(dead_code)]
#[path = "src/constants.rs"]
mod constants;

#[allow(dead_code)]
#[path = "src/pem.rs"]
mod pem;

use pem::{Material, PemKind};

fn default_mqtt_port() -> u16 {
    constants::MQTT_TLS_PORT
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    thing_name: String,
    wifi_ssid: String,
    wifi_password: String,
    aws_iot_endpoint: String,
    #[serde(default = "default_mqtt_port")]
    mqtt_port: u16,
    aws_cert_ca: String,
    aws_cert_crt: String,
    aws_cert_private: String,
}

fn check_pem(name: &str, text: &str, kind: PemKind) -> Result<(), Box<dyn Error>> {
    let material = pem::classify(text, kind)
        .map_err(|e| format!("{name}: expected a single {} PEM block ({e:?})", kind.label()))?;

    if material == Material::Placeholder {
        println!("cargo:warning={name} is still placeholder text, replace it before flashing");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-env-changed=SECRETS_CFG");
    let cfg_path = env::var("SECRETS_CFG").unwrap_or_else(|_| "cfg.toml".to_string());
    println!("cargo:rerun-if-changed={cfg_path}");

    // Read and parse
    let toml_str = fs::read_to_string(&cfg_path)
        .map_err(|e| format!("cannot read {cfg_path} (copy cfg.toml.example): {e}"))?;
    let raw: RawConfig = toml::from_str(&toml_str)?;

    check_pem("aws_cert_ca", &raw.aws_cert_ca, PemKind::Certificate)?;
    check_pem("aws_cert_crt", &raw.aws_cert_crt, PemKind::Certificate)?;
    check_pem("aws_cert_private", &raw.aws_cert_private, PemKind::RsaPrivateKey)?;

    // Generate Rust code
    let code = format!(
        r#"
        pub const CONFIG: Config = Config {{
            thing_name: {thing:?},
            wifi_ssid: {ssid:?},
            wifi_password: {psk:?},
            aws_iot_endpoint: {endpoint:?},
            mqtt_port: {port},
            aws_cert_ca: {ca:?},
            aws_cert_crt: {crt:?},
            aws_cert_private: {key:?},
        }};
    "#,
        thing = raw.thing_name,
        ssid = raw.wifi_ssid,
        psk = raw.wifi_password,
        endpoint = raw.aws_iot_endpoint,
        port = raw.mqtt_port,
        ca = raw.aws_cert_ca,
        crt = raw.aws_cert_crt,
        key = raw.aws_cert_private,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, code)?;
    Ok(())
}
