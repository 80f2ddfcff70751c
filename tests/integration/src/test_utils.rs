//! Shared fixtures: context construction, envelope encryption, and a
//! one-shot HTTP server standing in for the appliance.

use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use airbridge_domain::{BridgeContext, DeviceIdentity, SensorDefinition, SensorTable};
use airbridge_telemetry::crypto::derive_key;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

/// Shared secret used across the fixtures.
pub const SECRET: &str = "swordfish";

/// Build a context with co2/temperature/humidity sensors pointing at
/// `address`.
pub fn context(address: &str) -> BridgeContext {
    let mut table = SensorTable::with_capacity(20);
    for (name, sensor_type) in [("co2", 5u32), ("temperature", 1), ("humidity", 2)] {
        table
            .push(SensorDefinition {
                name: name.to_string(),
                sensor_type,
                sensor_usage: 1,
                active: true,
            })
            .unwrap();
    }
    BridgeContext::new(
        DeviceIdentity {
            id: "4711".to_string(),
            address: address.to_string(),
            secret: SECRET.to_string(),
            name: "office".to_string(),
            zone_id: 3,
        },
        table,
        1,
    )
}

/// Encrypt a payload the way the appliance does: AES-256-CBC under the
/// derived key, IV prepended, the whole thing base64-encoded. PKCS#7
/// padding is applied since the bridge is expected to tolerate it.
pub fn encrypt_envelope(payload: &[u8], secret: &str) -> String {
    let iv = [0x42u8; 16];
    let key = derive_key(secret);
    let ciphertext = Aes256CbcEnc::new_from_slices(&key, &iv)
        .unwrap()
        .encrypt_padded_vec_mut::<Pkcs7>(payload);
    let mut packed = iv.to_vec();
    packed.extend_from_slice(&ciphertext);
    BASE64.encode(packed)
}

/// Wrap an envelope in the `/data` response body.
pub fn data_body(envelope: &str) -> String {
    serde_json::json!({ "content": envelope, "uptime": 4223 }).to_string()
}

/// Serve exactly one HTTP response on a fresh local port and return the
/// address to direct the fetcher at.
pub async fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "{}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    address
}
