use airbridge_domain::BridgeError;
use airbridge_property::{
    BusAddresses, BusDispatch, GetItem, GetPropertyRequest, PropertyStatus, PropertyValue,
    SetItem, SetPropertyRequest,
};
use airbridge_telemetry::{unix_now, TelemetryPipeline};

use crate::test_utils::{context, data_body, encrypt_envelope, serve_once, SECRET};

fn dispatch_for(context: airbridge_domain::SharedContext) -> BusDispatch {
    BusDispatch::new(
        context,
        BusAddresses {
            controller: "4711-vdc".to_string(),
            container: "4711-container".to_string(),
            device: "4711".to_string(),
        },
        Box::new(|_| {}),
    )
}

#[tokio::test]
async fn test_encrypted_payload_flows_into_sensor_states() {
    let envelope = encrypt_envelope(
        br#"{"co2": [412.5], "temperature": [21.25], "health": [768000]}"#,
        SECRET,
    );
    let address = serve_once("HTTP/1.1 200 OK", data_body(&envelope)).await;

    let shared = context(&address).into_shared();
    let pipeline = TelemetryPipeline::new();
    let changed = pipeline.poll_once(&shared).await.unwrap();
    assert!(changed);

    let dispatch = dispatch_for(shared);
    let reply = dispatch
        .get_property("4711", &GetPropertyRequest::names(["sensorStates"]))
        .unwrap();
    let states = reply.get_node("sensorStates").unwrap();
    assert_eq!(
        states.get_node("0").unwrap().get("value"),
        Some(&PropertyValue::Double(412.5))
    );
    assert_eq!(
        states.get_node("1").unwrap().get("value"),
        Some(&PropertyValue::Double(21.25))
    );
    // humidity never appeared in the payload
    assert_eq!(
        states.get_node("2").unwrap().get("value"),
        Some(&PropertyValue::Double(0.0))
    );
}

#[tokio::test]
async fn test_second_identical_payload_reports_no_change() {
    let envelope = encrypt_envelope(br#"{"co2": [400]}"#, SECRET);
    let pipeline = TelemetryPipeline::new();

    let address = serve_once("HTTP/1.1 200 OK", data_body(&envelope)).await;
    let shared = context(&address).into_shared();
    assert!(pipeline.poll_once(&shared).await.unwrap());

    let address = serve_once("HTTP/1.1 200 OK", data_body(&envelope)).await;
    shared.lock().unwrap().identity.address = address;
    assert!(!pipeline.poll_once(&shared).await.unwrap());
}

#[tokio::test]
async fn test_rejecting_status_leaves_readings_untouched() {
    let address = serve_once("HTTP/1.1 503 Service Unavailable", String::new()).await;
    let shared = context(&address).into_shared();
    {
        let mut guard = shared.lock().unwrap();
        let entry = guard.sensors.find_by_name_mut("co2").unwrap();
        entry.reading.current = 555.0;
        entry.reading.last_fetch = 100;
    }

    let result = TelemetryPipeline::new().poll_once(&shared).await;
    assert!(matches!(result, Err(BridgeError::ConnectFailed(_))));

    let guard = shared.lock().unwrap();
    let entry = guard.sensors.find_by_name("co2").unwrap();
    assert_eq!(entry.reading.current, 555.0);
    assert_eq!(entry.reading.last_fetch, 100);
}

#[tokio::test]
async fn test_garbled_envelope_fails_without_table_update() {
    let address = serve_once(
        "HTTP/1.1 200 OK",
        data_body("not remotely base64 !!!"),
    )
    .await;
    let shared = context(&address).into_shared();

    let result = TelemetryPipeline::new().poll_once(&shared).await;
    assert!(matches!(result, Err(BridgeError::DecryptFailed(_))));

    let guard = shared.lock().unwrap();
    assert_eq!(guard.sensors.find_by_name("co2").unwrap().reading.last_fetch, 0);
}

#[test]
fn test_zone_id_round_trip_over_the_bus() {
    let shared = context("192.0.2.10").into_shared();
    let dispatch = dispatch_for(shared);

    let response = dispatch
        .set_property(
            "4711-VDC",
            &SetPropertyRequest {
                items: vec![SetItem {
                    name: "zoneID".to_string(),
                    value: PropertyValue::UInt(42),
                }],
            },
        )
        .unwrap();
    assert_eq!(response.statuses, vec![PropertyStatus::Ok]);
    assert!(response.persist);

    let reply = dispatch
        .get_property("4711-vdc", &GetPropertyRequest::names(["zoneID"]))
        .unwrap();
    assert_eq!(reply.get("zoneID"), Some(&PropertyValue::UInt(42)));
}

#[test]
fn test_indexed_state_query_returns_one_sensor() {
    let shared = context("192.0.2.10").into_shared();
    {
        let mut guard = shared.lock().unwrap();
        let entry = guard.sensors.find_by_name_mut("temperature").unwrap();
        entry.reading.current = 19.5;
        entry.reading.last_fetch = unix_now();
    }
    let dispatch = dispatch_for(shared);

    let reply = dispatch
        .get_property(
            "4711",
            &GetPropertyRequest {
                items: vec![GetItem::indexed("sensorStates", 1)],
            },
        )
        .unwrap();
    let states = reply.get_node("sensorStates").unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(
        states.get_node("1").unwrap().get("value"),
        Some(&PropertyValue::Double(19.5))
    );
}
