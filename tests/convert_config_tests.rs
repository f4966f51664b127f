//! End-to-end tests for the node-list → sing-box config conversion.
//!
//! These drive the full pipeline over a temporary node file: decode, port
//! allocation, inbound/rule derivation, serialization, and the CLI binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

use splitbox::generator::Generator;

const NODE_LIST: &str = concat!(
    "vless://uuid-1@vl.example.com:443?security=reality&pbk=PK&sid=SID&fp=chrome&sni=example.com#Reality%20Node\n",
    "ss://YWVzLTI1Ni1nY206cHc=@1.2.3.4:8388#node1\n",
    "trojan://secret@tr.example.com:443?sni=tr.example.com#Trojan\n",
    "hysteria2://pw@hy.example.com:8443?sni=hy.example.com&insecure=false#Hy2\n",
    "unrecognized garbage line\n",
);

fn generate(node_list: &str) -> (serde_json::Value, splitbox::generator::Summary) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("node.txt");
    let output = dir.path().join("config.json");
    fs::write(&input, node_list).unwrap();

    let generator = Generator::new(&input, &output, 40000);
    let summary = generator.run().unwrap();

    let written = fs::read_to_string(&output).unwrap();
    (serde_json::from_str(&written).unwrap(), summary)
}

// ============================================================================
// Document Shape
// ============================================================================

#[test]
fn inbounds_outbounds_and_rules_have_equal_length() {
    let (json, summary) = generate(NODE_LIST);

    let inbounds = json["inbounds"].as_array().unwrap();
    let outbounds = json["outbounds"].as_array().unwrap();
    let rules = json["route"]["rules"].as_array().unwrap();

    assert_eq!(outbounds.len(), 4);
    assert_eq!(inbounds.len(), outbounds.len());
    assert_eq!(rules.len(), outbounds.len());
    assert_eq!(summary.node_count, 4);
}

#[test]
fn document_has_static_log_block() {
    let (json, _) = generate(NODE_LIST);
    assert_eq!(json["log"]["level"], "info");
    assert_eq!(json["log"]["timestamp"], true);
}

#[test]
fn tags_pair_inbounds_with_outbounds() {
    let (json, _) = generate(NODE_LIST);

    let inbounds = json["inbounds"].as_array().unwrap();
    let outbounds = json["outbounds"].as_array().unwrap();
    let rules = json["route"]["rules"].as_array().unwrap();

    for ((inbound, outbound), rule) in inbounds.iter().zip(outbounds).zip(rules) {
        let out_tag = outbound["tag"].as_str().unwrap();
        let in_tag = inbound["tag"].as_str().unwrap();

        // The substitution round-trips both ways.
        assert_eq!(in_tag, out_tag.replace("out_bound", "in_bound"));
        assert_eq!(out_tag, in_tag.replace("in_bound", "out_bound"));
        assert_eq!(rule["inbound"], in_tag);
        assert_eq!(rule["outbound"], out_tag);
    }
}

#[test]
fn listen_ports_are_contiguous_and_ascending() {
    let (json, summary) = generate(NODE_LIST);

    let ports: Vec<u16> = json["inbounds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|inbound| u16::try_from(inbound["listen_port"].as_u64().unwrap()).unwrap())
        .collect();

    let expected: Vec<u16> = (summary.start_port..).take(ports.len()).collect();
    assert_eq!(ports, expected);
    assert!(summary.start_port >= 40000);
}

#[test]
fn inbounds_listen_on_loopback_with_sniffing() {
    let (json, _) = generate(NODE_LIST);
    for inbound in json["inbounds"].as_array().unwrap() {
        assert_eq!(inbound["type"], "http");
        assert_eq!(inbound["listen"], "127.0.0.1");
        assert_eq!(inbound["sniff"], true);
        assert_eq!(inbound["sniff_override_destination"], true);
    }
}

// ============================================================================
// Decoded Field Shapes
// ============================================================================

#[test]
fn vless_reality_block_shape() {
    let (json, _) = generate(NODE_LIST);
    let vless = &json["outbounds"][0];

    assert_eq!(vless["type"], "vless");
    assert_eq!(vless["tag"], "out_bound_1_Reality Node");
    assert_eq!(vless["server"], "vl.example.com");
    assert_eq!(vless["server_port"], 443);
    assert_eq!(vless["packet_encoding"], "xudp");
    assert_eq!(vless["tls"]["enabled"], true);
    assert_eq!(vless["tls"]["insecure"], false);
    assert_eq!(vless["tls"]["server_name"], "example.com");
    assert_eq!(vless["tls"]["utls"]["enabled"], true);
    assert_eq!(vless["tls"]["utls"]["fingerprint"], "chrome");
    assert_eq!(vless["tls"]["reality"]["enabled"], true);
    assert_eq!(vless["tls"]["reality"]["public_key"], "PK");
    assert_eq!(vless["tls"]["reality"]["short_id"], "SID");
    // The flow key is present at top level even though the URI has no
    // flow parameter; it serializes as null.
    assert!(vless.as_object().unwrap().contains_key("flow"));
    assert!(vless["flow"].is_null());
}

#[test]
fn shadowsocks_field_shape() {
    let (json, _) = generate(NODE_LIST);
    let ss = &json["outbounds"][1];

    assert_eq!(ss["type"], "shadowsocks");
    assert_eq!(ss["tag"], "out_bound_2_node1");
    assert_eq!(ss["server"], "1.2.3.4");
    assert_eq!(ss["server_port"], 8388);
    assert_eq!(ss["method"], "aes-256-gcm");
    assert_eq!(ss["password"], "pw");
}

#[test]
fn hysteria2_insecure_false_is_coerced_to_true() {
    // Current string-truthiness coercion: `insecure=false` enables it.
    let (json, _) = generate(NODE_LIST);
    let hy2 = &json["outbounds"][3];

    assert_eq!(hy2["type"], "hysteria2");
    assert_eq!(hy2["tls"]["insecure"], true);
}

// ============================================================================
// Failure Behavior
// ============================================================================

#[test]
fn malformed_query_aborts_before_writing_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("node.txt");
    let output = dir.path().join("config.json");
    fs::write(
        &input,
        "trojan://pw@example.com:443?broken-parameter#Broken\n",
    )
    .unwrap();

    let generator = Generator::new(&input, &output, 40000);
    let err = generator.run().unwrap_err();

    assert!(err.to_string().contains("line 1"));
    assert!(!output.exists(), "no output file may exist after a failure");
}

#[test]
fn empty_node_list_still_produces_a_complete_document() {
    let (json, summary) = generate("");

    assert_eq!(summary.node_count, 0);
    assert_eq!(json["inbounds"], serde_json::json!([]));
    assert_eq!(json["outbounds"], serde_json::json!([]));
    assert_eq!(json["route"]["rules"], serde_json::json!([]));
}

// ============================================================================
// Binary Behavior
// ============================================================================

#[test]
fn binary_writes_config_and_reports_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("node.txt");
    let output = dir.path().join("config.json");
    fs::write(&input, NODE_LIST).unwrap();

    Command::cargo_bin("splitbox")
        .unwrap()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 nodes"));

    assert!(output.exists());
}

#[test]
fn binary_fails_on_malformed_node() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("node.txt");
    fs::write(&input, "vmess://!!!not-base64!!!\n").unwrap();

    Command::cargo_bin("splitbox")
        .unwrap()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("config.json"))
        .assert()
        .failure();
}
