//! Integration tests for install config overrides and host rewrites

use serde_json::{json, Value};
use ztp_siteconfig::overrides::{
    build_network_annotation, install_config_annotation, merge_at_key, OverrideError,
};
use ztp_siteconfig::rewrite::{drop_stale_inspection_annotation, expand_node_label_annotation};
use ztp_siteconfig::{ClusterSpec, Document, Format};

fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_network_annotation_without_overrides() {
    assert_eq!(
        build_network_annotation("OVNKubernetes", "").unwrap(),
        r#"{"networking":{"networkType":"OVNKubernetes"}}"#
    );
}

#[test]
fn test_network_merged_into_existing_networking() {
    let out = build_network_annotation(
        "OVNKubernetes",
        r#"{"networking":{"clusterNetwork":"x"}, "other":"y"}"#,
    )
    .unwrap();

    assert_eq!(
        parse(&out),
        json!({
            "networking": {"clusterNetwork": "x", "networkType": "OVNKubernetes"},
            "other": "y"
        })
    );
}

#[test]
fn test_invalid_overrides_produce_no_output() {
    let result = build_network_annotation("OVNKubernetes", "{\"networking\": ");
    assert!(matches!(result, Err(OverrideError::InvalidJson { .. })));
}

#[test]
fn test_merge_at_key_keeps_target_siblings() {
    let out = merge_at_key(
        r#"{"networking":{"networkType":"OVNKubernetes"}}"#,
        r#"{"fips":true,"networking":{"serviceNetwork":["172.30.0.0/16"]}}"#,
        "networking",
    )
    .unwrap();

    assert_eq!(
        out,
        r#"{"fips":true,"networking":{"serviceNetwork":["172.30.0.0/16"],"networkType":"OVNKubernetes"}}"#
    );
}

#[test]
fn test_cluster_install_config_annotation() {
    let spec = ClusterSpec::from_yaml(
        r#"
clusterName: sno
networkType: OVNKubernetes
cpuPartitioningMode: AllNodes
installConfigOverrides: '{"networking":{"networkType":"OpenShiftSDN"},"capabilities":{"baselineCapabilitySet":"None"}}'
"#,
    )
    .unwrap();

    let out = install_config_annotation(&spec).unwrap();

    assert_eq!(
        parse(&out),
        json!({
            "networking": {"networkType": "OVNKubernetes"},
            "capabilities": {"baselineCapabilitySet": "None"},
            "cpuPartitioningMode": "AllNodes"
        })
    );
}

#[test]
fn test_bare_metal_host_rewrites() {
    let text = r#"
apiVersion: metal3.io/v1alpha1
kind: BareMetalHost
metadata:
  name: node1
  annotations:
    inspect.metal3.io: enabled
    bmac.agent-install.openshift.io.node-label:
      node-role.kubernetes.io/environment: production
"#;
    let mut document = Document::decode(text, Format::Yaml).unwrap();

    drop_stale_inspection_annotation(&mut document);
    expand_node_label_annotation(&mut document);

    assert_eq!(
        Value::Object(document.annotations().unwrap().clone()),
        json!({
            "bmac.agent-install.openshift.io.node-label.node-role.kubernetes.io/environment": "production"
        })
    );
}

#[test]
fn test_disabled_inspection_survives() {
    let text = "kind: BareMetalHost\nmetadata:\n  annotations:\n    inspect.metal3.io: disabled\n";
    let mut document = Document::decode(text, Format::Yaml).unwrap();

    drop_stale_inspection_annotation(&mut document);

    assert_eq!(document.annotations().unwrap()["inspect.metal3.io"], "disabled");
}
