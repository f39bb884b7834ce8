use serde_json::{json, Value};

pub const BUCKET: &str = "kbom-reports";

/// Current report layout: nested scan-report vulnerabilities
pub fn versioned_report() -> Value {
    json!({
        "kbom": {
            "$schema": "https://kbom.example/schema/v1.json",
            "metadata": {
                "timestamp": "2025-02-07T10:15:00Z",
                "tools": [{"name": "kbom-gen", "version": "0.3.0"}]
            },
            "components": [
                {"name": "etcd", "version": "3.5.9", "dependencies": [
                    {"name": "grpc", "version": "1.58.3"},
                    {"name": "golang.org/x/net", "version": "0.17.0"}
                ]},
                {"name": "coredns", "version": "1.11.1", "dependencies": []}
            ],
            "dependencies": [{"ref": "etcd", "dependsOn": ["grpc", "golang.org/x/net"]}]
        },
        "vulnerabilities": {
            "Results": [
                {"Target": "etcd", "Vulnerabilities": [
                    {"VulnerabilityID": "CVE-2023-44487", "Severity": "HIGH", "component": "etcd"},
                    {"VulnerabilityID": "CVE-2023-47108", "Severity": "MEDIUM", "component": "etcd"}
                ]},
                {"Target": "kube-apiserver", "Vulnerabilities": [
                    {"VulnerabilityID": "CVE-2024-24786", "Severity": "high", "component": "kube-apiserver"}
                ]}
            ]
        }
    })
}

/// Earliest report layout: flat vulnerability list with `cve`/`severity`
pub fn legacy_report() -> Value {
    json!({
        "kbom": {
            "components": [
                {"name": "etcd", "dependencies": [{"name": "grpc"}]}
            ]
        },
        "vulnerabilities": [
            {"cve": "CVE-2022-3172", "severity": "Medium", "component": "kube-apiserver"},
            {"cve": "CVE-2023-44487", "severity": "High", "component": "etcd"}
        ]
    })
}

/// The minimal end-to-end example document
pub fn minimal_report() -> Value {
    json!({"kbom": {"components": [{"name": "etcd", "dependencies": [{"name": "grpc"}]}]}})
}
