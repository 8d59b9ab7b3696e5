//! The tagged-union state document format.
//!
//! Each entry serializes as `{"Type": "<kind-tag>", "Value": {...}}`. The
//! tag strings are the on-disk contract: readers dispatch on the exact
//! string, and unknown tags are skipped for forward compatibility.

use drydock_config::{
    Cluster, Container, Docs, Helm, Ingress, K8sConfig, LocalExec, Network, RemoteExec,
};
use serde::{Deserialize, Serialize};

/// One persisted resource snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", content = "Value")]
pub enum StateEntry {
    #[serde(rename = "config.Network")]
    Network(Network),
    #[serde(rename = "config.Container")]
    Container(Container),
    #[serde(rename = "config.Ingress")]
    Ingress(Ingress),
    #[serde(rename = "config.Docs")]
    Docs(Docs),
    #[serde(rename = "config.Cluster")]
    Cluster(Cluster),
    #[serde(rename = "config.Helm")]
    Helm(Helm),
    #[serde(rename = "config.K8sConfig")]
    K8sConfig(K8sConfig),
    #[serde(rename = "config.LocalExec")]
    LocalExec(LocalExec),
    #[serde(rename = "config.RemoteExec")]
    RemoteExec(RemoteExec),
}

impl StateEntry {
    /// Every tag this version knows how to decode.
    pub const KNOWN_TAGS: [&'static str; 9] = [
        "config.Network",
        "config.Container",
        "config.Ingress",
        "config.Docs",
        "config.Cluster",
        "config.Helm",
        "config.K8sConfig",
        "config.LocalExec",
        "config.RemoteExec",
    ];

    pub fn kind_tag(&self) -> &'static str {
        match self {
            StateEntry::Network(_) => "config.Network",
            StateEntry::Container(_) => "config.Container",
            StateEntry::Ingress(_) => "config.Ingress",
            StateEntry::Docs(_) => "config.Docs",
            StateEntry::Cluster(_) => "config.Cluster",
            StateEntry::Helm(_) => "config.Helm",
            StateEntry::K8sConfig(_) => "config.K8sConfig",
            StateEntry::LocalExec(_) => "config.LocalExec",
            StateEntry::RemoteExec(_) => "config.RemoteExec",
        }
    }

    pub fn resource_name(&self) -> &str {
        match self {
            StateEntry::Network(n) => &n.name,
            StateEntry::Container(c) => &c.name,
            StateEntry::Ingress(i) => &i.name,
            StateEntry::Docs(d) => &d.name,
            StateEntry::Cluster(c) => &c.name,
            StateEntry::Helm(h) => &h.name,
            StateEntry::K8sConfig(k) => &k.name,
            StateEntry::LocalExec(e) => &e.name,
            StateEntry::RemoteExec(e) => &e.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_network() -> Network {
        Network {
            name: "cloud".to_owned(),
            subnet: "10.5.0.0/16".to_owned(),
        }
    }

    #[test]
    fn entry_serializes_with_tag_and_value() {
        let entry = StateEntry::Network(sample_network());
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["Type"], "config.Network");
        assert_eq!(json["Value"]["name"], "cloud");
        assert_eq!(json["Value"]["subnet"], "10.5.0.0/16");
    }

    #[test]
    fn entry_roundtrips() {
        let entry = StateEntry::Container(Container {
            name: "web".to_owned(),
            image: "nginx:1.27-alpine".to_owned(),
            command: Vec::new(),
            networks: vec!["cloud".to_owned()],
            env: Default::default(),
            volumes: Vec::new(),
            ports: Vec::new(),
            privileged: false,
        });
        let json = serde_json::to_string(&entry).unwrap();
        let back: StateEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn kind_tags_are_known() {
        let entry = StateEntry::Network(sample_network());
        assert!(StateEntry::KNOWN_TAGS.contains(&entry.kind_tag()));
    }

    #[test]
    fn unknown_tag_fails_direct_decode() {
        let result: Result<StateEntry, _> =
            serde_json::from_str(r#"{"Type":"config.Unknown","Value":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn resource_name_matches_record() {
        let entry = StateEntry::Network(sample_network());
        assert_eq!(entry.resource_name(), "cloud");
    }
}
