//! HTTP health probing via `ureq`.

use crate::clients::Http;
use crate::ClientError;
use std::time::Duration;

pub struct UreqHttp {
    agent: ureq::Agent,
}

impl UreqHttp {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Like [`new`](Self::new), but accepting any TLS certificate.
    /// Cluster API endpoints present self-signed certificates.
    pub fn insecure(timeout: Duration) -> Self {
        let tls = ureq::tls::TlsConfig::builder()
            .disable_verification(true)
            .build();
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .tls_config(tls)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Http for UreqHttp {
    fn health_check(&self, url: &str) -> Result<(), ClientError> {
        match self.agent.get(url).call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::StatusCode(code)) => Err(ClientError::HealthCheck {
                url: url.to_owned(),
                reason: format!("HTTP {code}"),
            }),
            Err(e) => Err(ClientError::HealthCheck {
                url: url.to_owned(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_endpoint_fails() {
        let http = UreqHttp::new(Duration::from_millis(200));
        let err = http.health_check("http://127.0.0.1:1/healthz").unwrap_err();
        assert!(matches!(err, ClientError::HealthCheck { .. }));
    }

    #[test]
    fn error_carries_url() {
        let http = UreqHttp::new(Duration::from_millis(200));
        let err = http.health_check("http://127.0.0.1:1/healthz").unwrap_err();
        assert!(err.to_string().contains("127.0.0.1"));
    }
}
