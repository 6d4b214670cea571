use std::time::Duration;

use anyhow::Result;
use url::Url;

use super::types::Reachability;

/// Checker trait so the tracker can be driven by scripted probes in tests.
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Probe a named endpoint.
    ///
    /// Never fails: connection errors, timeouts, and error statuses all
    /// degrade to [`Reachability::Unreachable`].
    async fn check(&self, name: &str) -> Reachability;
}

/// HTTP prober: one bounded-timeout GET per check, no retries. Repeated
/// probing comes from the scheduler, not from the checker.
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }
}

/// Endpoints are registered by bare host name; the probe goes to the
/// default-scheme base URL built from it.
fn probe_url(name: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("http://{name}"))
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, name: &str) -> Reachability {
        let Ok(url) = probe_url(name) else {
            return Reachability::Unreachable;
        };

        match self.client.get(url).send().await {
            // 2xx and 3xx both count as reachable
            Ok(response)
                if response.status().is_success() || response.status().is_redirection() =>
            {
                Reachability::Reachable
            }
            Ok(_) | Err(_) => Reachability::Unreachable,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_names_get_a_default_scheme() {
        let url = probe_url("example.com").unwrap();

        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn port_suffix_survives_url_construction() {
        let url = probe_url("example.com:8080").unwrap();

        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn unparsable_name_is_rejected_before_any_request() {
        assert!(probe_url("").is_err());
    }
}
