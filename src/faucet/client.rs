use super::api::{
    ApiError, Challenge, ClaimRequest, ClaimResponse, ErrorBody, FaucetApi, StatsResponse,
    StatusResponse,
};
use crate::config::FaucetConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

/// [`FaucetApi`] over HTTP.
pub struct HttpFaucetApi {
    client: Client,
    base: Url,
}

impl HttpFaucetApi {
    pub fn new(config: &FaucetConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Network {
                reason: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base: parse_base(&config.api_base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, wallet: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base.join(path).map_err(|e| ApiError::InvalidUrl {
            reason: e.to_string(),
        })?;
        if let Some(wallet) = wallet {
            url.query_pairs_mut().append_pair("wallet", wallet);
        }
        Ok(url)
    }
}

/// The base must end in `/` or `join` would drop its last segment.
fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
        reason: format!("{}: {}", raw, e),
    })
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::Connect {
            reason: e.to_string(),
        }
    } else {
        ApiError::Network {
            reason: e.to_string(),
        }
    }
}

/// Decodes a 2xx body; any other status becomes [`ApiError::Status`] carrying
/// the server's `detail` when it sent one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);
        warn!(status = status.as_u16(), detail = ?detail, "Faucet returned an error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        reason: e.to_string(),
    })
}

#[async_trait]
impl FaucetApi for HttpFaucetApi {
    #[instrument(skip(self))]
    async fn status(&self, wallet: Option<&str>) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint("status", wallet)?;
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn challenge(&self, wallet: &str) -> Result<Challenge, ApiError> {
        let url = self.endpoint("challenge", Some(wallet))?;
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    #[instrument(skip(self, request), fields(wallet = %request.wallet))]
    async fn claim(&self, request: &ClaimRequest) -> Result<ClaimResponse, ApiError> {
        let url = self.endpoint("claim", None)?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        // Denials arrive as `success: false` bodies, often with a 4xx status.
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        match serde_json::from_str::<ClaimResponse>(&body) {
            Ok(parsed) => {
                debug!(status = status.as_u16(), success = parsed.success, "Claim answered");
                Ok(parsed)
            }
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                detail: serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.detail),
            }),
            Err(e) => Err(ApiError::Decode {
                reason: e.to_string(),
            }),
        }
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> Result<StatsResponse, ApiError> {
        let url = self.endpoint("stats", None)?;
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpFaucetApi {
        HttpFaucetApi::new(&FaucetConfig {
            api_base: base.to_string(),
            ..FaucetConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_keep_the_api_prefix() {
        let api = api("http://localhost:8000/api");
        assert_eq!(api.base().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            api.endpoint("stats", None).unwrap().as_str(),
            "http://localhost:8000/api/stats"
        );
    }

    #[test]
    fn wallet_goes_into_the_query() {
        let api = api("https://faucet.example/api/");
        assert_eq!(
            api.endpoint("status", Some("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"))
                .unwrap()
                .as_str(),
            "https://faucet.example/api/status?wallet=7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"
        );
    }

    #[test]
    fn bad_base_is_rejected() {
        let result = HttpFaucetApi::new(&FaucetConfig {
            api_base: "not a url".to_string(),
            ..FaucetConfig::default()
        });
        assert!(matches!(result, Err(ApiError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn unreachable_faucet_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed on any sane test machine.
        let api = api("http://127.0.0.1:9/api");
        let err = api.stats().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Connect { .. } | ApiError::Network { .. } | ApiError::Timeout
        ));
    }
}
