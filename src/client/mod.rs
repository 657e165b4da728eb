//! Client layer: assembles per-call requests and hands them to the HTTP transport.

mod auth;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{Emptiness, Endpoint, Method, Params, RequestError};
use crate::transport::{Payload, RequestBody, build_path, build_payload};

pub use auth::{Auth, AuthConfig, AuthType, Environment};

const ACCEPT: &str = "application/json";
const CACHE_CONTROL: &str = "no-cache";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One outgoing request, built fresh for every call and never shared.
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// First header value with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful HTTP response, returned as received.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, InfobipError> {
        serde_json::from_str(&self.body).map_err(|err| InfobipError::Parse(Box::new(err)))
    }
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method.into(), request.url.clone());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder = match &request.body {
                Some(RequestBody::Json(json)) => builder.body(json.clone()),
                Some(RequestBody::Form(fields)) => builder.form(fields),
                None => builder,
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_owned(), value.to_owned()))
                })
                .collect();
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`InfobipClient`].
pub enum InfobipError {
    /// Inputs were rejected before any request was sent.
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    /// The base URL (or the URL built from it) is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
/// Builder for [`InfobipClient`].
pub struct InfobipClientBuilder {
    auth: Auth,
    environment: Environment,
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl InfobipClientBuilder {
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            environment: Environment::default(),
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Select the sandbox or live deployment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the base URL (takes precedence over [`Self::environment`]).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<InfobipClient, InfobipError> {
        let base_url = match self.base_url {
            Some(base_url) => {
                Url::parse(&base_url)?;
                base_url.trim_end_matches('/').to_owned()
            }
            None => self.environment.base_url().to_owned(),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| InfobipError::Transport(Box::new(err)))?;

        Ok(InfobipClient {
            authorization: self.auth.header_value(),
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Infobip SMS and Numbers client.
///
/// Every call validates its inputs against the endpoint table, builds a fresh
/// [`HttpRequest`] and sends it. The client itself holds no per-call state and can
/// be shared freely between tasks.
pub struct InfobipClient {
    authorization: String,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl InfobipClient {
    /// Create a client for the sandbox (`is_production = false`) or live deployment.
    ///
    /// `auth_config` selects Basic auth; otherwise `api_key` is used.
    pub fn new(api_key: impl Into<String>, is_production: bool, auth_config: &AuthConfig) -> Self {
        Self {
            authorization: Auth::from_config(api_key, auth_config).header_value(),
            base_url: Environment::from_production_flag(is_production)
                .base_url()
                .to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> InfobipClientBuilder {
        InfobipClientBuilder::new(auth)
    }

    /// List available numbers (`limit` required; `page`, `number`, `capabilities`,
    /// `country` optional).
    pub async fn numbers(&self, params: &Params) -> Result<HttpResponse, InfobipError> {
        self.call(Endpoint::ListNumbers, params).await
    }

    /// Fetch one number by `numberKey`.
    pub async fn get_number(&self, params: &Params) -> Result<HttpResponse, InfobipError> {
        self.call(Endpoint::GetNumber, params).await
    }

    /// Purchase the number identified by `numberKey`.
    pub async fn purchase_number(&self, params: &Params) -> Result<HttpResponse, InfobipError> {
        self.call(Endpoint::PurchaseNumber, params).await
    }

    /// Send `text` to `to`, either one destination or a list of them.
    pub async fn send(&self, params: &Params) -> Result<HttpResponse, InfobipError> {
        self.call(Endpoint::SendMessage, params).await
    }

    /// Validate, build and send a request for `endpoint`.
    pub async fn call(
        &self,
        endpoint: Endpoint,
        params: &Params,
    ) -> Result<HttpResponse, InfobipError> {
        let request = self.prepare(endpoint, params)?;
        self.execute(&request).await
    }

    /// Build the request for `endpoint` without sending it.
    ///
    /// Errors:
    /// - [`RequestError::MissingParameters`] when no defined property was passed,
    /// - [`RequestError::RequiredParameterMissing`] /
    ///   [`RequestError::ParameterTypeMismatch`] for individual fields.
    pub fn prepare(&self, endpoint: Endpoint, params: &Params) -> Result<HttpRequest, InfobipError> {
        let config = endpoint.config();

        if config.requires_params() && params.is_empty_by(Emptiness::Defined) {
            tracing::debug!(
                ?endpoint,
                declared = params.len(),
                "rejected call without parameters"
            );
            return Err(RequestError::MissingParameters.into());
        }

        let payload = build_payload(&config, params).inspect_err(|err| {
            tracing::debug!(?endpoint, error = %err, "rejected call parameters");
        })?;
        let path = build_path(&config, params);

        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        let mut headers = vec![
            ("Authorization".to_owned(), self.authorization.clone()),
            ("Accept".to_owned(), ACCEPT.to_owned()),
            ("Cache-Control".to_owned(), CACHE_CONTROL.to_owned()),
        ];

        let body = match payload {
            Payload::Query(query) => {
                if !query.is_empty() {
                    url.set_query(Some(&query));
                }
                None
            }
            Payload::Body(body) => {
                let content_type = match body {
                    RequestBody::Json(_) => ACCEPT,
                    RequestBody::Form(_) => FORM_CONTENT_TYPE,
                };
                headers.push(("Content-Type".to_owned(), content_type.to_owned()));
                Some(body)
            }
        };

        Ok(HttpRequest {
            method: config.method,
            url,
            headers,
            body,
        })
    }

    /// Send a prepared request.
    ///
    /// Non-2xx statuses are returned as [`InfobipError::HttpStatus`]; any other
    /// response is handed back unchanged.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, InfobipError> {
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            has_body = request.body.is_some(),
            "sending Infobip request"
        );

        let response = self
            .http
            .send(request)
            .await
            .map_err(InfobipError::Transport)?;

        if !(200..=299).contains(&response.status) {
            tracing::warn!(
                status = response.status,
                url = %request.url,
                "Infobip request failed"
            );
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(InfobipError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response)
    }
}
