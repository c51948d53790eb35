//! Transport adapter backed by `reqwest`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};

use crate::config::MAX_REDIRECT_HOPS;
use crate::error_handling::outcome_from_reqwest_error;
use crate::request::RequestDescriptor;

use super::{TransportAdapter, TransportOutcome, TransportResponse};

/// The client-level knobs that force a dedicated client.
type ClientKey = (Option<Duration>, bool);

/// The default transport: a shared `reqwest::Client` following redirects up
/// to [`MAX_REDIRECT_HOPS`], with automatic decompression off so response
/// headers stay truthful unless compressed transfer is requested.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    // Most recently built dedicated client, keyed by the knobs that
    // required it. Retry attempts of one logical request carry the same
    // descriptor, so they all hit this cache instead of rebuilding a
    // client (and its connection pool) per attempt.
    dedicated: Arc<Mutex<Option<(ClientKey, Client)>>>,
}

impl ReqwestTransport {
    /// Creates the transport with its default client.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if client creation fails (e.g. TLS
    /// backend initialization).
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Self::base_builder().gzip(false).build()?;
        Ok(Self {
            client,
            dedicated: Arc::new(Mutex::new(None)),
        })
    }

    fn base_builder() -> ClientBuilder {
        ClientBuilder::new().redirect(Policy::limited(MAX_REDIRECT_HOPS))
    }

    /// Returns the client for this request.
    ///
    /// `connect_timeout` and transparent gzip are `ClientBuilder` knobs in
    /// reqwest, not per-request ones, so a request that sets either gets a
    /// dedicated client; everything else shares the default. A dedicated
    /// client is built once and reused as long as consecutive requests ask
    /// for the same knobs.
    fn client_for(&self, request: &RequestDescriptor) -> Result<Client, reqwest::Error> {
        if request.connect_timeout.is_none() && !request.gzip {
            return Ok(self.client.clone());
        }

        let key: ClientKey = (request.connect_timeout, request.gzip);
        let mut cached = match self.dedicated.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((cached_key, client)) = cached.as_ref() {
            if *cached_key == key {
                return Ok(client.clone());
            }
        }

        let mut builder = Self::base_builder().gzip(request.gzip);
        if let Some(connect_timeout) = request.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder.build()?;
        *cached = Some((key, client.clone()));
        Ok(client)
    }
}

#[async_trait]
impl TransportAdapter for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> TransportOutcome {
        let client = match self.client_for(request) {
            Ok(client) => client,
            Err(e) => return outcome_from_reqwest_error(e),
        };

        let mut builder = client
            .request(request.method.clone(), request.uri.clone())
            .headers(request.headers.clone());
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        log::debug!("sending {} {}", request.method, request.uri);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return outcome_from_reqwest_error(e),
        };

        let status = response.status().as_u16();
        let effective_uri = response.url().to_string();
        let headers = response.headers().clone();

        // Reading the body can still hit the total-request timeout.
        match response.bytes().await {
            Ok(body) => TransportOutcome::Success(TransportResponse {
                status,
                headers,
                body: body.to_vec(),
                effective_uri,
            }),
            Err(e) => outcome_from_reqwest_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Encoding, RequestDescriptor};
    use reqwest::header::HeaderMap;
    use reqwest::Method;
    use url::Url;

    fn descriptor(connect_timeout: Option<Duration>, gzip: bool) -> RequestDescriptor {
        RequestDescriptor {
            method: Method::GET,
            uri: Url::parse("https://example.com/").unwrap(),
            headers: HeaderMap::new(),
            body: None,
            encoding: Encoding::Text,
            gzip,
            retries: 0,
            timeout: None,
            connect_timeout,
        }
    }

    #[test]
    fn default_requests_share_the_default_client() {
        let transport = ReqwestTransport::new().unwrap();
        transport.client_for(&descriptor(None, false)).unwrap();
        assert!(transport.dedicated.lock().unwrap().is_none());
    }

    #[test]
    fn dedicated_clients_are_cached_across_attempts() {
        let transport = ReqwestTransport::new().unwrap();
        let request = descriptor(Some(Duration::from_millis(50)), true);
        let key = (request.connect_timeout, request.gzip);

        transport.client_for(&request).unwrap();
        assert_eq!(
            transport
                .dedicated
                .lock()
                .unwrap()
                .as_ref()
                .map(|(cached_key, _)| *cached_key),
            Some(key)
        );

        // A repeat attempt with the same knobs reuses the cached entry.
        transport.client_for(&request).unwrap();
        assert_eq!(
            transport
                .dedicated
                .lock()
                .unwrap()
                .as_ref()
                .map(|(cached_key, _)| *cached_key),
            Some(key)
        );
    }

    #[test]
    fn changed_knobs_replace_the_cached_client() {
        let transport = ReqwestTransport::new().unwrap();
        transport
            .client_for(&descriptor(Some(Duration::from_millis(50)), false))
            .unwrap();
        transport
            .client_for(&descriptor(Some(Duration::from_secs(1)), true))
            .unwrap();

        assert_eq!(
            transport
                .dedicated
                .lock()
                .unwrap()
                .as_ref()
                .map(|(cached_key, _)| *cached_key),
            Some((Some(Duration::from_secs(1)), true))
        );
    }
}
