// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::TokenProvider;
use crate::client::LookerApi;
use crate::errors::{DeserializationError, EntityKind, Error, Result};
use crate::models::{PermissionSet, Theme, WritePermissionSet, WriteTheme};
use crate::ProviderConfig;

const USER_AGENT: &str = "looker-provider-rs/0.1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAddress {
    host: String,
    port: Option<u16>,
    endpoint: Option<String>,
    use_ssl: bool,
}

impl ServiceAddress {
    pub fn new(host: String, port: Option<u16>, endpoint: Option<String>) -> Self {
        Self {
            host,
            port,
            endpoint,
            use_ssl: true,
        }
    }

    pub fn new_without_ssl(host: String, port: Option<u16>, endpoint: Option<String>) -> Self {
        Self {
            use_ssl: false,
            ..Self::new(host, port, endpoint)
        }
    }

    /// Splits a full URL like `https://example.looker.com:19999/api/4.0`.
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::ConfigurationError(format!("URL '{url}' has no host")))?
            .to_string();
        let endpoint = Some(url.path().trim_matches('/'))
            .filter(|path| !path.is_empty())
            .map(str::to_string);
        let address = Self::new(host, url.port(), endpoint);
        match url.scheme() {
            "https" => Ok(address),
            "http" => Ok(Self {
                use_ssl: false,
                ..address
            }),
            scheme => Err(Error::ConfigurationError(format!(
                "Unsupported URL scheme '{scheme}'"
            ))),
        }
    }

    pub fn base_url(&self) -> String {
        let protocol = if self.use_ssl { "https" } else { "http" };
        let port = if let Some(port) = self.port {
            format!(":{port}")
        } else {
            "".to_string()
        };

        let endpoint = if let Some(endpoint) = &self.endpoint {
            format!("/{endpoint}")
        } else {
            "".to_string()
        };

        format!("{protocol}://{}{port}{endpoint}", self.host)
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// [`LookerApi`] implementation talking to a Looker instance over HTTP.
#[derive(Debug)]
pub struct LookerClientHttp {
    service_address: ServiceAddress,
    token_provider: Box<dyn TokenProvider>,
    client: Client,
}

impl LookerClientHttp {
    pub fn new(
        service_address: ServiceAddress,
        token_provider: Box<dyn TokenProvider>,
    ) -> Result<Self> {
        Self::with_client(service_address, token_provider, Client::new())
    }

    /// Builds a client honoring timeout and certificate settings of `config`.
    pub fn from_config(
        config: &ProviderConfig,
        token_provider: Box<dyn TokenProvider>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;
        Self::with_client(
            ServiceAddress::parse(&config.api_url())?,
            token_provider,
            client,
        )
    }

    fn with_client(
        service_address: ServiceAddress,
        token_provider: Box<dyn TokenProvider>,
        client: Client,
    ) -> Result<Self> {
        // Fail early on addresses that won't make valid request URLs.
        Url::parse(&service_address.base_url())?;
        Ok(Self {
            service_address,
            token_provider,
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = format!("{}/{path}", self.service_address.base_url());
        debug!("{method} {url}");
        let token = self.token_provider.get_access_token()?;
        Ok(self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .header(AUTHORIZATION, format!("token {token}")))
    }

    /// Sends the request and maps non-success statuses onto [`Error`].
    ///
    /// A 404 becomes [`Error::NotFound`] only when `entity` names the
    /// entity the request addresses. Any other 404 is kept as an API error.
    fn send(request: RequestBuilder, entity: Option<(EntityKind, &str)>) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if let (StatusCode::NOT_FOUND, Some((kind, id))) = (status, entity) {
            return Err(Error::NotFound {
                kind,
                id: id.to_string(),
            });
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        entity: Option<(EntityKind, &str)>,
    ) -> Result<T> {
        let body = Self::send(request, entity)?.text()?;
        serde_json::from_str(&body).map_err(|e| {
            Error::DeserializationError(DeserializationError {
                string: body,
                source: e.into(),
            })
        })
    }
}

impl LookerApi for LookerClientHttp {
    fn create_permission_set(&self, body: &WritePermissionSet) -> Result<PermissionSet> {
        let request = self.request(Method::POST, "permission_sets")?.json(body);
        Self::send_json(request, None)
    }

    fn permission_set(&self, id: i64) -> Result<PermissionSet> {
        let request = self.request(Method::GET, &format!("permission_sets/{id}"))?;
        Self::send_json(request, Some((EntityKind::PermissionSet, &id.to_string())))
    }

    fn update_permission_set(&self, id: i64, body: &WritePermissionSet) -> Result<PermissionSet> {
        let request = self
            .request(Method::PATCH, &format!("permission_sets/{id}"))?
            .json(body);
        Self::send_json(request, Some((EntityKind::PermissionSet, &id.to_string())))
    }

    fn delete_permission_set(&self, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("permission_sets/{id}"))?;
        Self::send(request, Some((EntityKind::PermissionSet, &id.to_string()))).map(|_| ())
    }

    fn create_theme(&self, body: &WriteTheme) -> Result<Theme> {
        let request = self.request(Method::POST, "themes")?.json(body);
        Self::send_json(request, None)
    }

    fn theme(&self, id: i64) -> Result<Theme> {
        let request = self.request(Method::GET, &format!("themes/{id}"))?;
        Self::send_json(request, Some((EntityKind::Theme, &id.to_string())))
    }

    fn update_theme(&self, id: i64, body: &WriteTheme) -> Result<Theme> {
        let request = self
            .request(Method::PATCH, &format!("themes/{id}"))?
            .json(body);
        Self::send_json(request, Some((EntityKind::Theme, &id.to_string())))
    }

    fn delete_theme(&self, id: i64) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("themes/{id}"))?;
        Self::send(request, Some((EntityKind::Theme, &id.to_string()))).map(|_| ())
    }

    fn default_theme(&self, ts: DateTime<Utc>) -> Result<Theme> {
        let ts = ts.to_rfc3339_opts(SecondsFormat::Secs, true);
        let request = self
            .request(Method::GET, "themes/default")?
            .query(&[("ts", ts)]);
        Self::send_json(request, None)
    }

    fn set_default_theme(&self, name: &str) -> Result<Theme> {
        let request = self
            .request(Method::PUT, "themes/default")?
            .query(&[("name", name)]);
        Self::send_json(request, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::StaticTokenProvider;
    use chrono::TimeZone;
    use httpmock::Method::{DELETE, GET, PATCH, POST, PUT};
    use httpmock::MockServer;
    use rstest::rstest;
    use serde_json::json;

    fn client(server: &MockServer) -> LookerClientHttp {
        LookerClientHttp::new(
            ServiceAddress::new_without_ssl(
                server.host(),
                Some(server.port()),
                Some("api/4.0".to_string()),
            ),
            Box::new(StaticTokenProvider::new("mocked_token")),
        )
        .unwrap()
    }

    #[rstest]
    #[case("https://example.looker.com:19999/api/4.0", "https://example.looker.com:19999/api/4.0")]
    #[case("http://localhost/", "http://localhost")]
    fn test_service_address_parse(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(ServiceAddress::parse(url).unwrap().base_url(), expected);
    }

    #[test]
    fn test_service_address_bad_scheme() {
        assert!(matches!(
            ServiceAddress::parse("ftp://example.looker.com"),
            Err(Error::ConfigurationError(_))
        ));
    }

    /// Tests the good-case and asserts that the HTTP request sent to the server is well-formed:
    /// - Correct endpoint
    /// - Correct authorization
    /// - Correct json serialization
    #[test]
    fn test_create_permission_set() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/4.0/permission_sets")
                .header("content-type", "application/json")
                .header("Authorization", "token mocked_token")
                .json_body(json!({
                    "name": "viewer_perms",
                    "permissions": ["see_dashboards", "see_looks"]
                }));
            then.status(200).json_body(json!({
                "id": "42",
                "name": "viewer_perms",
                "permissions": ["see_dashboards", "see_looks"],
                "built_in": false,
                "all_access": false
            }));
        });

        let permission_set = client(&server)
            .create_permission_set(&WritePermissionSet {
                name: "viewer_perms".to_string(),
                permissions: vec!["see_dashboards".to_string(), "see_looks".to_string()],
            })
            .unwrap();

        mock.assert();
        assert_eq!(permission_set.id, 42);
        assert_eq!(permission_set.name.as_deref(), Some("viewer_perms"));
    }

    #[test]
    fn test_not_found() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/4.0/permission_sets/42");
            then.status(404)
                .json_body(json!({"message": "Not found", "documentation_url": "x"}));
        });

        let result = client(&server).permission_set(42);

        mock.assert();
        assert!(matches!(
            result,
            Err(Error::NotFound { kind: EntityKind::PermissionSet, ref id }) if id == "42"
        ));
    }

    #[test]
    fn test_default_lookup_not_found_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/4.0/themes/default");
            then.status(404).json_body(json!({"message": "Not found"}));
        });

        let err = client(&server).default_theme(Utc::now()).unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(err, Error::Api { status: 404, ref message } if message == "Not found"));
    }

    #[test]
    fn test_default_assignment_not_found_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/api/4.0/themes/default");
            then.status(404).json_body(json!({"message": "Not found"}));
        });

        let err = client(&server).set_default_theme("dark").unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }

    #[test]
    fn test_create_not_found_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/4.0/permission_sets");
            then.status(404).body("no such endpoint");
        });

        let result = client(&server).create_permission_set(&WritePermissionSet {
            name: "viewer_perms".to_string(),
            permissions: vec!["see_looks".to_string()],
        });

        assert!(matches!(result, Err(Error::Api { status: 404, .. })));
    }

    #[test]
    fn test_api_error_message() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/4.0/themes");
            then.status(422)
                .json_body(json!({"message": "Validation Failed", "errors": []}));
        });

        let result = client(&server).create_theme(&WriteTheme {
            name: "dark theme".to_string(),
            settings: Default::default(),
        });

        mock.assert();
        assert!(matches!(
            result,
            Err(Error::Api { status: 422, ref message }) if message == "Validation Failed"
        ));
    }

    #[test]
    fn test_api_error_without_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/api/4.0/themes/3");
            then.status(500).body("boom");
        });

        let result = client(&server).delete_theme(3);

        assert!(matches!(
            result,
            Err(Error::Api { status: 500, ref message }) if message == "boom"
        ));
    }

    #[test]
    fn test_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/4.0/themes/3");
            then.status(200).body("{\"id\": [");
        });

        let result = client(&server).theme(3);

        assert!(matches!(result, Err(Error::DeserializationError(_))));
    }

    #[test]
    fn test_update_theme_sends_only_set_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/api/4.0/themes/3")
                .json_body(json!({
                    "name": "dark",
                    "settings": {"background_color": "#000", "show_title": false}
                }));
            then.status(200).json_body(json!({
                "id": 3,
                "name": "dark",
                "settings": {"background_color": "#000", "show_title": false}
            }));
        });

        let settings = crate::models::ThemeSettings {
            background_color: crate::Nullable::Value("#000".to_string()),
            show_title: crate::Nullable::Value(false),
            ..Default::default()
        };
        let theme = client(&server)
            .update_theme(
                3,
                &WriteTheme {
                    name: "dark".to_string(),
                    settings,
                },
            )
            .unwrap();

        mock.assert();
        assert_eq!(theme.id, 3);
    }

    #[test]
    fn test_delete_permission_set() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/api/4.0/permission_sets/42");
            then.status(204);
        });

        client(&server).delete_permission_set(42).unwrap();

        mock.assert();
    }

    #[test]
    fn test_default_theme_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/4.0/themes/default")
                .query_param("ts", "2025-01-02T03:04:05Z");
            then.status(200).json_body(json!({"id": "1", "name": "Looker"}));
        });

        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let theme = client(&server).default_theme(ts).unwrap();

        mock.assert();
        assert_eq!(theme.id, 1);
    }

    #[test]
    fn test_set_default_theme() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/4.0/themes/default")
                .query_param("name", "dark");
            then.status(200).json_body(json!({"id": 3, "name": "dark"}));
        });

        let theme = client(&server).set_default_theme("dark").unwrap();

        mock.assert();
        assert_eq!(theme.id, 3);
    }
}
