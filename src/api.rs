// API client module: a small blocking HTTP client for the word-frequency
// API. Construction validates the base URL and performs the login round
// trip when a password is supplied; afterwards the client is stateless.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, RequestError};
use crate::response::{Occurrences, Page, Words};

/// How long a single round trip may take before the client gives up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable construction input for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    /// Password for the login endpoint. `None` (or an empty string)
    /// yields an unauthenticated client.
    pub password: Option<String>,
}

/// Client for the word-frequency API. Holds a reqwest blocking client
/// and the parsed base URL; when a login happened, the bearer token is
/// baked into the client's default headers so every request carries it.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Login request payload.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

/// Expected response from the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: String,
}

impl ApiClient {
    /// Parse and validate the base URL, log in when a password was
    /// given, and wire the resulting token into the HTTP client.
    pub fn new(options: Options) -> Result<Self, ApiError> {
        let base_url = Url::parse(&options.base_url).map_err(|e| ApiError::InvalidUrl {
            url: options.base_url.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: options.base_url,
                message: "base url must be absolute with a host".into(),
            });
        }

        let client = match options.password.as_deref() {
            Some(password) if !password.is_empty() => {
                let login_client = http_client(None)?;
                let token = login(&login_client, &base_url, password)?;
                http_client(Some(&token))?
            }
            _ => http_client(None)?,
        };

        Ok(ApiClient { client, base_url })
    }

    /// GET `/words`: the full word list.
    pub fn get_words(&self) -> Result<Words, ApiError> {
        match self.do_request("words", &[])? {
            Page::Words(words) => Ok(words),
            _ => Err(ApiError::UnexpectedShape {
                expected: Page::WORDS,
            }),
        }
    }

    /// GET `/occurrence`: per-word occurrence counts.
    pub fn get_occurrences(&self) -> Result<Occurrences, ApiError> {
        match self.do_request("occurrence", &[])? {
            Page::Occurrences(occurrences) => Ok(occurrences),
            _ => Err(ApiError::UnexpectedShape {
                expected: Page::OCCURRENCE,
            }),
        }
    }

    /// Add a word and return the updated list. The backend models this
    /// as a GET with an `input` query parameter, so that is what goes on
    /// the wire.
    pub fn add_word(&self, word: &str) -> Result<Words, ApiError> {
        match self.do_request("words", &[("input", word)])? {
            Page::Words(words) => Ok(words),
            _ => Err(ApiError::UnexpectedShape {
                expected: Page::WORDS,
            }),
        }
    }

    /// GET `base + path` and decode whichever page the server answered
    /// with. All read paths funnel through here.
    fn do_request(&self, path: &str, query: &[(&str, &str)]) -> Result<Page, ApiError> {
        let url = request_url(&self.base_url, path, query)?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            RequestError::new(
                url.as_str(),
                status.as_u16(),
                "",
                format!("error reading body: {e}"),
            )
        })?;

        let page = parse_page(url.as_str(), status, &body)?;

        if let Page::Occurrences(occurrences) = &page {
            if let Some(greeting) = occurrences.easter_egg() {
                println!("\n{greeting}\n");
            }
        }

        Ok(page)
    }
}

/// Validate a response and hand the body to the two-phase decoder.
fn parse_page(url: &str, status: StatusCode, body: &str) -> Result<Page, RequestError> {
    if status != StatusCode::OK {
        return Err(RequestError::new(
            url,
            status.as_u16(),
            body,
            format!("status code is {} not 200", status.as_u16()),
        ));
    }
    if body.trim().is_empty() {
        return Err(RequestError::new(
            url,
            status.as_u16(),
            body,
            "empty response body",
        ));
    }
    Page::decode(url, status.as_u16(), body)
}

/// POST the password to `<base>/login` and return the issued token.
fn login(client: &Client, base_url: &Url, password: &str) -> Result<String, ApiError> {
    let url = request_url(base_url, "login", &[])?;
    debug!("POST {url}");

    let response = client
        .post(url.clone())
        .json(&LoginRequest { password })
        .send()
        .map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let body = response.text().map_err(|e| {
        RequestError::new(
            url.as_str(),
            status.as_u16(),
            "",
            format!("error reading body: {e}"),
        )
    })?;

    let token = parse_login(url.as_str(), status, &body)?;
    debug!("login succeeded, token received");
    Ok(token)
}

/// Validate the login response and extract a non-empty token.
fn parse_login(url: &str, status: StatusCode, body: &str) -> Result<String, RequestError> {
    if status != StatusCode::OK {
        return Err(RequestError::new(
            url,
            status.as_u16(),
            body,
            format!("login rejected with status {}", status.as_u16()),
        ));
    }

    let login: LoginResponse = serde_json::from_str(body).map_err(|e| {
        RequestError::new(url, status.as_u16(), body, format!("invalid JSON: {e}"))
    })?;

    if login.token.is_empty() {
        return Err(RequestError::new(
            url,
            status.as_u16(),
            body,
            "login response carried no token",
        ));
    }

    Ok(login.token)
}

/// Build a blocking client with an explicit timeout. With a token, the
/// bearer header goes into the default headers so every outgoing request
/// carries it; without one the client stays bare.
fn http_client(token: Option<&str>) -> Result<Client, ApiError> {
    let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            ApiError::ClientSetup {
                message: format!("token is not a valid header value: {e}"),
            }
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    builder.build().map_err(|e| ApiError::ClientSetup {
        message: e.to_string(),
    })
}

/// Append a path segment (and any query pairs) to the base URL, keeping
/// whatever path the base already carries.
fn request_url(base: &Url, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
            url: base.to_string(),
            message: "base url cannot carry path segments".into(),
        })?;
        segments.pop_if_empty().push(path);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn request_url_joins_against_host_only_base() {
        let url = request_url(&base("http://localhost"), "words", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/words");
    }

    #[test]
    fn request_url_keeps_the_base_path() {
        let url = request_url(&base("http://localhost/api/"), "occurrence", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/occurrence");

        let url = request_url(&base("http://localhost/api"), "occurrence", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/occurrence");
    }

    #[test]
    fn request_url_encodes_query_values() {
        let url = request_url(&base("http://localhost"), "words", &[("input", "hello world")])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost/words?input=hello+world");
    }

    #[test]
    fn parse_page_rejects_any_non_200_status() {
        let err = parse_page(
            "http://localhost/words",
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>oops</html>",
        )
        .unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.body, "<html>oops</html>");

        let err = parse_page("http://localhost/words", StatusCode::NOT_FOUND, "").unwrap_err();
        assert_eq!(err.status, 404);
    }

    #[test]
    fn parse_page_rejects_an_empty_body() {
        let err = parse_page("http://localhost/words", StatusCode::OK, "  ").unwrap_err();
        assert!(err.message.contains("empty response body"));
    }

    #[test]
    fn parse_page_decodes_a_words_body() {
        let page = parse_page(
            "http://localhost/words",
            StatusCode::OK,
            r#"{"page":"words","input":"","words":["abc"]}"#,
        )
        .unwrap();
        assert_eq!(page.kind(), Page::WORDS);
    }

    #[test]
    fn parse_login_returns_the_token() {
        let token = parse_login(
            "http://localhost/login",
            StatusCode::OK,
            r#"{"token":"abc123"}"#,
        )
        .unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn parse_login_rejects_non_200() {
        let err = parse_login(
            "http://localhost/login",
            StatusCode::UNAUTHORIZED,
            r#"{"error":"bad password"}"#,
        )
        .unwrap_err();
        assert_eq!(err.status, 401);
        assert!(err.message.contains("login rejected"));
    }

    #[test]
    fn parse_login_rejects_a_missing_token() {
        let err =
            parse_login("http://localhost/login", StatusCode::OK, r#"{}"#).unwrap_err();
        assert!(err.message.contains("no token"));
    }

    #[test]
    fn parse_login_rejects_an_empty_token() {
        let err = parse_login(
            "http://localhost/login",
            StatusCode::OK,
            r#"{"token":""}"#,
        )
        .unwrap_err();
        assert!(err.message.contains("no token"));
    }

    #[test]
    fn parse_login_rejects_invalid_json() {
        let err =
            parse_login("http://localhost/login", StatusCode::OK, "not json").unwrap_err();
        assert!(err.message.contains("invalid JSON"));
    }

    #[test]
    fn new_rejects_a_malformed_base_url() {
        let err = ApiClient::new(Options {
            base_url: "not a url".into(),
            password: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }
}
