/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use http::uri::{Authority, InvalidUri, Uri};

use crate::operation::BuildError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Endpoint Resolution Error
///
/// The message is surfaced verbatim to the caller.
#[derive(Debug)]
pub struct ResolveEndpointError {
    message: Cow<'static, str>,
    source: Option<BoxError>,
}

impl ResolveEndpointError {
    /// Create a [`ResolveEndpointError`] with a message
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(self, source: impl Into<BoxError>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }
}

impl Display for ResolveEndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ResolveEndpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

/// API Endpoint
///
/// This implements an API endpoint as specified in the
/// [Smithy Endpoint Specification](https://awslabs.github.io/smithy/1.0/spec/core/endpoint-traits.html)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    uri: http::Uri,

    /// If true, endpointPrefix is ignored when setting the endpoint on a request
    immutable: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EndpointPrefix(String);

impl EndpointPrefix {
    pub fn new(prefix: impl Into<String>) -> Result<Self, BuildError> {
        let prefix = prefix.into();
        match Authority::from_str(&prefix) {
            Ok(_) => Ok(EndpointPrefix(prefix)),
            Err(err) => Err(BuildError::InvalidUri {
                uri: prefix,
                err,
                message: "invalid prefix".into(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub enum InvalidEndpoint {
    EndpointMustHaveAuthority,
    EndpointMustHaveScheme,
    InvalidPrefixedAuthority(InvalidUri),
    FailedToConstructUri(http::Error),
}

impl Display for InvalidEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidEndpoint::EndpointMustHaveAuthority => {
                write!(f, "endpoint must contain a valid authority")
            }
            InvalidEndpoint::EndpointMustHaveScheme => {
                write!(f, "endpoint must contain a valid scheme")
            }
            InvalidEndpoint::InvalidPrefixedAuthority(err) => {
                write!(f, "endpoint prefix produced an invalid host: {}", err)
            }
            InvalidEndpoint::FailedToConstructUri(err) => {
                write!(f, "failed to construct the request URI: {}", err)
            }
        }
    }
}

impl std::error::Error for InvalidEndpoint {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidEndpoint::InvalidPrefixedAuthority(err) => Some(err),
            InvalidEndpoint::FailedToConstructUri(err) => Some(err),
            _ => None,
        }
    }
}

impl Endpoint {
    /// Create a new endpoint from a URI
    ///
    /// Certain services will augment the endpoint with additional metadata. For example,
    /// Evidently prefixes the host with `dataplane.` for evaluation calls. If your endpoint does not
    /// support this, (for example, when communicating with localhost), use [`Endpoint::immutable`].
    pub fn mutable(uri: Uri) -> Self {
        Endpoint {
            uri,
            immutable: false,
        }
    }

    /// Create a new immutable endpoint from a URI
    ///
    /// ```rust
    /// # use smithy_http::endpoint::Endpoint;
    /// use http::Uri;
    /// let endpoint = Endpoint::immutable(Uri::from_static("http://localhost:8000"));
    /// ```
    ///
    /// This constructor creates an endpoint which will ignore host prefixes. If you want an
    /// endpoint which will obey them, use [`Endpoint::mutable`] instead.
    pub fn immutable(uri: Uri) -> Self {
        Endpoint {
            uri,
            immutable: true,
        }
    }

    pub fn uri(&self) -> &http::Uri {
        &self.uri
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Sets the endpoint on `uri`, potentially applying the specified `prefix` in the process.
    ///
    /// The path of the endpoint (if any) is placed in front of the path of `uri`.
    pub fn set_endpoint(
        &self,
        uri: &mut http::Uri,
        prefix: Option<&EndpointPrefix>,
    ) -> Result<(), InvalidEndpoint> {
        let prefix = prefix.map(|p| p.0.as_str()).unwrap_or("");
        let authority = self
            .uri
            .authority()
            .map(|auth| auth.as_str())
            .ok_or(InvalidEndpoint::EndpointMustHaveAuthority)?;
        let authority = if !self.immutable && !prefix.is_empty() {
            Authority::from_str(&format!("{}{}", prefix, authority))
                .map_err(InvalidEndpoint::InvalidPrefixedAuthority)?
        } else {
            Authority::from_str(authority).map_err(InvalidEndpoint::InvalidPrefixedAuthority)?
        };
        let scheme = self
            .uri
            .scheme()
            .ok_or(InvalidEndpoint::EndpointMustHaveScheme)?;
        let new_uri = Uri::builder()
            .authority(authority)
            .scheme(scheme.clone())
            .path_and_query(Self::merge_paths(&self.uri, uri).as_ref())
            .build()
            .map_err(InvalidEndpoint::FailedToConstructUri)?;
        *uri = new_uri;
        Ok(())
    }

    fn merge_paths<'a>(endpoint: &'a Uri, uri: &'a Uri) -> Cow<'a, str> {
        if let Some(query) = endpoint.path_and_query().and_then(|pq| pq.query()) {
            tracing::warn!(query = %query, "query specified in endpoint will be ignored during endpoint resolution");
        }
        let endpoint_path = endpoint.path();
        let uri_path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("");
        if endpoint_path.is_empty() || endpoint_path == "/" {
            Cow::Borrowed(uri_path_and_query)
        } else {
            let ep_no_slash = endpoint_path.strip_suffix('/').unwrap_or(endpoint_path);
            let uri_path_no_slash = uri_path_and_query
                .strip_prefix('/')
                .unwrap_or(uri_path_and_query);
            Cow::Owned(format!("{}/{}", ep_no_slash, uri_path_no_slash))
        }
    }
}

#[cfg(test)]
mod test {
    use http::Uri;

    use crate::endpoint::{Endpoint, EndpointPrefix, InvalidEndpoint, ResolveEndpointError};
    use std::error::Error;

    #[test]
    fn prefix_endpoint() {
        let ep = Endpoint::mutable(Uri::from_static(
            "https://evidently.us-east-1.amazonaws.com",
        ));
        let mut uri = Uri::from_static("/projects/p/evaluations/f?k=v");
        ep.set_endpoint(
            &mut uri,
            Some(&EndpointPrefix::new("dataplane.").expect("valid prefix")),
        )
        .expect("valid endpoint");
        assert_eq!(
            uri,
            Uri::from_static(
                "https://dataplane.evidently.us-east-1.amazonaws.com/projects/p/evaluations/f?k=v"
            )
        );
    }

    #[test]
    fn prefix_endpoint_custom_port() {
        let ep = Endpoint::mutable(Uri::from_static(
            "https://evidently.us-east-1.amazonaws.com:6443",
        ));
        let mut uri = Uri::from_static("/list?k=v");
        ep.set_endpoint(
            &mut uri,
            Some(&EndpointPrefix::new("dataplane.").expect("valid prefix")),
        )
        .expect("valid endpoint");
        assert_eq!(
            uri,
            Uri::from_static("https://dataplane.evidently.us-east-1.amazonaws.com:6443/list?k=v")
        );
    }

    #[test]
    fn prefix_immutable_endpoint() {
        let ep = Endpoint::immutable(Uri::from_static(
            "https://evidently.us-east-1.amazonaws.com",
        ));
        let mut uri = Uri::from_static("/list?k=v");
        ep.set_endpoint(
            &mut uri,
            Some(&EndpointPrefix::new("dataplane.").expect("valid prefix")),
        )
        .expect("valid endpoint");
        assert_eq!(
            uri,
            Uri::from_static("https://evidently.us-east-1.amazonaws.com/list?k=v")
        );
    }

    #[test]
    fn endpoint_with_path() {
        for uri in &[
            // check that trailing slashes are properly normalized
            "https://proxy.internal/prefix/",
            "https://proxy.internal/prefix",
        ] {
            let ep = Endpoint::immutable(Uri::from_static(uri));
            let mut uri = Uri::from_static("/projects/p1/experiments?k=v");
            ep.set_endpoint(&mut uri, None).expect("valid endpoint");
            assert_eq!(
                uri,
                Uri::from_static("https://proxy.internal/prefix/projects/p1/experiments?k=v")
            );
        }
    }

    #[test]
    fn endpoint_without_authority() {
        let ep = Endpoint::mutable(Uri::from_static("/just/a/path"));
        let mut uri = Uri::from_static("/");
        assert!(matches!(
            ep.set_endpoint(&mut uri, None),
            Err(InvalidEndpoint::EndpointMustHaveAuthority)
        ));
    }

    #[test]
    fn resolution_error_displays_message() {
        let err = ResolveEndpointError::message("Invalid Configuration: Missing Region");
        assert_eq!(err.to_string(), "Invalid Configuration: Missing Region");
        assert!(err.source().is_none());
        let err = ResolveEndpointError::message("bad endpoint")
            .with_source(EndpointPrefix::new("not valid").unwrap_err());
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_prefix() {
        assert!(EndpointPrefix::new("not a valid prefix").is_err());
    }
}
