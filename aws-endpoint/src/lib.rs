/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod partition;

pub use partition::DefaultResolver;

use aws_types::region::{Region, SigningRegion};
use aws_types::SigningService;
use smithy_http::endpoint::{Endpoint, EndpointPrefix, InvalidEndpoint};
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::property_bag::PropertyBag;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Context parameters used to resolve an endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Params {
    pub region: Option<Region>,
    pub use_fips: bool,
    pub use_dual_stack: bool,
    /// A caller-provided endpoint URL that replaces the computed one
    pub endpoint: Option<String>,
}

impl Params {
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

#[derive(Default, Debug, Clone)]
pub struct ParamsBuilder {
    inner: Params,
}

impl ParamsBuilder {
    pub fn region(mut self, region: impl Into<Option<Region>>) -> Self {
        self.inner.region = region.into();
        self
    }

    pub fn use_fips(mut self, use_fips: bool) -> Self {
        self.inner.use_fips = use_fips;
        self
    }

    pub fn use_dual_stack(mut self, use_dual_stack: bool) -> Self {
        self.inner.use_dual_stack = use_dual_stack;
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.inner.endpoint = Some(endpoint.into());
        self
    }

    pub fn set_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.inner.endpoint = endpoint;
        self
    }

    pub fn build(self) -> Params {
        self.inner
    }
}

/// Endpoint to connect to an AWS Service
///
/// An `AwsEndpoint` captures all necessary information needed to connect to an AWS service, including:
/// - The URI of the endpoint (needed to actually send the request)
/// - The name of the service (needed downstream for signing)
/// - The signing region (which may differ from the actual region)
#[derive(Clone, Debug)]
pub struct AwsEndpoint {
    endpoint: Endpoint,
    credential_scope: CredentialScope,
}

impl AwsEndpoint {
    pub fn new(endpoint: Endpoint, credential_scope: CredentialScope) -> Self {
        AwsEndpoint {
            endpoint,
            credential_scope,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn credential_scope(&self) -> &CredentialScope {
        &self.credential_scope
    }

    pub fn set_endpoint(
        &self,
        uri: &mut http::Uri,
        endpoint_prefix: Option<&EndpointPrefix>,
    ) -> Result<(), InvalidEndpoint> {
        self.endpoint.set_endpoint(uri, endpoint_prefix)
    }
}

/// Signing overrides carried by a resolved endpoint
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct CredentialScope {
    region: Option<SigningRegion>,
    service: Option<SigningService>,
}

impl CredentialScope {
    pub fn builder() -> credential_scope::Builder {
        credential_scope::Builder::default()
    }

    pub fn region(&self) -> Option<&SigningRegion> {
        self.region.as_ref()
    }

    pub fn service(&self) -> Option<&SigningService> {
        self.service.as_ref()
    }
}

pub mod credential_scope {
    use crate::CredentialScope;
    use aws_types::region::SigningRegion;
    use aws_types::SigningService;

    #[derive(Debug, Default)]
    pub struct Builder {
        region: Option<SigningRegion>,
        service: Option<SigningService>,
    }

    impl Builder {
        pub fn region(mut self, region: impl Into<SigningRegion>) -> Self {
            self.region = Some(region.into());
            self
        }

        pub fn service(mut self, service: impl Into<SigningService>) -> Self {
            self.service = Some(service.into());
            self
        }

        pub fn build(self) -> CredentialScope {
            CredentialScope {
                region: self.region,
                service: self.service,
            }
        }
    }
}

/// Resolve the AWS Endpoint for a given set of [`Params`]
///
/// Before the endpoint is applied to a request, the caller's operation path has already been
/// built, so implementations only decide the scheme, the host and an optional base path.
pub trait ResolveAwsEndpoint: Send + Sync {
    fn resolve_endpoint(&self, params: &Params) -> Result<AwsEndpoint, BoxError>;
}

impl<F> ResolveAwsEndpoint for F
where
    F: Fn(&Params) -> Result<AwsEndpoint, BoxError> + Send + Sync,
{
    fn resolve_endpoint(&self, params: &Params) -> Result<AwsEndpoint, BoxError> {
        (self)(params)
    }
}

pub type AwsEndpointResolver = Arc<dyn ResolveAwsEndpoint>;

pub fn get_endpoint_resolver(config: &PropertyBag) -> Option<&AwsEndpointResolver> {
    config.get()
}

pub fn set_endpoint_resolver(config: &mut PropertyBag, provider: AwsEndpointResolver) {
    config.insert(provider);
}

/// Middleware Stage to Add an Endpoint to a Request
///
/// AwsEndpointStage implements [`MapRequest`](smithy_http::middleware::MapRequest). It will:
/// 1. Load an endpoint provider from the property bag.
/// 2. Load an endpoint given the [`Params`] in the property bag.
/// 3. Apply the endpoint to the URI in the request, honoring any [`EndpointPrefix`]
/// 4. Set the `SigningRegion` and `SigningService` in the property bag to drive downstream
/// signing middleware.
#[derive(Clone, Debug)]
pub struct AwsEndpointStage;

#[derive(Debug)]
pub enum AwsEndpointStageError {
    NoEndpointResolver,
    NoEndpointParams,
    EndpointResolutionError(BoxError),
    InvalidEndpoint(InvalidEndpoint),
}

impl Display for AwsEndpointStageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AwsEndpointStageError::NoEndpointResolver => {
                write!(f, "no endpoint resolver was configured")
            }
            AwsEndpointStageError::NoEndpointParams => {
                write!(f, "no endpoint parameters were set on the request")
            }
            AwsEndpointStageError::EndpointResolutionError(err) => write!(f, "{}", err),
            AwsEndpointStageError::InvalidEndpoint(err) => {
                write!(f, "resolved endpoint could not be applied: {}", err)
            }
        }
    }
}

impl Error for AwsEndpointStageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AwsEndpointStageError::EndpointResolutionError(err) => Some(err.as_ref()),
            AwsEndpointStageError::InvalidEndpoint(err) => Some(err),
            _ => None,
        }
    }
}

impl MapRequest for AwsEndpointStage {
    type Error = AwsEndpointStageError;

    fn apply(&self, request: Request) -> Result<Request, Self::Error> {
        request.augment(|mut http_req, props| {
            let provider =
                get_endpoint_resolver(props).ok_or(AwsEndpointStageError::NoEndpointResolver)?;
            let params = props
                .get::<Params>()
                .ok_or(AwsEndpointStageError::NoEndpointParams)?;
            let endpoint = provider
                .resolve_endpoint(params)
                .map_err(AwsEndpointStageError::EndpointResolutionError)?;
            tracing::debug!(endpoint = ?endpoint, params = ?params, "resolved endpoint");
            let signing_region = endpoint
                .credential_scope()
                .region()
                .cloned()
                .or_else(|| params.region().cloned().map(SigningRegion::from));
            if let Some(signing_region) = signing_region {
                props.insert::<SigningRegion>(signing_region);
            }
            if let Some(signing_service) = endpoint.credential_scope().service() {
                props.insert::<SigningService>(signing_service.clone());
            }
            endpoint
                .set_endpoint(http_req.uri_mut(), props.get::<EndpointPrefix>())
                .map_err(AwsEndpointStageError::InvalidEndpoint)?;
            Ok(http_req)
        })
    }
}
