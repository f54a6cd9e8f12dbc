/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::signer::{
    OperationSigningConfig, RequestConfig, SigV4Signer, SigningError, SigningRequirements,
};
use aws_auth::provider::{CredentialsError, CredentialsProvider};
use aws_auth::Credentials;
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::property_bag::PropertyBag;
use std::time::SystemTime;
use thiserror::Error;

/// Middleware stage to sign requests with SigV4
///
/// SigV4SigningStage will load configuration from the request property bag and add
/// a signature.
///
/// Prior to signing, the following fields MUST be present in the property bag:
/// - [`SigningRegion`](SigningRegion): The region used when signing the request, eg. `us-east-1`
/// - [`SigningService`](SigningService): The name of the service to use when signing the request, eg. `evidently`
/// - [`CredentialsProvider`](CredentialsProvider): A credentials provider to retrieve credentials
/// - [`OperationSigningConfig`](OperationSigningConfig): Operation specific signing configuration, eg.
///   changes to URL encoding behavior, or headers that must be omitted.
/// If any of these fields are missing, the middleware will return an error.
///
/// The following fields MAY be present in the property bag:
/// - [`SystemTime`](SystemTime): The timestamp to use when signing the request. If this field is not present
///   [`SystemTime::now`](SystemTime::now) will be used.
#[derive(Clone, Debug)]
pub struct SigV4SigningStage {
    signer: SigV4Signer,
}

impl SigV4SigningStage {
    pub fn new(signer: SigV4Signer) -> Self {
        Self { signer }
    }
}

#[derive(Debug, Error)]
pub enum SigningStageError {
    #[error("No credentials provider in the property bag")]
    MissingCredentialsProvider,
    #[error("No signing region in the property bag")]
    MissingSigningRegion,
    #[error("No signing service in the property bag")]
    MissingSigningService,
    #[error("No signing configuration in the property bag")]
    MissingSigningConfig,
    #[error("Signing failed: {0}")]
    SigningFailure(SigningError),
    #[error("Failed to load credentials from the credentials provider: {0}")]
    CredentialsLoadingError(#[from] CredentialsError),
}

/// Extract a signing config from a [`PropertyBag`](smithy_http::property_bag::PropertyBag)
///
/// Returns `Ok(None)` when the operation may go out unsigned.
fn signing_config(
    config: &PropertyBag,
) -> Result<Option<(&OperationSigningConfig, RequestConfig<'_>, Credentials)>, SigningStageError>
{
    let operation_config = config
        .get::<OperationSigningConfig>()
        .ok_or(SigningStageError::MissingSigningConfig)?;
    let creds = match operation_config.signing_requirements {
        SigningRequirements::Disabled => return Ok(None),
        SigningRequirements::Required => config
            .get::<CredentialsProvider>()
            .ok_or(SigningStageError::MissingCredentialsProvider)?
            .provide_credentials()?,
        SigningRequirements::Optional => {
            match config
                .get::<CredentialsProvider>()
                .map(|provider| provider.provide_credentials())
            {
                Some(Ok(creds)) => creds,
                Some(Err(err)) => {
                    tracing::debug!(err = %err, "no credentials available, sending unsigned request");
                    return Ok(None);
                }
                None => return Ok(None),
            }
        }
    };
    let region = config
        .get::<SigningRegion>()
        .ok_or(SigningStageError::MissingSigningRegion)?;
    let signing_service = config
        .get::<SigningService>()
        .ok_or(SigningStageError::MissingSigningService)?;
    let request_config = RequestConfig {
        request_ts: config
            .get::<SystemTime>()
            .copied()
            .unwrap_or_else(SystemTime::now),
        region,
        service: signing_service,
    };
    Ok(Some((operation_config, request_config, creds)))
}

impl MapRequest for SigV4SigningStage {
    type Error = SigningStageError;

    fn apply(&self, req: Request) -> Result<Request, Self::Error> {
        req.augment(|mut req, config| {
            let (operation_config, request_config, creds) = match signing_config(config)? {
                Some(signing_config) => signing_config,
                None => return Ok(req),
            };
            let signature = self
                .signer
                .sign(operation_config, &request_config, &creds, &mut req)
                .map_err(SigningStageError::SigningFailure)?;
            tracing::trace!(signature = signature.as_ref(), "signed request");
            Ok(req)
        })
    }
}

#[cfg(test)]
mod test {
    use crate::middleware::{SigV4SigningStage, SigningStageError};
    use crate::signer::{OperationSigningConfig, SigV4Signer, SigningRequirements};
    use aws_auth::provider::{set_provider, CredentialsError, ProvideCredentials};
    use aws_auth::Credentials;
    use aws_types::region::SigningRegion;
    use aws_types::SigningService;
    use http::header::AUTHORIZATION;
    use smithy_http::body::SdkBody;
    use smithy_http::middleware::MapRequest;
    use smithy_http::operation;
    use std::sync::Arc;
    use std::time::{Duration, UNIX_EPOCH};

    struct NoCredentials;

    impl ProvideCredentials for NoCredentials {
        fn provide_credentials(&self) -> Result<Credentials, CredentialsError> {
            Err(CredentialsError::CredentialsNotLoaded)
        }
    }

    fn request() -> operation::Request {
        operation::Request::new(
            http::Request::builder()
                .uri("https://evidently.us-east-1.amazonaws.com/projects/p1")
                .body(SdkBody::from(""))
                .unwrap(),
        )
    }

    fn signable_request() -> operation::Request {
        let mut req = request();
        {
            let mut props = req.properties_mut();
            props.insert(OperationSigningConfig::default_config());
            props.insert(SigningRegion::from_static("us-east-1"));
            props.insert(SigningService::from_static("evidently"));
            props.insert(UNIX_EPOCH + Duration::new(1611160427, 0));
            set_provider(
                &mut props,
                Arc::new(Credentials::from_keys("AKIAfoo", "bar", None)),
            );
        }
        req
    }

    #[test]
    fn signs_request() {
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let req = signer.apply(signable_request()).expect("signing succeeded");
        let auth = req
            .http()
            .headers()
            .get(AUTHORIZATION)
            .expect("auth header must be present");
        assert!(auth
            .to_str()
            .unwrap()
            .contains("Credential=AKIAfoo/20210120/us-east-1/evidently/aws4_request"));
    }

    #[test]
    fn signing_time_comes_from_the_property_bag() {
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let first = signer.apply(signable_request()).unwrap();
        let second = signer.apply(signable_request()).unwrap();
        assert_eq!(
            first.http().headers().get(AUTHORIZATION),
            second.http().headers().get(AUTHORIZATION)
        );
    }

    #[test]
    fn missing_fields_are_distinct_errors() {
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let err = signer.apply(request()).expect_err("no signing config");
        assert!(matches!(err, SigningStageError::MissingSigningConfig));

        let mut req = signable_request();
        req.properties_mut().remove::<SigningRegion>();
        let err = signer.apply(req).expect_err("no region");
        assert!(matches!(err, SigningStageError::MissingSigningRegion));

        let mut req = signable_request();
        req.properties_mut().remove::<SigningService>();
        let err = signer.apply(req).expect_err("no service");
        assert!(matches!(err, SigningStageError::MissingSigningService));

        let mut req = signable_request();
        req.properties_mut()
            .remove::<aws_auth::provider::CredentialsProvider>();
        let err = signer.apply(req).expect_err("no credentials provider");
        assert!(matches!(err, SigningStageError::MissingCredentialsProvider));
    }

    #[test]
    fn credentials_errors_surface() {
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let mut req = signable_request();
        set_provider(&mut req.properties_mut(), Arc::new(NoCredentials));
        let err = signer.apply(req).expect_err("credentials failed to load");
        assert!(matches!(err, SigningStageError::CredentialsLoadingError(_)));
    }

    #[test]
    fn optional_signing_skips_without_credentials() {
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let mut req = signable_request();
        {
            let mut props = req.properties_mut();
            let mut config = OperationSigningConfig::default_config();
            config.signing_requirements = SigningRequirements::Optional;
            props.insert(config);
            set_provider(&mut props, Arc::new(NoCredentials));
        }
        let req = signer.apply(req).expect("unsigned request is allowed");
        assert!(req.http().headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn disabled_signing_leaves_request_untouched() {
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let mut req = request();
        let mut config = OperationSigningConfig::default_config();
        config.signing_requirements = SigningRequirements::Disabled;
        req.properties_mut().insert(config);
        let req = signer.apply(req).expect("signing disabled");
        assert!(req.http().headers().get(AUTHORIZATION).is_none());
    }
}
