/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Partition based endpoint resolution
//!
//! Regions are grouped into partitions which share a DNS suffix and a set of supported features.

use crate::{AwsEndpoint, BoxError, CredentialScope, Params, ResolveAwsEndpoint};
use smithy_http::endpoint::{Endpoint, ResolveEndpointError};

/// A group of regions sharing a DNS suffix
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Partition {
    pub id: &'static str,
    region_prefixes: &'static [&'static str],
    pub dns_suffix: &'static str,
    pub dual_stack_dns_suffix: &'static str,
    pub supports_fips: bool,
    pub supports_dual_stack: bool,
}

impl Partition {
    fn matches(&self, region: &str) -> bool {
        self.region_prefixes
            .iter()
            .any(|prefix| region.starts_with(prefix))
    }
}

const AWS: Partition = Partition {
    id: "aws",
    region_prefixes: &[
        "us-", "eu-", "ap-", "sa-", "ca-", "me-", "af-", "il-", "mx-",
    ],
    dns_suffix: "amazonaws.com",
    dual_stack_dns_suffix: "api.aws",
    supports_fips: true,
    supports_dual_stack: true,
};

/// Partitions in match order. More specific region prefixes come first; `aws` is the fallback.
const PARTITIONS: &[Partition] = &[
    Partition {
        id: "aws-cn",
        region_prefixes: &["cn-"],
        dns_suffix: "amazonaws.com.cn",
        dual_stack_dns_suffix: "api.amazonwebservices.com.cn",
        supports_fips: true,
        supports_dual_stack: true,
    },
    Partition {
        id: "aws-us-gov",
        region_prefixes: &["us-gov-"],
        dns_suffix: "amazonaws.com",
        dual_stack_dns_suffix: "api.aws",
        supports_fips: true,
        supports_dual_stack: true,
    },
    Partition {
        id: "aws-iso",
        region_prefixes: &["us-iso-"],
        dns_suffix: "c2s.ic.gov",
        dual_stack_dns_suffix: "c2s.ic.gov",
        supports_fips: true,
        supports_dual_stack: false,
    },
    Partition {
        id: "aws-iso-b",
        region_prefixes: &["us-isob-"],
        dns_suffix: "sc2s.sgov.gov",
        dual_stack_dns_suffix: "sc2s.sgov.gov",
        supports_fips: true,
        supports_dual_stack: false,
    },
    AWS,
];

/// Returns the partition `region` belongs to, falling back to `aws` for unknown regions
pub fn partition(region: &str) -> &'static Partition {
    PARTITIONS
        .iter()
        .find(|partition| partition.matches(region))
        .unwrap_or(&PARTITIONS[PARTITIONS.len() - 1])
}

/// The standard endpoint rules shared by every service
///
/// Rules are evaluated in order:
/// 1. A custom endpoint cannot be combined with FIPS or dual-stack
/// 2. A custom endpoint is used as-is (host prefixes are not applied)
/// 3. Otherwise a region is required and the hostname is derived from its partition
#[derive(Debug, Clone)]
pub struct DefaultResolver {
    endpoint_prefix: &'static str,
}

impl DefaultResolver {
    /// `endpoint_prefix` is the service's hostname label, eg. `evidently` or `ec2`
    pub fn new(endpoint_prefix: &'static str) -> Self {
        DefaultResolver { endpoint_prefix }
    }

    fn resolve(&self, params: &Params) -> Result<AwsEndpoint, ResolveEndpointError> {
        if let Some(endpoint) = params.endpoint() {
            if params.use_fips {
                return Err(ResolveEndpointError::message(
                    "Invalid Configuration: FIPS and custom endpoint are not supported",
                ));
            }
            if params.use_dual_stack {
                return Err(ResolveEndpointError::message(
                    "Invalid Configuration: Dualstack and custom endpoint are not supported",
                ));
            }
            let uri = endpoint.parse::<http::Uri>().map_err(|err| {
                ResolveEndpointError::message(format!("invalid custom endpoint `{}`", endpoint))
                    .with_source(err)
            })?;
            return Ok(AwsEndpoint::new(
                Endpoint::immutable(uri),
                CredentialScope::default(),
            ));
        }
        let region = params
            .region()
            .ok_or_else(|| ResolveEndpointError::message("Invalid Configuration: Missing Region"))?;
        let region = region.as_ref();
        let partition = partition(region);
        let host = match (params.use_fips, params.use_dual_stack) {
            (true, true) => {
                if !(partition.supports_fips && partition.supports_dual_stack) {
                    return Err(ResolveEndpointError::message(
                        "FIPS and DualStack are enabled, but this partition does not support one or both",
                    ));
                }
                format!(
                    "{}-fips.{}.{}",
                    self.endpoint_prefix, region, partition.dual_stack_dns_suffix
                )
            }
            (true, false) => {
                if !partition.supports_fips {
                    return Err(ResolveEndpointError::message(
                        "FIPS is enabled but this partition does not support FIPS",
                    ));
                }
                format!(
                    "{}-fips.{}.{}",
                    self.endpoint_prefix, region, partition.dns_suffix
                )
            }
            (false, true) => {
                if !partition.supports_dual_stack {
                    return Err(ResolveEndpointError::message(
                        "DualStack is enabled but this partition does not support DualStack",
                    ));
                }
                format!(
                    "{}.{}.{}",
                    self.endpoint_prefix, region, partition.dual_stack_dns_suffix
                )
            }
            (false, false) => format!(
                "{}.{}.{}",
                self.endpoint_prefix, region, partition.dns_suffix
            ),
        };
        let uri = format!("https://{}", host).parse::<http::Uri>().map_err(|err| {
            ResolveEndpointError::message(format!("invalid region `{}`", region)).with_source(err)
        })?;
        Ok(AwsEndpoint::new(
            Endpoint::mutable(uri),
            CredentialScope::default(),
        ))
    }
}

impl ResolveAwsEndpoint for DefaultResolver {
    fn resolve_endpoint(&self, params: &Params) -> Result<AwsEndpoint, BoxError> {
        self.resolve(params).map_err(|err| err.into())
    }
}
