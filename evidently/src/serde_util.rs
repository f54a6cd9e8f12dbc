/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use serde::{Deserialize, Deserializer};
use smithy_types::Instant;

/// restJson1 timestamps default to fractional epoch seconds
pub(crate) fn epoch_seconds<'de, D>(deserializer: D) -> Result<Option<Instant>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(Instant::from_f64))
}
