/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::{Experiment, VariableValue};
use crate::serde_util;
use serde::Deserialize;
use smithy_types::Instant;

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperimentOutput {
    #[serde(default)]
    pub experiment: Option<Experiment>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetExperimentOutput {
    #[serde(default)]
    pub experiment: Option<Experiment>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DeleteExperimentOutput {}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExperimentsOutput {
    #[serde(default)]
    pub experiments: Option<Vec<Experiment>>,
    /// Pass to the next `ListExperiments` call to fetch the following page
    #[serde(default)]
    pub next_token: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExperimentOutput {
    #[serde(default, deserialize_with = "serde_util::epoch_seconds")]
    pub started_time: Option<Instant>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopExperimentOutput {
    #[serde(default, deserialize_with = "serde_util::epoch_seconds")]
    pub ended_time: Option<Instant>,
}

/// The variation a user was assigned
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateFeatureOutput {
    #[serde(default)]
    pub variation: Option<String>,
    #[serde(default)]
    pub value: Option<VariableValue>,
    /// Why the variation was chosen, eg. `EXPERIMENT_RULE_MATCH` or `DEFAULT`
    #[serde(default)]
    pub reason: Option<String>,
    /// JSON document with the details of the evaluation
    #[serde(default)]
    pub details: Option<String>,
}
