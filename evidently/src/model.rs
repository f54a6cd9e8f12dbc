/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::serde_util;
use serde::{Deserialize, Serialize, Serializer};
use smithy_types::Instant;
use std::collections::HashMap;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[non_exhaustive]
        #[derive(Clone, Debug, Eq, Hash, PartialEq, Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            $($variant,)+
            /// A value this client does not know about
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $value,)+
                    $name::Unknown(value) => value.as_str(),
                }
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(s: &'a str) -> Self {
                match s {
                    $($value => $name::$variant,)+
                    other => $name::Unknown(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::from(s.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

string_enum! {
    pub enum ExperimentStatus {
        Created => "CREATED",
        Updating => "UPDATING",
        Running => "RUNNING",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

string_enum! {
    /// State an experiment ends in when it is stopped
    pub enum ExperimentStopDesiredState {
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

string_enum! {
    pub enum ChangeDirection {
        Increase => "INCREASE",
        Decrease => "DECREASE",
    }
}

/// The value of a feature variation
///
/// Exactly one member is set on the wire.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableValue {
    BoolValue(bool),
    StringValue(String),
    LongValue(i64),
    DoubleValue(f64),
}

impl VariableValue {
    pub fn as_bool_value(&self) -> Option<bool> {
        match self {
            VariableValue::BoolValue(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string_value(&self) -> Option<&str> {
        match self {
            VariableValue::StringValue(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_long_value(&self) -> Option<i64> {
        match self {
            VariableValue::LongValue(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double_value(&self) -> Option<f64> {
        match self {
            VariableValue::DoubleValue(value) => Some(*value),
            _ => None,
        }
    }
}

/// A treatment to create as part of an experiment
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
}

impl TreatmentConfig {
    pub fn builder() -> treatment_config::Builder {
        treatment_config::Builder::default()
    }
}

pub mod treatment_config {
    use crate::model::TreatmentConfig;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        name: Option<String>,
        description: Option<String>,
        feature: Option<String>,
        variation: Option<String>,
    }

    impl Builder {
        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.name = Some(name.into());
            self
        }

        pub fn description(mut self, description: impl Into<String>) -> Self {
            self.description = Some(description.into());
            self
        }

        pub fn feature(mut self, feature: impl Into<String>) -> Self {
            self.feature = Some(feature.into());
            self
        }

        pub fn variation(mut self, variation: impl Into<String>) -> Self {
            self.variation = Some(variation.into());
            self
        }

        pub fn build(self) -> TreatmentConfig {
            TreatmentConfig {
                name: self.name,
                description: self.description,
                feature: self.feature,
                variation: self.variation,
            }
        }
    }
}

/// How a metric is computed from the events Evidently records
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDefinitionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_label: Option<String>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricGoalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_definition: Option<MetricDefinitionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_change: Option<ChangeDirection>,
}

impl MetricGoalConfig {
    pub fn new(metric_definition: MetricDefinitionConfig, desired_change: ChangeDirection) -> Self {
        MetricGoalConfig {
            metric_definition: Some(metric_definition),
            desired_change: Some(desired_change),
        }
    }
}

impl MetricDefinitionConfig {
    pub fn new(name: impl Into<String>, entity_id_key: impl Into<String>) -> Self {
        MetricDefinitionConfig {
            name: Some(name.into()),
            entity_id_key: Some(entity_id_key.into()),
            ..Default::default()
        }
    }

    pub fn value_key(mut self, value_key: impl Into<String>) -> Self {
        self.value_key = Some(value_key.into());
        self
    }

    pub fn event_pattern(mut self, event_pattern: impl Into<String>) -> Self {
        self.event_pattern = Some(event_pattern.into());
        self
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub feature_variations: Option<HashMap<String, String>>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    #[serde(default)]
    pub arn: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ExperimentStatus>,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default, deserialize_with = "serde_util::epoch_seconds")]
    pub created_time: Option<Instant>,
    #[serde(default, deserialize_with = "serde_util::epoch_seconds")]
    pub last_updated_time: Option<Instant>,
    #[serde(default)]
    pub randomization_salt: Option<String>,
    #[serde(default)]
    pub sampling_rate: Option<i64>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub treatments: Option<Vec<Treatment>>,
    #[serde(default)]
    pub metric_goals: Option<Vec<MetricGoalConfig>>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}
