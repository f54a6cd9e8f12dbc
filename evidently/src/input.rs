/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Operation inputs and their restJson1 serializers
//!
//! Every member is optional. Members bound to the URI path are validated, in declaration order,
//! when the request is built.

use crate::model::{ExperimentStatus, ExperimentStopDesiredState, MetricGoalConfig, TreatmentConfig};
use crate::operation;
use aws_hyper::OperationInput;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::endpoint::EndpointPrefix;
use smithy_http::label;
use smithy_http::operation::BuildError;
use smithy_http::query;
use smithy_types::Instant;
use std::collections::HashMap;

const JSON_CONTENT_TYPE: &str = "application/json";

fn required_label(value: &Option<String>, field: &'static str) -> Result<String, BuildError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(label::fmt_string(value, false)),
        _ => Err(BuildError::MissingField { field }),
    }
}

fn json_body<T: Serialize>(body: &T) -> Result<SdkBody, BuildError> {
    serde_json::to_vec(body)
        .map(SdkBody::from)
        .map_err(|err| BuildError::SerializationError(err.into()))
}

fn build_request(
    method: http::Method,
    uri: String,
    body: Option<SdkBody>,
) -> Result<http::Request<SdkBody>, BuildError> {
    let builder = http::Request::builder().method(method).uri(uri);
    Ok(match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)?,
        None => builder.body(SdkBody::empty())?,
    })
}

/// Input for [`CreateExperiment`](crate::Client::create_experiment)
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateExperimentInput {
    pub project: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub treatments: Option<Vec<TreatmentConfig>>,
    pub metric_goals: Option<Vec<MetricGoalConfig>>,
    pub randomization_salt: Option<String>,
    pub sampling_rate: Option<i64>,
    pub segment: Option<String>,
    pub tags: Option<HashMap<String, String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateExperimentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    treatments: Option<&'a [TreatmentConfig]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metric_goals: Option<&'a [MetricGoalConfig]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    randomization_salt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sampling_rate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    segment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a HashMap<String, String>>,
}

impl CreateExperimentInput {
    pub fn builder() -> create_experiment_input::Builder {
        create_experiment_input::Builder::default()
    }

    fn body(&self) -> CreateExperimentBody<'_> {
        CreateExperimentBody {
            name: self.name.as_deref(),
            description: self.description.as_deref(),
            treatments: self.treatments.as_deref(),
            metric_goals: self.metric_goals.as_deref(),
            randomization_salt: self.randomization_salt.as_deref(),
            sampling_rate: self.sampling_rate,
            segment: self.segment.as_deref(),
            tags: self.tags.as_ref(),
        }
    }
}

impl OperationInput for CreateExperimentInput {
    const NAME: &'static str = "CreateExperiment";
    type Output = crate::output::CreateExperimentOutput;
    type Error = crate::error::Error;
    type Handler = operation::CreateExperiment;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        let project = required_label(&self.project, "Project")?;
        build_request(
            http::Method::POST,
            format!("/projects/{}/experiments", project),
            Some(json_body(&self.body())?),
        )
    }
}

pub mod create_experiment_input {
    use crate::input::CreateExperimentInput;
    use crate::model::{MetricGoalConfig, TreatmentConfig};
    use std::collections::HashMap;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        project: Option<String>,
        name: Option<String>,
        description: Option<String>,
        treatments: Option<Vec<TreatmentConfig>>,
        metric_goals: Option<Vec<MetricGoalConfig>>,
        randomization_salt: Option<String>,
        sampling_rate: Option<i64>,
        segment: Option<String>,
        tags: Option<HashMap<String, String>>,
    }

    impl Builder {
        /// Name or ARN of the project that contains the experiment
        pub fn project(mut self, project: impl Into<String>) -> Self {
            self.project = Some(project.into());
            self
        }

        pub fn set_project(mut self, project: Option<String>) -> Self {
            self.project = project;
            self
        }

        pub fn name(mut self, name: impl Into<String>) -> Self {
            self.name = Some(name.into());
            self
        }

        pub fn set_name(mut self, name: Option<String>) -> Self {
            self.name = name;
            self
        }

        pub fn description(mut self, description: impl Into<String>) -> Self {
            self.description = Some(description.into());
            self
        }

        pub fn set_description(mut self, description: Option<String>) -> Self {
            self.description = description;
            self
        }

        /// Appends a treatment
        pub fn treatments(mut self, treatment: TreatmentConfig) -> Self {
            self.treatments.get_or_insert_with(Vec::new).push(treatment);
            self
        }

        pub fn set_treatments(mut self, treatments: Option<Vec<TreatmentConfig>>) -> Self {
            self.treatments = treatments;
            self
        }

        /// Appends a metric goal
        pub fn metric_goals(mut self, metric_goal: MetricGoalConfig) -> Self {
            self.metric_goals
                .get_or_insert_with(Vec::new)
                .push(metric_goal);
            self
        }

        pub fn set_metric_goals(mut self, metric_goals: Option<Vec<MetricGoalConfig>>) -> Self {
            self.metric_goals = metric_goals;
            self
        }

        pub fn randomization_salt(mut self, salt: impl Into<String>) -> Self {
            self.randomization_salt = Some(salt.into());
            self
        }

        pub fn set_randomization_salt(mut self, salt: Option<String>) -> Self {
            self.randomization_salt = salt;
            self
        }

        /// Portion of the audience in the experiment, in thousandths of a percent
        pub fn sampling_rate(mut self, sampling_rate: i64) -> Self {
            self.sampling_rate = Some(sampling_rate);
            self
        }

        pub fn set_sampling_rate(mut self, sampling_rate: Option<i64>) -> Self {
            self.sampling_rate = sampling_rate;
            self
        }

        pub fn segment(mut self, segment: impl Into<String>) -> Self {
            self.segment = Some(segment.into());
            self
        }

        pub fn set_segment(mut self, segment: Option<String>) -> Self {
            self.segment = segment;
            self
        }

        /// Adds a key-value pair to the tags
        pub fn tags(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
            self.tags
                .get_or_insert_with(HashMap::new)
                .insert(key.into(), value.into());
            self
        }

        pub fn set_tags(mut self, tags: Option<HashMap<String, String>>) -> Self {
            self.tags = tags;
            self
        }

        pub fn build(self) -> CreateExperimentInput {
            CreateExperimentInput {
                project: self.project,
                name: self.name,
                description: self.description,
                treatments: self.treatments,
                metric_goals: self.metric_goals,
                randomization_salt: self.randomization_salt,
                sampling_rate: self.sampling_rate,
                segment: self.segment,
                tags: self.tags,
            }
        }
    }
}

macro_rules! experiment_input {
    ($(#[$meta:meta])* $input:ident, $builder_mod:ident) => {
        $(#[$meta])*
        #[non_exhaustive]
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $input {
            pub project: Option<String>,
            pub experiment: Option<String>,
        }

        impl $input {
            pub fn builder() -> $builder_mod::Builder {
                $builder_mod::Builder::default()
            }

            fn experiment_path(&self) -> Result<String, BuildError> {
                let project = required_label(&self.project, "Project")?;
                let experiment = required_label(&self.experiment, "Experiment")?;
                Ok(format!("/projects/{}/experiments/{}", project, experiment))
            }
        }

        pub mod $builder_mod {
            use crate::input::$input;

            #[non_exhaustive]
            #[derive(Clone, Debug, Default, PartialEq)]
            pub struct Builder {
                project: Option<String>,
                experiment: Option<String>,
            }

            impl Builder {
                pub fn project(mut self, project: impl Into<String>) -> Self {
                    self.project = Some(project.into());
                    self
                }

                pub fn set_project(mut self, project: Option<String>) -> Self {
                    self.project = project;
                    self
                }

                pub fn experiment(mut self, experiment: impl Into<String>) -> Self {
                    self.experiment = Some(experiment.into());
                    self
                }

                pub fn set_experiment(mut self, experiment: Option<String>) -> Self {
                    self.experiment = experiment;
                    self
                }

                pub fn build(self) -> $input {
                    $input {
                        project: self.project,
                        experiment: self.experiment,
                    }
                }
            }
        }
    };
}

experiment_input!(
    /// Input for [`GetExperiment`](crate::Client::get_experiment)
    GetExperimentInput,
    get_experiment_input
);

experiment_input!(
    /// Input for [`DeleteExperiment`](crate::Client::delete_experiment)
    DeleteExperimentInput,
    delete_experiment_input
);

impl OperationInput for GetExperimentInput {
    const NAME: &'static str = "GetExperiment";
    type Output = crate::output::GetExperimentOutput;
    type Error = crate::error::Error;
    type Handler = operation::GetExperiment;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        build_request(http::Method::GET, self.experiment_path()?, None)
    }
}

impl OperationInput for DeleteExperimentInput {
    const NAME: &'static str = "DeleteExperiment";
    type Output = crate::output::DeleteExperimentOutput;
    type Error = crate::error::Error;
    type Handler = operation::DeleteExperiment;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        build_request(http::Method::DELETE, self.experiment_path()?, None)
    }
}

/// Input for [`ListExperiments`](crate::Client::list_experiments)
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListExperimentsInput {
    pub project: Option<String>,
    pub max_results: Option<i32>,
    pub next_token: Option<String>,
    pub status: Option<ExperimentStatus>,
}

impl ListExperimentsInput {
    pub fn builder() -> list_experiments_input::Builder {
        list_experiments_input::Builder::default()
    }
}

impl OperationInput for ListExperimentsInput {
    const NAME: &'static str = "ListExperiments";
    type Output = crate::output::ListExperimentsOutput;
    type Error = crate::error::Error;
    type Handler = operation::ListExperiments;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        let project = required_label(&self.project, "Project")?;
        let mut uri = format!("/projects/{}/experiments", project);
        let mut params = query::Writer::new(&mut uri);
        if let Some(max_results) = self.max_results {
            params.push_kv("maxResults", &max_results.to_string());
        }
        if let Some(next_token) = &self.next_token {
            params.push_kv("nextToken", &query::fmt_string(next_token));
        }
        if let Some(status) = &self.status {
            params.push_kv("status", &query::fmt_string(status.as_str()));
        }
        build_request(http::Method::GET, uri, None)
    }
}

pub mod list_experiments_input {
    use crate::input::ListExperimentsInput;
    use crate::model::ExperimentStatus;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        project: Option<String>,
        max_results: Option<i32>,
        next_token: Option<String>,
        status: Option<ExperimentStatus>,
    }

    impl Builder {
        pub fn project(mut self, project: impl Into<String>) -> Self {
            self.project = Some(project.into());
            self
        }

        pub fn set_project(mut self, project: Option<String>) -> Self {
            self.project = project;
            self
        }

        pub fn max_results(mut self, max_results: i32) -> Self {
            self.max_results = Some(max_results);
            self
        }

        pub fn set_max_results(mut self, max_results: Option<i32>) -> Self {
            self.max_results = max_results;
            self
        }

        pub fn next_token(mut self, next_token: impl Into<String>) -> Self {
            self.next_token = Some(next_token.into());
            self
        }

        pub fn set_next_token(mut self, next_token: Option<String>) -> Self {
            self.next_token = next_token;
            self
        }

        pub fn status(mut self, status: ExperimentStatus) -> Self {
            self.status = Some(status);
            self
        }

        pub fn set_status(mut self, status: Option<ExperimentStatus>) -> Self {
            self.status = status;
            self
        }

        pub fn build(self) -> ListExperimentsInput {
            ListExperimentsInput {
                project: self.project,
                max_results: self.max_results,
                next_token: self.next_token,
                status: self.status,
            }
        }
    }
}

/// Input for [`StartExperiment`](crate::Client::start_experiment)
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StartExperimentInput {
    pub project: Option<String>,
    pub experiment: Option<String>,
    pub analysis_complete_time: Option<Instant>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartExperimentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis_complete_time: Option<f64>,
}

impl StartExperimentInput {
    pub fn builder() -> start_experiment_input::Builder {
        start_experiment_input::Builder::default()
    }
}

impl OperationInput for StartExperimentInput {
    const NAME: &'static str = "StartExperiment";
    type Output = crate::output::StartExperimentOutput;
    type Error = crate::error::Error;
    type Handler = operation::StartExperiment;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        let project = required_label(&self.project, "Project")?;
        let experiment = required_label(&self.experiment, "Experiment")?;
        let body = StartExperimentBody {
            analysis_complete_time: self
                .analysis_complete_time
                .map(|time| time.epoch_fractional_seconds()),
        };
        build_request(
            http::Method::POST,
            format!("/projects/{}/experiments/{}/start", project, experiment),
            Some(json_body(&body)?),
        )
    }
}

pub mod start_experiment_input {
    use crate::input::StartExperimentInput;
    use smithy_types::Instant;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        project: Option<String>,
        experiment: Option<String>,
        analysis_complete_time: Option<Instant>,
    }

    impl Builder {
        pub fn project(mut self, project: impl Into<String>) -> Self {
            self.project = Some(project.into());
            self
        }

        pub fn set_project(mut self, project: Option<String>) -> Self {
            self.project = project;
            self
        }

        pub fn experiment(mut self, experiment: impl Into<String>) -> Self {
            self.experiment = Some(experiment.into());
            self
        }

        pub fn set_experiment(mut self, experiment: Option<String>) -> Self {
            self.experiment = experiment;
            self
        }

        pub fn analysis_complete_time(mut self, time: Instant) -> Self {
            self.analysis_complete_time = Some(time);
            self
        }

        pub fn set_analysis_complete_time(mut self, time: Option<Instant>) -> Self {
            self.analysis_complete_time = time;
            self
        }

        pub fn build(self) -> StartExperimentInput {
            StartExperimentInput {
                project: self.project,
                experiment: self.experiment,
                analysis_complete_time: self.analysis_complete_time,
            }
        }
    }
}

/// Input for [`StopExperiment`](crate::Client::stop_experiment)
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopExperimentInput {
    pub project: Option<String>,
    pub experiment: Option<String>,
    pub desired_state: Option<ExperimentStopDesiredState>,
    pub reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StopExperimentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    desired_state: Option<&'a ExperimentStopDesiredState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl StopExperimentInput {
    pub fn builder() -> stop_experiment_input::Builder {
        stop_experiment_input::Builder::default()
    }
}

impl OperationInput for StopExperimentInput {
    const NAME: &'static str = "StopExperiment";
    type Output = crate::output::StopExperimentOutput;
    type Error = crate::error::Error;
    type Handler = operation::StopExperiment;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        let project = required_label(&self.project, "Project")?;
        let experiment = required_label(&self.experiment, "Experiment")?;
        let body = StopExperimentBody {
            desired_state: self.desired_state.as_ref(),
            reason: self.reason.as_deref(),
        };
        build_request(
            http::Method::POST,
            format!("/projects/{}/experiments/{}/cancel", project, experiment),
            Some(json_body(&body)?),
        )
    }
}

pub mod stop_experiment_input {
    use crate::input::StopExperimentInput;
    use crate::model::ExperimentStopDesiredState;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        project: Option<String>,
        experiment: Option<String>,
        desired_state: Option<ExperimentStopDesiredState>,
        reason: Option<String>,
    }

    impl Builder {
        pub fn project(mut self, project: impl Into<String>) -> Self {
            self.project = Some(project.into());
            self
        }

        pub fn set_project(mut self, project: Option<String>) -> Self {
            self.project = project;
            self
        }

        pub fn experiment(mut self, experiment: impl Into<String>) -> Self {
            self.experiment = Some(experiment.into());
            self
        }

        pub fn set_experiment(mut self, experiment: Option<String>) -> Self {
            self.experiment = experiment;
            self
        }

        pub fn desired_state(mut self, desired_state: ExperimentStopDesiredState) -> Self {
            self.desired_state = Some(desired_state);
            self
        }

        pub fn set_desired_state(mut self, desired_state: Option<ExperimentStopDesiredState>) -> Self {
            self.desired_state = desired_state;
            self
        }

        pub fn reason(mut self, reason: impl Into<String>) -> Self {
            self.reason = Some(reason.into());
            self
        }

        pub fn set_reason(mut self, reason: Option<String>) -> Self {
            self.reason = reason;
            self
        }

        pub fn build(self) -> StopExperimentInput {
            StopExperimentInput {
                project: self.project,
                experiment: self.experiment,
                desired_state: self.desired_state,
                reason: self.reason,
            }
        }
    }
}

/// Input for [`EvaluateFeature`](crate::Client::evaluate_feature)
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvaluateFeatureInput {
    pub project: Option<String>,
    pub feature: Option<String>,
    pub entity_id: Option<String>,
    /// JSON document with additional attributes used for audience segments
    pub evaluation_context: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateFeatureBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation_context: Option<&'a str>,
}

impl EvaluateFeatureInput {
    pub fn builder() -> evaluate_feature_input::Builder {
        evaluate_feature_input::Builder::default()
    }
}

impl OperationInput for EvaluateFeatureInput {
    const NAME: &'static str = "EvaluateFeature";
    type Output = crate::output::EvaluateFeatureOutput;
    type Error = crate::error::Error;
    type Handler = operation::EvaluateFeature;

    fn build_request(&self) -> Result<http::Request<SdkBody>, BuildError> {
        let project = required_label(&self.project, "Project")?;
        let feature = required_label(&self.feature, "Feature")?;
        let body = EvaluateFeatureBody {
            entity_id: self.entity_id.as_deref(),
            evaluation_context: self.evaluation_context.as_deref(),
        };
        build_request(
            http::Method::POST,
            format!("/projects/{}/evaluations/{}", project, feature),
            Some(json_body(&body)?),
        )
    }

    fn endpoint_prefix(&self) -> Result<Option<EndpointPrefix>, BuildError> {
        EndpointPrefix::new("dataplane.").map(Some)
    }
}

pub mod evaluate_feature_input {
    use crate::input::EvaluateFeatureInput;

    #[non_exhaustive]
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Builder {
        project: Option<String>,
        feature: Option<String>,
        entity_id: Option<String>,
        evaluation_context: Option<String>,
    }

    impl Builder {
        pub fn project(mut self, project: impl Into<String>) -> Self {
            self.project = Some(project.into());
            self
        }

        pub fn set_project(mut self, project: Option<String>) -> Self {
            self.project = project;
            self
        }

        pub fn feature(mut self, feature: impl Into<String>) -> Self {
            self.feature = Some(feature.into());
            self
        }

        pub fn set_feature(mut self, feature: Option<String>) -> Self {
            self.feature = feature;
            self
        }

        pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
            self.entity_id = Some(entity_id.into());
            self
        }

        pub fn set_entity_id(mut self, entity_id: Option<String>) -> Self {
            self.entity_id = entity_id;
            self
        }

        pub fn evaluation_context(mut self, evaluation_context: impl Into<String>) -> Self {
            self.evaluation_context = Some(evaluation_context.into());
            self
        }

        pub fn set_evaluation_context(mut self, evaluation_context: Option<String>) -> Self {
            self.evaluation_context = evaluation_context;
            self
        }

        pub fn build(self) -> EvaluateFeatureInput {
            EvaluateFeatureInput {
                project: self.project,
                feature: self.feature,
                entity_id: self.entity_id,
                evaluation_context: self.evaluation_context,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::input::{
        CreateExperimentInput, DeleteExperimentInput, EvaluateFeatureInput, GetExperimentInput,
        ListExperimentsInput, StartExperimentInput, StopExperimentInput,
    };
    use crate::model::{ExperimentStatus, ExperimentStopDesiredState, TreatmentConfig};
    use aws_hyper::OperationInput;
    use protocol_test_helpers::{
        assert_ok, forbid_query_params, validate_body, validate_headers, validate_query_string,
        MediaType,
    };

    #[test]
    fn create_experiment_path_is_deterministic() {
        let input = CreateExperimentInput::builder()
            .project("p1")
            .name("e1")
            .treatments(TreatmentConfig::builder().name("control").feature("f1").variation("v1").build())
            .build();
        for _ in 0..2 {
            let request = input.build_request().expect("valid input");
            assert_eq!(request.method(), http::Method::POST);
            assert_eq!(request.uri().path(), "/projects/p1/experiments");
            assert_ok(validate_headers(
                &request,
                &[("content-type", "application/json")],
            ));
            assert_ok(validate_body(
                request.body().bytes().unwrap(),
                r#"{"name": "e1", "treatments": [{"name": "control", "feature": "f1", "variation": "v1"}]}"#,
                MediaType::Json,
            ));
        }
    }

    #[test]
    fn first_missing_label_wins() {
        let input = DeleteExperimentInput::builder().experiment("e1").build();
        let err = input.build_request().expect_err("project is missing");
        assert_eq!(err.to_string(), "Missing required field [Project]");

        let input = DeleteExperimentInput::default();
        let err = input.build_request().expect_err("both are missing");
        assert_eq!(err.to_string(), "Missing required field [Project]");

        let input = GetExperimentInput::builder().project("p1").build();
        let err = input.build_request().expect_err("experiment is missing");
        assert_eq!(err.to_string(), "Missing required field [Experiment]");
    }

    #[test]
    fn every_operation_names_its_missing_label() {
        fn missing<I: OperationInput>(input: I) -> String {
            input
                .build_request()
                .expect_err("a required label is unset")
                .to_string()
        }
        let project = "Missing required field [Project]";
        let experiment = "Missing required field [Experiment]";
        let feature = "Missing required field [Feature]";

        assert_eq!(
            missing(CreateExperimentInput::builder().name("e1").build()),
            project
        );
        assert_eq!(
            missing(ListExperimentsInput::builder().max_results(5).build()),
            project
        );
        assert_eq!(
            missing(StartExperimentInput::builder().project("p1").build()),
            experiment
        );
        assert_eq!(
            missing(
                StopExperimentInput::builder()
                    .project("p1")
                    .desired_state(ExperimentStopDesiredState::Completed)
                    .build()
            ),
            experiment
        );
        assert_eq!(
            missing(StartExperimentInput::builder().experiment("e1").build()),
            project
        );
        assert_eq!(
            missing(EvaluateFeatureInput::builder().project("p1").entity_id("u").build()),
            feature
        );
    }

    #[test]
    fn empty_labels_are_missing() {
        let input = GetExperimentInput::builder()
            .project("")
            .experiment("e1")
            .build();
        assert_eq!(
            input.build_request().unwrap_err().to_string(),
            "Missing required field [Project]"
        );
    }

    #[test]
    fn labels_are_percent_encoded() {
        let input = GetExperimentInput::builder()
            .project("my project")
            .experiment("a/b")
            .build();
        let request = input.build_request().unwrap();
        assert_eq!(
            request.uri().path(),
            "/projects/my%20project/experiments/a%2Fb"
        );
        assert!(request.headers().get("content-type").is_none());
    }

    #[test]
    fn list_experiments_query() {
        let input = ListExperimentsInput::builder()
            .project("p1")
            .max_results(10)
            .status(ExperimentStatus::Running)
            .build();
        let request = input.build_request().unwrap();
        assert_eq!(request.method(), http::Method::GET);
        assert_ok(validate_query_string(
            &request,
            &["maxResults=10", "status=RUNNING"],
        ));
        assert_ok(forbid_query_params(&request, &["nextToken"]));
    }

    #[test]
    fn stop_experiment_body() {
        let input = StopExperimentInput::builder()
            .project("p1")
            .experiment("e1")
            .desired_state(ExperimentStopDesiredState::Cancelled)
            .build();
        let request = input.build_request().unwrap();
        assert_eq!(request.uri().path(), "/projects/p1/experiments/e1/cancel");
        assert_ok(validate_body(
            request.body().bytes().unwrap(),
            r#"{"desiredState": "CANCELLED"}"#,
            MediaType::Json,
        ));
    }

    #[test]
    fn evaluate_feature_uses_the_dataplane() {
        let input = EvaluateFeatureInput::builder()
            .project("proj")
            .feature("feat")
            .entity_id("user-1")
            .build();
        let request = input.build_request().unwrap();
        assert_eq!(request.uri().path(), "/projects/proj/evaluations/feat");
        let prefix = input.endpoint_prefix().unwrap().expect("host prefix");
        assert_eq!(prefix.as_str(), "dataplane.");

        let input = EvaluateFeatureInput::builder().feature("feat").build();
        assert_eq!(
            input.build_request().unwrap_err().to_string(),
            "Missing required field [Project]"
        );
    }
}
