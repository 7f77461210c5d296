//! Unary commands through the client facade

use super::{recording_client, recording_client_with};
use std::time::Duration;
use tonic::{Code, Status};
use zbc_sdk::protocol::gateway_protocol::{
    CompleteJobRequest, CompleteJobResponse, CreateJobRequest, CreateWorkflowInstanceRequest,
    CreateWorkflowInstanceResponse,
};
use zbc_sdk::{ClientConfig, CommandKind, ZbcError};

#[tokio::test]
async fn create_instance_of_latest_version_with_default_payload() {
    let (client, transport) = recording_client();
    transport.respond_with(
        CommandKind::CreateInstance,
        CreateWorkflowInstanceResponse {
            workflow_key: 2251799813685249,
            bpmn_process_id: "order-process".to_string(),
            version: 4,
            partition_id: 1,
            workflow_instance_key: 2251799813685255,
        },
    );

    let instance = client
        .new_create_instance_command()
        .bpmn_process_id("order-process")
        .latest_version()
        .send()
        .await
        .unwrap();

    assert_eq!(instance.version, 4);
    assert_eq!(instance.workflow_instance_key, 2251799813685255);

    let request: CreateWorkflowInstanceRequest =
        transport.last_request(CommandKind::CreateInstance).unwrap();
    assert_eq!(request.bpmn_process_id, "order-process");
    assert_eq!(request.version, -1);
    assert_eq!(request.payload, "{}");
    assert_eq!(transport.call_count(CommandKind::CreateInstance), 1);
}

#[tokio::test]
async fn retryable_failures_below_the_limit_are_retried() {
    let (client, transport) = recording_client();
    transport.fail_times(CommandKind::CompleteJob, Status::unavailable("gateway restarting"), 3);

    client
        .new_complete_job_command()
        .job_key(2251799813685253)
        .send()
        .await
        .unwrap();

    assert_eq!(transport.call_count(CommandKind::CompleteJob), 4);
}

#[tokio::test]
async fn last_failure_surfaces_once_retries_are_exhausted() {
    let (client, transport) = recording_client();
    transport.fail_times(CommandKind::CompleteJob, Status::unavailable("gateway down"), 4);
    transport.respond_with(CommandKind::CompleteJob, CompleteJobResponse {});

    let err = client
        .new_complete_job_command()
        .job_key(2251799813685253)
        .send()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ZbcError::Transport {
            code: Code::Unavailable,
            retryable: true,
            ..
        }
    ));
    assert_eq!(transport.call_count(CommandKind::CompleteJob), 4);
}

#[tokio::test]
async fn configured_retry_count_is_applied() {
    let (client, transport) = recording_client_with(ClientConfig::default().with_retries(1));
    transport.fail_times(CommandKind::FailJob, Status::unavailable("gateway down"), 5);

    let err = client
        .new_fail_job_command()
        .job_key(1)
        .retries(2)
        .send()
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(transport.call_count(CommandKind::FailJob), 2);
}

#[tokio::test]
async fn server_rejection_is_surfaced_immediately() {
    let (client, transport) = recording_client();
    transport.fail_with(
        CommandKind::CreateInstance,
        Status::not_found("no workflow with BPMN process id 'unknown'"),
    );

    let err = client
        .new_create_instance_command()
        .bpmn_process_id("unknown")
        .latest_version()
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, ZbcError::ServerRejected { .. }));
    assert_eq!(err.class().exit_code(), 1);
    assert_eq!(transport.call_count(CommandKind::CreateInstance), 1);
}

#[tokio::test]
async fn unavailable_create_instance_is_sent_once() {
    let (client, transport) = recording_client();
    transport.fail_times(CommandKind::CreateInstance, Status::unavailable("gateway restarting"), 1);
    transport.respond_with(
        CommandKind::CreateInstance,
        CreateWorkflowInstanceResponse::default(),
    );

    let err = client
        .new_create_instance_command()
        .bpmn_process_id("order-process")
        .latest_version()
        .send()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ZbcError::Transport {
            code: Code::Unavailable,
            ..
        }
    ));
    assert_eq!(transport.call_count(CommandKind::CreateInstance), 1);
}

#[tokio::test]
async fn validation_error_never_reaches_the_transport() {
    let (client, transport) = recording_client();

    let err = client
        .new_create_job_command()
        .job_type("")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, ZbcError::Validation(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn request_timeout_is_retried_then_surfaced() {
    let (client, transport) = recording_client();
    for _ in 0..4 {
        transport.hang(CommandKind::UpdateJobRetries);
    }

    let err = client
        .new_update_job_retries_command()
        .job_key(1)
        .retries(5)
        .request_timeout(Duration::from_secs(1))
        .send()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ZbcError::Transport {
            code: Code::DeadlineExceeded,
            ..
        }
    ));
    assert_eq!(transport.call_count(CommandKind::UpdateJobRetries), 4);
    for request in transport.requests() {
        assert_eq!(request.timeout, Some(Duration::from_secs(1)));
    }
}

#[tokio::test]
async fn close_fails_dispatch_in_flight() {
    let (client, transport) = recording_client();
    transport.hang(CommandKind::CompleteJob);

    let in_flight = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .new_complete_job_command()
                .job_key(1)
                .send()
                .await
        })
    };
    tokio::task::yield_now().await;

    client.close().await;

    let err = in_flight.await.unwrap().unwrap_err();
    assert!(matches!(err, ZbcError::Closed));
    assert!(transport.call_count(CommandKind::CompleteJob) <= 1);
    assert!(transport.is_closed());
}

#[tokio::test]
async fn concurrent_commands_share_the_transport() {
    let (client, transport) = recording_client();

    let sends = (0..8).map(|i| {
        let client = client.clone();
        async move {
            client
                .new_create_job_command()
                .job_type(format!("job-{}", i))
                .send()
                .await
        }
    });
    let results = futures::future::join_all(sends).await;
    assert!(results.iter().all(|r| r.is_ok()));

    assert_eq!(transport.call_count(CommandKind::CreateJob), 8);
    let mut job_types: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.decode::<CreateJobRequest>().unwrap().job_type)
        .collect();
    job_types.sort();
    let expected: Vec<String> = (0..8).map(|i| format!("job-{}", i)).collect();
    assert_eq!(job_types, expected);
}

#[tokio::test]
async fn complete_job_payload_is_sent_unchanged() {
    let (client, transport) = recording_client();

    client
        .new_complete_job_command()
        .job_key(7)
        .payload_value(&serde_json::json!({"total": 99.5}))
        .send()
        .await
        .unwrap();

    let request: CompleteJobRequest = transport.last_request(CommandKind::CompleteJob).unwrap();
    assert_eq!(request.payload, r#"{"total":99.5}"#);
}
