//! Activation streams through the client facade

use super::{recording_client, recording_client_with};
use futures::StreamExt;
use std::time::Duration;
use tonic::{Code, Status};
use zbc_sdk::protocol::gateway_protocol::{self as proto, ActivateJobsRequest, ActivateJobsResponse};
use zbc_sdk::{ClientConfig, CloseReason, CommandKind, ZbcError};

fn single_job(key: i64) -> ActivateJobsResponse {
    ActivateJobsResponse {
        jobs: vec![proto::ActivatedJob {
            key,
            r#type: "payment".to_string(),
            worker: "default".to_string(),
            retries: 3,
            payload: "{}".to_string(),
            ..Default::default()
        }],
    }
}

#[tokio::test]
async fn three_jobs_then_clean_close() {
    let (client, transport) = recording_client();
    transport.stream_responses(vec![single_job(1), single_job(2), single_job(3)]);

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await
        .unwrap();

    let mut keys = Vec::new();
    let mut terminal = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(job) => keys.push(job.key),
            Err(err) => terminal = Some(err),
        }
    }

    assert_eq!(keys, vec![1, 2, 3]);
    assert!(matches!(
        terminal,
        Some(ZbcError::StreamClosed(CloseReason::Completed))
    ));

    let request: ActivateJobsRequest = transport.last_request(CommandKind::ActivateJobs).unwrap();
    assert_eq!(request.r#type, "payment");
    assert_eq!(request.worker, "default");
    assert_eq!(request.timeout, 300_000);
    assert_eq!(request.amount, 5);
}

#[tokio::test(start_paused = true)]
async fn silent_stream_closes_with_inactivity_timeout() {
    let (client, transport) = recording_client();
    let _feeder = transport.stream_channel();

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(1)
        .send()
        .await
        .unwrap();

    let started = tokio::time::Instant::now();
    let err = stream.next_job().await.unwrap_err();

    assert!(matches!(
        err,
        ZbcError::StreamClosed(CloseReason::InactivityTimeout(_))
    ));
    assert!(started.elapsed() >= Duration::from_secs(15));
    assert_eq!(
        stream.close_reason(),
        Some(CloseReason::InactivityTimeout(Duration::from_secs(15)))
    );
}

#[tokio::test(start_paused = true)]
async fn steady_activity_keeps_stream_open() {
    let (client, transport) = recording_client_with(
        ClientConfig::default().with_stream_timeout(Duration::from_secs(5)),
    );
    let feeder = transport.stream_channel();

    let producer = tokio::spawn(async move {
        for key in 1..=6 {
            tokio::time::sleep(Duration::from_secs(4)).await;
            feeder.send(single_job(key)).await;
        }
    });

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(10)
        .send()
        .await
        .unwrap();

    for expected in 1..=6 {
        assert_eq!(stream.next_job().await.unwrap().key, expected);
    }
    producer.await.unwrap();

    let err = stream.next_job().await.unwrap_err();
    assert!(matches!(err, ZbcError::StreamClosed(CloseReason::Completed)));
}

#[tokio::test]
async fn broken_stream_delivers_received_jobs_first() {
    let (client, transport) = recording_client();
    transport.stream_then_fail(
        vec![single_job(1), single_job(2)],
        Status::unavailable("broker went away"),
    );

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await
        .unwrap();

    assert_eq!(stream.next_job().await.unwrap().key, 1);
    assert_eq!(stream.next_job().await.unwrap().key, 2);
    let err = stream.next_job().await.unwrap_err();
    assert!(matches!(
        err,
        ZbcError::Transport {
            code: Code::Unavailable,
            ..
        }
    ));
    assert_eq!(stream.close_reason(), None);
    assert_eq!(transport.call_count(CommandKind::ActivateJobs), 1);
}

#[tokio::test]
async fn broken_stream_keeps_reporting_its_failure() {
    let (client, transport) = recording_client();
    transport.stream_then_fail(vec![single_job(1)], Status::unavailable("broker went away"));

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await
        .unwrap();

    assert_eq!(stream.next_job().await.unwrap().key, 1);
    for _ in 0..2 {
        let err = stream.next_job().await.unwrap_err();
        assert!(matches!(
            err,
            ZbcError::Transport {
                code: Code::Unavailable,
                ..
            }
        ));
    }
}

#[tokio::test(start_paused = true)]
async fn timed_out_stream_keeps_reporting_the_timeout() {
    let (client, transport) = recording_client();
    let _feeder = transport.stream_channel();

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(1)
        .send()
        .await
        .unwrap();

    for _ in 0..2 {
        let err = stream.next_job().await.unwrap_err();
        assert!(matches!(
            err,
            ZbcError::StreamClosed(CloseReason::InactivityTimeout(_))
        ));
    }
}

#[tokio::test]
async fn stream_outlives_dropped_client() {
    let (client, transport) = recording_client();
    transport.stream_responses(vec![single_job(1), single_job(2), single_job(3)]);

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await
        .unwrap();
    drop(client);

    for expected in 1..=3 {
        assert_eq!(stream.next_job().await.unwrap().key, expected);
    }
    let err = stream.next_job().await.unwrap_err();
    assert!(matches!(err, ZbcError::StreamClosed(CloseReason::Completed)));
    assert!(!transport.is_closed());
}

#[tokio::test]
async fn closed_client_keeps_reporting_closed() {
    let (client, transport) = recording_client();
    let _feeder = transport.stream_channel();

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await
        .unwrap();

    client.close().await;

    assert!(matches!(stream.next_job().await, Err(ZbcError::Closed)));
    assert!(matches!(stream.next_job().await, Err(ZbcError::Closed)));
    assert_eq!(stream.close_reason(), None);
}

#[tokio::test]
async fn stream_open_failure_is_not_retried() {
    let (client, transport) = recording_client();
    transport.fail_stream(Status::unavailable("gateway down"));

    let result = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await;

    assert!(matches!(result, Err(ZbcError::Transport { .. })));
    assert_eq!(transport.call_count(CommandKind::ActivateJobs), 1);
}

#[tokio::test]
async fn client_close_ends_open_stream() {
    let (client, transport) = recording_client();
    let feeder = transport.stream_channel();

    let mut stream = client
        .new_activate_jobs_command()
        .job_type("payment")
        .max_jobs_to_activate(5)
        .send()
        .await
        .unwrap();

    feeder.send(single_job(1)).await;
    assert_eq!(stream.next_job().await.unwrap().key, 1);

    client.close().await;

    let err = stream.next_job().await.unwrap_err();
    assert!(matches!(err, ZbcError::Closed));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn per_command_worker_and_timeout_override_defaults() {
    let (client, transport) = recording_client_with(
        ClientConfig::default().with_default_worker_name("zbctl"),
    );

    let _stream = client
        .new_activate_jobs_command()
        .job_type("shipping")
        .max_jobs_to_activate(2)
        .worker_name("warehouse-7")
        .timeout(Duration::from_secs(90))
        .send()
        .await
        .unwrap();

    let request: ActivateJobsRequest = transport.last_request(CommandKind::ActivateJobs).unwrap();
    assert_eq!(request.worker, "warehouse-7");
    assert_eq!(request.timeout, 90_000);
}
