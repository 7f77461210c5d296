//! Property-based tests for command construction
//!
//! These tests use proptest to verify that builders are deterministic and
//! that send-time validation accepts exactly the legal field values

use super::recording_client;
use proptest::prelude::*;
use std::time::Duration;
use zbc_sdk::{Command, ZbcClient, ZbcError, LATEST_VERSION};

fn build_create_instance(
    client: &ZbcClient,
    process_id: &str,
    version: i32,
    payload: &str,
) -> Result<Command, ZbcError> {
    client
        .new_create_instance_command()
        .bpmn_process_id(process_id)
        .version(version)
        .payload(payload)
        .command()
}

fn build_publish(
    client: &ZbcClient,
    name: &str,
    correlation_key: &str,
    ttl_ms: u64,
) -> Result<Command, ZbcError> {
    client
        .new_publish_message_command()
        .message_name(name)
        .correlation_key(correlation_key)
        .time_to_live(Duration::from_millis(ttl_ms))
        .command()
}

proptest! {
    #[test]
    fn identical_chains_build_equal_commands(
        process_id in "[a-z][a-z-]{0,20}",
        version in -1i32..100,
        payload in "\\{\"[a-z]{1,8}\":[0-9]{1,5}\\}",
    ) {
        let (client, _) = recording_client();
        let first = build_create_instance(&client, &process_id, version, &payload).unwrap();
        let second = build_create_instance(&client, &process_id, version, &payload).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn publish_chains_are_deterministic(
        name in "[a-z]{1,12}",
        correlation_key in "[a-z0-9]{0,12}",
        ttl_ms in 0u64..3_600_000,
    ) {
        let (client, _) = recording_client();
        let first = build_publish(&client, &name, &correlation_key, ttl_ms).unwrap();
        let second = build_publish(&client, &name, &correlation_key, ttl_ms).unwrap();
        prop_assert_eq!(&first, &second);

        let Command::PublishMessage(request) = first else {
            panic!("expected a publish message command");
        };
        prop_assert_eq!(request.time_to_live, ttl_ms as i64);
    }

    #[test]
    fn version_is_valid_from_latest_upwards(version in any::<i32>()) {
        let (client, _) = recording_client();
        let result = build_create_instance(&client, "order-process", version, "{}");
        if version >= LATEST_VERSION {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(ZbcError::Validation(_))));
        }
    }

    #[test]
    fn job_keys_and_retries_are_validated(key in any::<i64>(), retries in any::<i32>()) {
        let (client, _) = recording_client();
        let result = client
            .new_fail_job_command()
            .job_key(key)
            .retries(retries)
            .command();
        if key > 0 && retries >= 0 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(ZbcError::Validation(_))));
        }
    }

    #[test]
    fn activation_amount_must_be_positive(amount in any::<i32>()) {
        let (client, _) = recording_client();
        let result = client
            .new_activate_jobs_command()
            .job_type("payment")
            .max_jobs_to_activate(amount)
            .command();
        prop_assert_eq!(result.is_ok(), amount > 0);
    }
}
