//! Unit tests for `AzureCli`: exact `az` argument vectors and failure mapping.

use std::path::Path;

use jhub_cli::application::ports::{AccountManager, ResourceGroupManager, VmManager};
use jhub_cli::domain::{DiskRequest, ExtensionRequest, ProvisionError, VmRequest};
use jhub_cli::infra::azure::AzureCli;

use crate::helpers::{MockCommandRunner, SP_JSON, VM_JSON, err_output, ok_output};

fn azure(runner: &MockCommandRunner) -> AzureCli<MockCommandRunner> {
    AzureCli::new(runner.clone())
}

#[tokio::test]
async fn test_set_subscription_args() {
    let runner = MockCommandRunner::new();
    azure(&runner)
        .set_subscription("sub-123")
        .await
        .expect("account set");

    let calls = runner.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "az");
    assert_eq!(calls[0].1, vec!["account", "set", "-s", "sub-123"]);
}

#[tokio::test]
async fn test_create_service_principal_returns_raw_stdout() {
    let runner = MockCommandRunner::new().then(ok_output(SP_JSON.as_bytes()));
    let raw = azure(&runner)
        .create_service_principal("sub-123", "Contributor")
        .await
        .expect("create-for-rbac");

    assert_eq!(raw, SP_JSON);
    assert_eq!(
        runner.single_args(),
        vec![
            "ad",
            "sp",
            "create-for-rbac",
            "--scopes=/subscriptions/sub-123",
            "--role=Contributor",
        ]
    );
}

#[tokio::test]
async fn test_list_groups_queries_by_name_and_parses_output() {
    let runner = MockCommandRunner::new().then(ok_output(
        br#"[{"id":"/subscriptions/s/resourceGroups/foo","location":"centralus","name":"foo"}]"#,
    ));
    let groups = azure(&runner).list_groups("foo").await.expect("group list");

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "foo");
    assert_eq!(groups[0].location.as_deref(), Some("centralus"));
    assert_eq!(
        runner.single_args(),
        vec!["group", "list", "--query", "[?name=='foo']"]
    );
}

#[tokio::test]
async fn test_list_groups_empty_array() {
    let runner = MockCommandRunner::new().then(ok_output(b"[]\n"));
    let groups = azure(&runner).list_groups("foo").await.expect("group list");
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_list_groups_rejects_non_json_output() {
    let runner = MockCommandRunner::new().then(ok_output(b"WARNING: not json"));
    let err = azure(&runner)
        .list_groups("foo")
        .await
        .expect_err("unparseable output");
    assert!(format!("{err:#}").contains("parsing az group list output"));
}

#[tokio::test]
async fn test_create_group_args() {
    let runner = MockCommandRunner::new();
    azure(&runner)
        .create_group("foo", "westus2")
        .await
        .expect("group create");
    assert_eq!(
        runner.single_args(),
        vec!["group", "create", "-n", "foo", "-l", "westus2"]
    );
}

#[tokio::test]
async fn test_create_vm_args_and_response() {
    let runner = MockCommandRunner::new().then(ok_output(VM_JSON.as_bytes()));
    let key = Path::new("foo/id_rsa.pub");
    let response = azure(&runner)
        .create_vm(&VmRequest {
            name: "hub",
            resource_group: "foo",
            admin_user: "jupyterhub",
            ssh_public_key: key,
            size: "Standard_E4s_v3",
            storage_sku: "Premium_LRS",
            image: "canonical:ubuntuserver:17.04:latest",
            dns_label: "foo",
        })
        .await
        .expect("vm create");

    assert_eq!(response, VM_JSON);
    assert_eq!(
        runner.single_args(),
        vec![
            "vm",
            "create",
            "-n",
            "hub",
            "--admin-username",
            "jupyterhub",
            "--resource-group",
            "foo",
            "--ssh-key-value",
            "foo/id_rsa.pub",
            "--size",
            "Standard_E4s_v3",
            "--storage-sku",
            "Premium_LRS",
            "--image",
            "canonical:ubuntuserver:17.04:latest",
            "--public-ip-address-dns-name",
            "foo",
        ]
    );
}

#[tokio::test]
async fn test_attach_disk_args() {
    let runner = MockCommandRunner::new();
    azure(&runner)
        .attach_disk(&DiskRequest {
            disk_name: "hub-3",
            resource_group: "foo",
            vm_name: "hub",
            size_gb: 512,
            sku: "Premium_LRS",
        })
        .await
        .expect("disk attach");

    assert_eq!(
        runner.single_args(),
        vec![
            "vm",
            "disk",
            "attach",
            "--new",
            "--disk",
            "hub-3",
            "--resource-group",
            "foo",
            "--vm-name",
            "hub",
            "--size-gb",
            "512",
            "--sku",
            "Premium_LRS",
        ]
    );
}

#[tokio::test]
async fn test_set_extension_args() {
    let runner = MockCommandRunner::new();
    azure(&runner)
        .set_extension(&ExtensionRequest {
            resource_group: "foo",
            vm_name: "hub",
            name: "customScript",
            publisher: "Microsoft.Azure.Extensions",
            settings: Path::new("./script-config.json"),
        })
        .await
        .expect("extension set");

    assert_eq!(
        runner.single_args(),
        vec![
            "vm",
            "extension",
            "set",
            "--resource-group",
            "foo",
            "--vm-name",
            "hub",
            "--name",
            "customScript",
            "--publisher",
            "Microsoft.Azure.Extensions",
            "--settings",
            "./script-config.json",
        ]
    );
}

#[tokio::test]
async fn test_non_zero_exit_becomes_command_failed_with_stderr() {
    let runner = MockCommandRunner::new().then(err_output(
        1,
        b"ERROR: The subscription 'nope' doesn't exist.\n",
    ));
    let err = azure(&runner)
        .set_subscription("nope")
        .await
        .expect_err("az fails");

    let Some(ProvisionError::CommandFailed {
        program,
        args,
        code,
        stderr,
    }) = err.downcast_ref::<ProvisionError>()
    else {
        panic!("expected CommandFailed, got {err:#}");
    };
    assert_eq!(program, "az");
    assert_eq!(args, "account set -s nope");
    assert_eq!(code, "exit code 1");
    assert_eq!(stderr, "ERROR: The subscription 'nope' doesn't exist.");
    assert!(format!("{err:#}").starts_with("az account set: "));
}

#[tokio::test]
async fn test_failed_vm_create_returns_no_response() {
    let runner = MockCommandRunner::new().then(err_output(3, b"quota exceeded"));
    let err = azure(&runner)
        .create_vm(&VmRequest {
            name: "hub",
            resource_group: "foo",
            admin_user: "jupyterhub",
            ssh_public_key: Path::new("foo/id_rsa.pub"),
            size: "Standard_E4s_v3",
            storage_sku: "Premium_LRS",
            image: "canonical:ubuntuserver:17.04:latest",
            dns_label: "foo",
        })
        .await
        .expect_err("vm create fails");

    let message = format!("{err:#}");
    assert!(message.contains("exit code 3"));
    assert!(message.contains("quota exceeded"));
}
