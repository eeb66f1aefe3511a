//! End-to-end pipeline tests against [`MockExecutor`]: validation, argument
//! order, dry-run, failure rendering and structured-output formatting.


use std::sync::Arc;

use serde_json::json;
use teleport::pipeline::{build_command, invoke};
use teleport::{
    register_teleport_tools, ExecutionMode, MockExecutor, Operation, ParameterSet, ServerConfig,
    ServerContext, ToolRegistry, ToolSourceError,
};

fn live() -> ServerConfig {
    ServerConfig::default()
}

fn dry() -> ServerConfig {
    ServerConfig {
        dry_run: true,
        ..Default::default()
    }
}

/// **Scenario**: proxy and debug parameters become `--proxy=...` and `--debug`.
#[tokio::test]
async fn common_flags_reach_the_command_line() {
    let exec = MockExecutor::with_output("ok");
    let raw = json!({"proxy": "teleport.example.com", "debug": true});
    let response = invoke(Operation::Status, Some(&raw), &live(), &exec).await;
    assert!(!response.is_error);

    let spec = exec.last_command().unwrap();
    assert_eq!(spec.subcommand, vec!["status"]);
    assert!(spec.args.contains(&"--proxy=teleport.example.com".to_string()));
    assert!(spec.args.contains(&"--debug".to_string()));

    let raw = json!({"proxy": "teleport.example.com", "debug": false});
    invoke(Operation::Status, Some(&raw), &live(), &exec).await;
    let spec = exec.last_command().unwrap();
    assert!(!spec.args.iter().any(|a| a.contains("debug")));
}

/// **Scenario**: ssh puts destination then command last, after every flag.
#[tokio::test]
async fn ssh_destination_and_command_come_last() {
    let exec = MockExecutor::with_output("web-1\n");
    let raw = json!({
        "destination": "root@host",
        "command": "hostname",
        "port": 2222,
        "forwardAgent": true,
        "tty": false,
        "localForward": "8080:localhost:80",
        "proxyParam": "proxy.example.com"
    });
    let response = invoke(Operation::Ssh, Some(&raw), &live(), &exec).await;
    assert_eq!(response.content, vec!["web-1\n"]);

    let spec = exec.last_command().unwrap();
    assert_eq!(
        spec.args,
        vec![
            "--proxy=proxy.example.com",
            "-L",
            "8080:localhost:80",
            "-T",
            "--port=2222",
            "--forward-agent",
            "root@host",
            "hostname"
        ]
    );
}

/// **Scenario**: ssh without a command is rejected before anything runs.
#[tokio::test]
async fn ssh_without_command_is_rejected() {
    let exec = MockExecutor::with_output("unused");
    for raw in [
        json!({"destination": "root@host"}),
        json!({"destination": "root@host", "command": ""}),
        json!({"destination": "root@host", "command": 42, "tty": true}),
    ] {
        let response = invoke(Operation::Ssh, Some(&raw), &dry(), &exec).await;
        assert!(response.is_error);
        assert!(response.content[0].starts_with("Error: Command is required."));
        assert!(response.content[0].contains("Interactive shell sessions are not supported"));
    }
    assert_eq!(exec.call_count(), 0);
}

/// **Scenario**: missing destination wins over missing command.
#[tokio::test]
async fn ssh_without_destination_reports_destination() {
    let exec = MockExecutor::with_output("unused");
    let response = invoke(Operation::Ssh, None, &live(), &exec).await;
    assert_eq!(response.content, vec!["Error: Destination host is required"]);
    assert_eq!(exec.call_count(), 0);
}

/// **Scenario**: kube login with both or neither target never builds a command.
#[tokio::test]
async fn kube_login_target_rules() {
    let exec = MockExecutor::with_output("unused");

    let both = json!({"kubeCluster": "prod", "all": true});
    let response = invoke(Operation::KubeLogin, Some(&both), &live(), &exec).await;
    assert!(response.is_error);
    assert!(response.content[0].contains("mutually exclusive"));

    let neither = json!({"asUser": "admin"});
    let response = invoke(Operation::KubeLogin, Some(&neither), &live(), &exec).await;
    assert!(response.is_error);
    assert!(response.content[0].starts_with("Error: Either 'kubeCluster' must be specified"));

    assert_eq!(exec.call_count(), 0);
}

/// **Scenario**: kube login by name builds `kube login ... <cluster>` and banners the result.
#[tokio::test]
async fn kube_login_by_name() {
    let exec = MockExecutor::with_output("Logged into kubernetes cluster \"prod\".\n");
    let raw = json!({"kubeCluster": "prod", "asUser": "admin", "kubeNamespace": "ops"});
    let response = invoke(Operation::KubeLogin, Some(&raw), &live(), &exec).await;
    assert!(!response.is_error);
    assert!(response.content[0].starts_with("Successfully logged in to Kubernetes cluster: prod\n"));

    let spec = exec.last_command().unwrap();
    assert_eq!(spec.subcommand, vec!["kube", "login"]);
    assert_eq!(spec.args, vec!["--as", "admin", "--kube-namespace", "ops", "prod"]);
}

/// **Scenario**: scp puts source before destination, both last.
#[tokio::test]
async fn scp_endpoints_are_ordered() {
    let exec = MockExecutor::with_output("");
    let raw = json!({
        "destination": "root@host:/tmp/",
        "source": "./build.tar",
        "recursive": true,
        "port": 2022
    });
    let response = invoke(Operation::Scp, Some(&raw), &live(), &exec).await;
    assert_eq!(response.content, vec!["File transfer completed successfully\n"]);
    assert_eq!(
        exec.last_command().unwrap().args,
        vec!["-r", "-P", "2022", "./build.tar", "root@host:/tmp/"]
    );
}

/// **Scenario**: scp names the first missing endpoint.
#[tokio::test]
async fn scp_requires_both_endpoints() {
    let exec = MockExecutor::with_output("");
    let response = invoke(Operation::Scp, Some(&json!({"destination": "x"})), &live(), &exec).await;
    assert_eq!(response.content, vec!["Error: Source path is required"]);
    let response = invoke(Operation::Scp, Some(&json!({"source": "x"})), &live(), &exec).await;
    assert_eq!(response.content, vec!["Error: Destination path is required"]);
}

/// **Scenario**: empty node listing renders the fixed "nothing found" message.
#[tokio::test]
async fn empty_node_listing() {
    let exec = MockExecutor::with_output("[]");
    let response = invoke(Operation::ListSshNodes, None, &live(), &exec).await;
    assert!(!response.is_error);
    assert_eq!(response.content, vec!["No SSH nodes found"]);
    assert_eq!(
        exec.last_command().unwrap().args,
        vec!["--format", "json"]
    );
}

/// **Scenario**: two kube clusters, one selected, non-verbose: counts only.
#[tokio::test]
async fn kube_listing_non_verbose() {
    let output = json!([
        {"kube_cluster_name": "prod", "labels": {"env": "production", "tier": "gold"}, "selected": true},
        {"kube_cluster_name": "dev", "labels": {"env": "development"}, "selected": false}
    ])
    .to_string();
    let exec = MockExecutor::with_output(output);
    let raw = json!({"verbose": false});
    let response = invoke(Operation::KubeListClusters, Some(&raw), &live(), &exec).await;
    let text = &response.content[0];

    assert!(text.contains("• dev\n"));
    assert!(text.contains("• prod (selected)\n"));
    assert!(text.find("• dev").unwrap() < text.find("• prod").unwrap());
    assert!(text.contains("Labels: 2 available (use verbose=true to see details)"));
    assert!(text.contains("Tip: Use verbose=true"));
    assert!(!text.contains("production"));
    assert!(!text.contains("gold"));
}

/// **Scenario**: unparsable listing output falls back to raw text as a success.
#[tokio::test]
async fn unparsable_listing_falls_back_to_raw() {
    let exec = MockExecutor::with_output("WARNING: legacy output\nnode-1\n");
    let response = invoke(Operation::ListSshNodes, None, &live(), &exec).await;
    assert!(!response.is_error);
    assert_eq!(response.content, vec!["WARNING: legacy output\nnode-1\n"]);
}

/// **Scenario**: failed commands render `Error: <message>\n<output>`.
#[tokio::test]
async fn failure_is_an_error_response() {
    let exec = MockExecutor::with_failure("exit status 1", "ERROR: not logged in\n", 1);
    let raw = json!({"host": "web-1"});
    let response = invoke(Operation::Resolve, Some(&raw), &live(), &exec).await;
    assert!(response.is_error);
    assert_eq!(response.content, vec!["Error: exit status 1\nERROR: not logged in\n"]);
}

/// **Scenario**: dry-run succeeds for every operation with valid parameters.
#[tokio::test]
async fn dry_run_succeeds_for_every_operation() {
    let exec = MockExecutor::with_failure("should not run", "", 1);
    let raw = json!({
        "destination": "root@host",
        "command": "uptime",
        "source": "a.txt",
        "host": "web-1",
        "kubeCluster": "prod"
    });
    for op in Operation::ALL {
        let response = invoke(op, Some(&raw), &dry(), &exec).await;
        assert!(!response.is_error, "{op}: {:?}", response);
    }
    assert!(exec
        .calls()
        .iter()
        .all(|(_, mode)| *mode == ExecutionMode::DryRun));
}

/// **Scenario**: dry-run output of a raw-output operation is the exact description.
#[tokio::test]
async fn dry_run_description_is_returned_verbatim() {
    let exec = MockExecutor::with_output("unused");
    let raw = json!({"loginParam": "root", "insecure": true});
    let response = invoke(Operation::Login, Some(&raw), &dry(), &exec).await;
    assert_eq!(
        response.content,
        vec!["DRY RUN: Would execute: tsh login -l root --insecure"]
    );
}

/// **Scenario**: the same pairs in a different order build the same command.
#[test]
fn building_is_order_independent() {
    let a = ParameterSet::from_json(Some(&json!({
        "search": "web", "cluster": "leaf", "proxy": "p", "verbose": true
    })));
    let b = ParameterSet::from_json(Some(&json!({
        "verbose": true, "proxy": "p", "cluster": "leaf", "search": "web"
    })));
    assert_eq!(
        build_command(Operation::ListSshNodes, &a),
        build_command(Operation::ListSshNodes, &b)
    );
}

/// **Scenario**: registered tools follow runtime dry-run toggles per call.
#[tokio::test]
async fn registry_uses_current_server_flags() {
    let context = Arc::new(ServerContext::new(ServerConfig::default()));
    let exec = Arc::new(MockExecutor::with_output("Cluster Name\nroot\n"));
    let mut registry = ToolRegistry::new();
    register_teleport_tools(&mut registry, context.clone(), exec.clone());
    assert_eq!(registry.len(), Operation::ALL.len());

    let out = registry.call("teleport_list_clusters", json!({})).await.unwrap();
    assert_eq!(out.text(), "Cluster Name\nroot\n");

    context.set_dry_run(true);
    let out = registry.call("teleport_list_clusters", json!(null)).await.unwrap();
    assert_eq!(out.text(), "DRY RUN: Would execute: tsh clusters");

    let modes: Vec<_> = exec.calls().into_iter().map(|(_, mode)| mode).collect();
    assert_eq!(modes, vec![ExecutionMode::Live, ExecutionMode::DryRun]);
}

/// **Scenario**: unknown tool names surface as NotFound, not as a tool error.
#[tokio::test]
async fn registry_unknown_tool() {
    let registry = ToolRegistry::new();
    let err = registry.call("teleport_db_login", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolSourceError::NotFound(name) if name == "teleport_db_login"));
}

/// **Scenario**: listed specs are sorted and carry an object schema.
#[test]
fn registry_lists_sorted_specs() {
    let context = Arc::new(ServerContext::default());
    let mut registry = ToolRegistry::new();
    register_teleport_tools(&mut registry, context, Arc::new(MockExecutor::with_output("")));
    let names: Vec<_> = registry.list().into_iter().map(|s| s.name).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"teleport_kube_login".to_string()));
}
