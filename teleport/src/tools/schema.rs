//! Declarative parameter tables and the JSON Schema built from them.
//!
//! The schema is advisory for callers; the pipeline validates on its own.

use serde_json::{json, Map, Value};

use crate::operation::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Boolean,
    Number,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
}

const fn string(name: &'static str, description: &'static str) -> ParamDecl {
    ParamDecl {
        name,
        kind: ParamKind::String,
        description,
        required: false,
    }
}

const fn boolean(name: &'static str, description: &'static str) -> ParamDecl {
    ParamDecl {
        name,
        kind: ParamKind::Boolean,
        description,
        required: false,
    }
}

const fn number(name: &'static str, description: &'static str) -> ParamDecl {
    ParamDecl {
        name,
        kind: ParamKind::Number,
        description,
        required: false,
    }
}

const fn required(decl: ParamDecl) -> ParamDecl {
    ParamDecl {
        required: true,
        ..decl
    }
}

/// Shared by every tool. Each name is also accepted with a `Param` suffix.
pub const COMMON_PARAMS: &[ParamDecl] = &[
    string("login", "Remote host login"),
    string("proxy", "Teleport proxy address"),
    string("user", "Teleport user, defaults to current local user"),
    string("ttl", "Minutes to live for a session"),
    string("identity", "Identity file"),
    boolean(
        "insecure",
        "Do not verify server's certificate and host name. Use only in test environments",
    ),
    boolean("debug", "Verbose logging to stdout"),
];

const LIST_SSH_NODES_PARAMS: &[ParamDecl] = &[
    string("search", "List of comma separated search keywords or phrases"),
    string("query", "Query by predicate language enclosed in single quotes"),
    boolean("verbose", "One-line output (for text format), including node UUIDs"),
    boolean("all", "List nodes from all clusters and proxies"),
    string("cluster", "Specify the Teleport cluster to connect"),
    string("labels", "List of comma separated labels to filter by labels (e.g. key1=value1,key2=value2)"),
];

const SSH_PARAMS: &[ParamDecl] = &[
    required(string("destination", "Remote host to connect to ([user@]host)")),
    required(string("command", "Command to execute on the remote host")),
    string("localForward", "Forward localhost connections to remote server (-L)"),
    string("remoteForward", "Forward remote connections to localhost (-R)"),
    string("dynamicForward", "Forward localhost connections via SOCKS5 (-D)"),
    string("openSSHOptions", "OpenSSH options in the format used in the configuration file (-o)"),
    string("localCommand", "Command to execute on the local machine after connecting"),
    boolean("noRemoteExec", "Don't execute remote command, useful for port forwarding (-N)"),
    string("cluster", "Specify the Teleport cluster to connect"),
    string("logDir", "Directory to log separated command output"),
    boolean("tty", "Allocate TTY (true: -t, false: -T)"),
    number("port", "SSH port on the remote host"),
    boolean("verbose", "Verbose output"),
    boolean("forwardAgent", "Forward SSH agent to the remote host"),
];

const SCP_PARAMS: &[ParamDecl] = &[
    required(string("source", "Source path ([user@]host:path for remote)")),
    required(string("destination", "Destination path ([user@]host:path for remote)")),
    boolean("recursive", "Recursive copy of subdirectories"),
    boolean("preserveAttributes", "Preserve access and modification times"),
    boolean("quiet", "Quiet mode"),
    number("port", "Port to connect to on the remote host"),
    string("cluster", "Specify the Teleport cluster to connect"),
];

const RESOLVE_PARAMS: &[ParamDecl] = &[
    required(string("host", "Host name to resolve")),
    boolean("quiet", "Quiet mode"),
];

const KUBE_LIST_PARAMS: &[ParamDecl] = &[
    string("search", "List of comma separated search keywords or phrases"),
    string("query", "Query by predicate language enclosed in single quotes"),
    boolean("verbose", "Show an untruncated list of labels"),
    boolean("all", "List Kubernetes clusters from all Teleport clusters"),
    string("cluster", "Specify the Teleport cluster to connect"),
    boolean("quiet", "Quiet mode"),
    string("labels", "List of comma separated labels to filter by labels (e.g. key1=value1,key2=value2)"),
];

const KUBE_LOGIN_PARAMS: &[ParamDecl] = &[
    string("kubeCluster", "Name of the Kubernetes cluster to log in to"),
    boolean("all", "Generate a kubeconfig with every Kubernetes cluster the user has access to"),
    string("cluster", "Specify the Teleport cluster to connect"),
    string("labels", "List of comma separated labels to filter by labels"),
    string("query", "Query by predicate language enclosed in single quotes"),
    string("asUser", "Configure custom Kubernetes user impersonation"),
    string("asGroups", "Configure custom Kubernetes group impersonation"),
    string("kubeNamespace", "Configure the default Kubernetes namespace"),
    string("contextName", "Custom context name template for kubeconfig"),
    string("requestReason", "Reason for requesting access"),
    boolean("disableAccessRequest", "Disable automatic resource access requests"),
];

/// Operation-specific parameters, in declaration order.
pub fn operation_params(op: Operation) -> &'static [ParamDecl] {
    match op {
        Operation::Login | Operation::Status | Operation::ListClusters => &[],
        Operation::ListSshNodes => LIST_SSH_NODES_PARAMS,
        Operation::Ssh => SSH_PARAMS,
        Operation::Scp => SCP_PARAMS,
        Operation::Resolve => RESOLVE_PARAMS,
        Operation::KubeListClusters => KUBE_LIST_PARAMS,
        Operation::KubeLogin => KUBE_LOGIN_PARAMS,
    }
}

/// JSON Schema object for `op`'s arguments.
pub fn input_schema(op: Operation) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for decl in COMMON_PARAMS.iter().chain(operation_params(op)) {
        properties.insert(
            decl.name.to_string(),
            json!({"type": decl.kind.json_type(), "description": decl.description}),
        );
        if decl.required {
            required.push(decl.name);
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
