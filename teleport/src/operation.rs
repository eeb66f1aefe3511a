//! The nine exposed operations and the rules that drive them.
//!
//! Everything operation-specific lives in the tables below. The pipeline
//! itself is the same for all of them.

use crate::args::ArgRule;
use crate::params::ValidationRule;
use crate::response::OutputKind;

pub const TOOL_LOGIN: &str = "teleport_login";
pub const TOOL_STATUS: &str = "teleport_status";
pub const TOOL_LIST_CLUSTERS: &str = "teleport_list_clusters";
pub const TOOL_LIST_SSH_NODES: &str = "teleport_list_ssh_nodes";
pub const TOOL_SSH: &str = "teleport_ssh";
pub const TOOL_SCP: &str = "teleport_scp";
pub const TOOL_RESOLVE: &str = "teleport_resolve";
pub const TOOL_KUBE_LIST_CLUSTERS: &str = "teleport_kube_list_clusters";
pub const TOOL_KUBE_LOGIN: &str = "teleport_kube_login";

/// One externally invocable capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Status,
    ListClusters,
    ListSshNodes,
    Ssh,
    Scp,
    Resolve,
    KubeListClusters,
    KubeLogin,
}

const JSON_FORMAT: ArgRule = ArgRule::Fixed(&["--format", "json"]);

const fn switch(param: &'static str, flag: &'static str) -> ArgRule {
    ArgRule::Switch { param, flag }
}

const fn value(param: &'static str, flag: &'static str) -> ArgRule {
    ArgRule::Value { param, flag }
}

const fn positional(param: &'static str) -> ArgRule {
    ArgRule::Positional { param }
}

const LIST_SSH_NODES_ARGS: &[ArgRule] = &[
    JSON_FORMAT,
    value("search", "--search"),
    value("query", "--query"),
    switch("verbose", "--verbose"),
    switch("all", "--all"),
    value("cluster", "--cluster"),
    positional("labels"),
];

const SSH_ARGS: &[ArgRule] = &[
    value("localForward", "-L"),
    value("remoteForward", "-R"),
    value("dynamicForward", "-D"),
    value("openSSHOptions", "-o"),
    value("localCommand", "--local"),
    switch("noRemoteExec", "-N"),
    value("cluster", "--cluster"),
    value("logDir", "--log-dir"),
    ArgRule::Toggle {
        param: "tty",
        on: "-t",
        off: "-T",
    },
    ArgRule::Integer {
        param: "port",
        flag: "--port",
        joined: true,
    },
    switch("verbose", "--verbose"),
    switch("forwardAgent", "--forward-agent"),
    positional("destination"),
    positional("command"),
];

const SCP_ARGS: &[ArgRule] = &[
    switch("recursive", "-r"),
    switch("preserveAttributes", "-p"),
    switch("quiet", "-q"),
    ArgRule::Integer {
        param: "port",
        flag: "-P",
        joined: false,
    },
    value("cluster", "--cluster"),
    positional("source"),
    positional("destination"),
];

const RESOLVE_ARGS: &[ArgRule] = &[JSON_FORMAT, switch("quiet", "--quiet"), positional("host")];

const KUBE_LIST_ARGS: &[ArgRule] = &[
    JSON_FORMAT,
    value("search", "--search"),
    value("query", "--query"),
    switch("verbose", "--verbose"),
    switch("all", "--all"),
    value("cluster", "--cluster"),
    switch("quiet", "--quiet"),
    positional("labels"),
];

const KUBE_LOGIN_ARGS: &[ArgRule] = &[
    value("cluster", "--cluster"),
    value("labels", "--labels"),
    value("query", "--query"),
    value("asUser", "--as"),
    value("asGroups", "--as-groups"),
    value("kubeNamespace", "--kube-namespace"),
    switch("all", "--all"),
    value("contextName", "--set-context-name"),
    value("requestReason", "--request-reason"),
    switch("disableAccessRequest", "--disable-access-request"),
    positional("kubeCluster"),
];

const SSH_RULES: &[ValidationRule] = &[
    ValidationRule::Required {
        param: "destination",
        label: "Destination host",
    },
    ValidationRule::OneShotCommand { param: "command" },
];

const SCP_RULES: &[ValidationRule] = &[
    ValidationRule::Required {
        param: "source",
        label: "Source path",
    },
    ValidationRule::Required {
        param: "destination",
        label: "Destination path",
    },
];

const RESOLVE_RULES: &[ValidationRule] = &[ValidationRule::Required {
    param: "host",
    label: "Host",
}];

const KUBE_LOGIN_RULES: &[ValidationRule] = &[ValidationRule::ClusterTarget {
    name: "kubeCluster",
    all: "all",
}];

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Login,
        Operation::Status,
        Operation::ListClusters,
        Operation::ListSshNodes,
        Operation::Ssh,
        Operation::Scp,
        Operation::Resolve,
        Operation::KubeListClusters,
        Operation::KubeLogin,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Login => TOOL_LOGIN,
            Self::Status => TOOL_STATUS,
            Self::ListClusters => TOOL_LIST_CLUSTERS,
            Self::ListSshNodes => TOOL_LIST_SSH_NODES,
            Self::Ssh => TOOL_SSH,
            Self::Scp => TOOL_SCP,
            Self::Resolve => TOOL_RESOLVE,
            Self::KubeListClusters => TOOL_KUBE_LIST_CLUSTERS,
            Self::KubeLogin => TOOL_KUBE_LOGIN,
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tool_name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Login => "Login to a Teleport cluster",
            Self::Status => "Display the list of proxy servers and retrieved certificates",
            Self::ListClusters => "List available Teleport clusters",
            Self::ListSshNodes => "List SSH nodes available through Teleport",
            Self::Ssh => {
                "Execute a one-shot command on a remote SSH node. Interactive shell sessions are \
                 not supported; a command is required."
            }
            Self::Scp => "Transfer files to and from remote SSH nodes",
            Self::Resolve => "Resolve a host name to a Teleport SSH node",
            Self::KubeListClusters => "List Kubernetes clusters available through Teleport",
            Self::KubeLogin => {
                "Log in to a Kubernetes cluster (or all accessible clusters) and update kubeconfig"
            }
        }
    }

    /// `tsh` subcommand; may be several words.
    pub fn subcommand(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Status => "status",
            Self::ListClusters => "clusters",
            Self::ListSshNodes => "ls",
            Self::Ssh => "ssh",
            Self::Scp => "scp",
            Self::Resolve => "resolve",
            Self::KubeListClusters => "kube ls",
            Self::KubeLogin => "kube login",
        }
    }

    pub fn validation_rules(self) -> &'static [ValidationRule] {
        match self {
            Self::Ssh => SSH_RULES,
            Self::Scp => SCP_RULES,
            Self::Resolve => RESOLVE_RULES,
            Self::KubeLogin => KUBE_LOGIN_RULES,
            Self::Login
            | Self::Status
            | Self::ListClusters
            | Self::ListSshNodes
            | Self::KubeListClusters => &[],
        }
    }

    /// Rules applied after the common flags.
    pub fn arg_rules(self) -> &'static [ArgRule] {
        match self {
            Self::ListSshNodes => LIST_SSH_NODES_ARGS,
            Self::Ssh => SSH_ARGS,
            Self::Scp => SCP_ARGS,
            Self::Resolve => RESOLVE_ARGS,
            Self::KubeListClusters => KUBE_LIST_ARGS,
            Self::KubeLogin => KUBE_LOGIN_ARGS,
            Self::Login | Self::Status | Self::ListClusters => &[],
        }
    }

    pub fn output(self) -> OutputKind {
        match self {
            Self::Login | Self::Status | Self::ListClusters | Self::Ssh => OutputKind::Raw,
            Self::ListSshNodes => OutputKind::SshNodes,
            Self::Scp => OutputKind::FileTransfer,
            Self::Resolve => OutputKind::Resolve,
            Self::KubeListClusters => OutputKind::KubeClusters,
            Self::KubeLogin => OutputKind::KubeLogin,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tool_name())
    }
}
