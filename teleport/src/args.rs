//! Argument building: typed parameters in, ordered `tsh` argv out.
//!
//! Two layers, always in this order:
//!
//! 1. the common flag table ([`COMMON_FLAGS`]), shared by every operation;
//! 2. the operation's own [`ArgRule`] list, applied in declaration order.
//!
//! Both layers walk a fixed table rather than the parameter map, so the output
//! never depends on how the caller ordered its JSON object. Parameters that no
//! table mentions are dropped.

use crate::params::{ParamValue, ParameterSet};

/// Suffix accepted on common parameter names (`proxyParam` == `proxy`).
pub const PARAM_SUFFIX: &str = "Param";

/// How a common parameter is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStyle {
    /// `--name=value`, `--name` for `true`, nothing for `false`.
    Long,
    /// Short option followed by its value as a separate token (`-l alice`).
    ShortPair(&'static str),
}

/// One row of the common flag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagMapping {
    pub param: &'static str,
    pub flag: &'static str,
    pub style: FlagStyle,
}

impl FlagMapping {
    const fn long(param: &'static str) -> Self {
        Self {
            param,
            flag: param,
            style: FlagStyle::Long,
        }
    }
}

/// Flags every operation accepts, in emission order.
pub const COMMON_FLAGS: &[FlagMapping] = &[
    FlagMapping {
        param: "login",
        flag: "login",
        style: FlagStyle::ShortPair("-l"),
    },
    FlagMapping::long("proxy"),
    FlagMapping::long("user"),
    FlagMapping::long("ttl"),
    FlagMapping::long("identity"),
    FlagMapping::long("insecure"),
    FlagMapping::long("debug"),
];

/// An operation-specific argument, applied after the common flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRule {
    /// Tokens always emitted (e.g. `--format json`).
    Fixed(&'static [&'static str]),
    /// Boolean parameter; emits `flag` only when `true`.
    Switch {
        param: &'static str,
        flag: &'static str,
    },
    /// Boolean parameter with a token for each value; nothing when absent.
    Toggle {
        param: &'static str,
        on: &'static str,
        off: &'static str,
    },
    /// Non-empty string parameter as `flag value` (two tokens).
    Value {
        param: &'static str,
        flag: &'static str,
    },
    /// Numeric parameter truncated to an integer. `joined` selects
    /// `flag=N` over `flag N`.
    Integer {
        param: &'static str,
        flag: &'static str,
        joined: bool,
    },
    /// Non-empty string parameter as a bare token.
    Positional { param: &'static str },
}

impl ArgRule {
    fn apply(&self, params: &ParameterSet, out: &mut Vec<String>) {
        match *self {
            Self::Fixed(tokens) => out.extend(tokens.iter().map(|t| t.to_string())),
            Self::Switch { param, flag } => {
                if params.is_set(param) {
                    out.push(flag.to_string());
                }
            }
            Self::Toggle { param, on, off } => match params.bool(param) {
                Some(true) => out.push(on.to_string()),
                Some(false) => out.push(off.to_string()),
                None => {}
            },
            Self::Value { param, flag } => {
                if let Some(value) = params.str(param) {
                    out.push(flag.to_string());
                    out.push(value.to_string());
                }
            }
            Self::Integer {
                param,
                flag,
                joined,
            } => {
                if let Some(n) = params.number(param) {
                    let n = n.trunc() as i64;
                    if joined {
                        out.push(format!("{flag}={n}"));
                    } else {
                        out.push(flag.to_string());
                        out.push(n.to_string());
                    }
                }
            }
            Self::Positional { param } => {
                if let Some(value) = params.str(param) {
                    out.push(value.to_string());
                }
            }
        }
    }
}

/// Canonical name wins over the suffixed alias when both are present.
fn lookup<'a>(params: &'a ParameterSet, name: &str) -> Option<&'a ParamValue> {
    params
        .get(name)
        .or_else(|| params.get(&format!("{name}{PARAM_SUFFIX}")))
}

/// Integral values print without a fractional part (`--ttl=60`, not `60.0`).
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// Renders the common flag table for `params`.
pub fn common_args(params: &ParameterSet) -> Vec<String> {
    let mut out = Vec::new();
    for mapping in COMMON_FLAGS {
        let Some(value) = lookup(params, mapping.param) else {
            continue;
        };
        match (mapping.style, value) {
            (FlagStyle::ShortPair(short), ParamValue::Str(s)) if !s.is_empty() => {
                out.push(short.to_string());
                out.push(s.clone());
            }
            (FlagStyle::ShortPair(_), _) => {}
            (FlagStyle::Long, ParamValue::Bool(true)) => out.push(format!("--{}", mapping.flag)),
            (FlagStyle::Long, ParamValue::Bool(false)) => {}
            (FlagStyle::Long, ParamValue::Str(s)) if !s.is_empty() => {
                out.push(format!("--{}={}", mapping.flag, s));
            }
            (FlagStyle::Long, ParamValue::Str(_)) => {}
            (FlagStyle::Long, ParamValue::Number(n)) => {
                out.push(format!("--{}={}", mapping.flag, format_number(*n)));
            }
        }
    }
    out
}

/// Common flags followed by `rules`, in order.
pub fn build_args(params: &ParameterSet, rules: &[ArgRule]) -> Vec<String> {
    let mut out = common_args(params);
    for rule in rules {
        rule.apply(params, &mut out);
    }
    out
}

/// A fully built invocation: subcommand words plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Subcommand split into words (`["kube", "ls"]`).
    pub subcommand: Vec<String>,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(subcommand: &str, args: Vec<String>) -> Self {
        Self {
            subcommand: subcommand.split_whitespace().map(str::to_string).collect(),
            args,
        }
    }

    /// Arguments passed to the binary: subcommand words, then built args.
    pub fn argv(&self) -> Vec<String> {
        self.subcommand
            .iter()
            .chain(self.args.iter())
            .cloned()
            .collect()
    }

    /// Space-joined command line as it would be typed, e.g. `tsh ls --format json`.
    pub fn command_line(&self, binary: &str) -> String {
        std::iter::once(binary.to_string())
            .chain(self.argv())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(raw: serde_json::Value) -> ParameterSet {
        ParameterSet::from_json(Some(&raw))
    }

    #[test]
    fn proxy_and_debug_become_long_flags() {
        let args = common_args(&params(json!({"proxy": "teleport.example.com", "debug": true})));
        assert_eq!(args, vec!["--proxy=teleport.example.com", "--debug"]);
    }

    #[test]
    fn false_or_absent_booleans_emit_nothing() {
        assert!(common_args(&params(json!({"debug": false}))).is_empty());
        assert!(common_args(&params(json!({}))).is_empty());
    }

    #[test]
    fn login_renders_as_short_pair() {
        let args = common_args(&params(json!({"loginParam": "root", "userParam": "alice"})));
        assert_eq!(args, vec!["-l", "root", "--user=alice"]);
    }

    #[test]
    fn canonical_name_wins_over_alias() {
        let args = common_args(&params(json!({"proxy": "a", "proxyParam": "b"})));
        assert_eq!(args, vec!["--proxy=a"]);
    }

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(common_args(&params(json!({"ttl": 60}))), vec!["--ttl=60"]);
        assert_eq!(common_args(&params(json!({"ttl": 1.5}))), vec!["--ttl=1.5"]);
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let args = common_args(&params(json!({"destination": "root@host", "foo": true})));
        assert!(args.is_empty());
    }

    #[test]
    fn rules_follow_common_flags_in_declared_order() {
        let rules = [
            ArgRule::Fixed(&["--format", "json"]),
            ArgRule::Value {
                param: "search",
                flag: "--search",
            },
            ArgRule::Switch {
                param: "verbose",
                flag: "--verbose",
            },
            ArgRule::Positional { param: "labels" },
        ];
        let args = build_args(
            &params(json!({"labels": "env=prod", "verbose": true, "search": "web", "proxy": "p"})),
            &rules,
        );
        assert_eq!(
            args,
            vec![
                "--proxy=p",
                "--format",
                "json",
                "--search",
                "web",
                "--verbose",
                "env=prod"
            ]
        );
    }

    #[test]
    fn toggle_emits_either_token_or_nothing() {
        let rule = [ArgRule::Toggle {
            param: "tty",
            on: "-t",
            off: "-T",
        }];
        assert_eq!(build_args(&params(json!({"tty": true})), &rule), vec!["-t"]);
        assert_eq!(build_args(&params(json!({"tty": false})), &rule), vec!["-T"]);
        assert!(build_args(&params(json!({})), &rule).is_empty());
    }

    #[test]
    fn integer_rule_truncates_and_joins() {
        let joined = [ArgRule::Integer {
            param: "port",
            flag: "--port",
            joined: true,
        }];
        let split = [ArgRule::Integer {
            param: "port",
            flag: "-P",
            joined: false,
        }];
        assert_eq!(build_args(&params(json!({"port": 2222.9})), &joined), vec!["--port=2222"]);
        assert_eq!(build_args(&params(json!({"port": 22})), &split), vec!["-P", "22"]);
        assert!(build_args(&params(json!({"port": "22"})), &split).is_empty());
    }

    #[test]
    fn building_ignores_insertion_order() {
        let mut a = ParameterSet::new();
        a.insert("debug", true);
        a.insert("proxy", "p");
        a.insert("user", "u");
        let mut b = ParameterSet::new();
        b.insert("user", "u");
        b.insert("proxy", "p");
        b.insert("debug", true);
        assert_eq!(common_args(&a), common_args(&b));
    }

    #[test]
    fn command_spec_splits_multi_word_subcommands() {
        let spec = CommandSpec::new("kube ls", vec!["--format".into(), "json".into()]);
        assert_eq!(spec.argv(), vec!["kube", "ls", "--format", "json"]);
        assert_eq!(spec.command_line("tsh"), "tsh kube ls --format json");
    }
}
