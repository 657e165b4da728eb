use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};

use crate::domain::{EndpointConfig, Params, RouteSchema, RouteStrategy, Value};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{:(\w+)\}").expect("placeholder pattern is valid"));

const NULL_SEGMENT: &str = "null";

/// Everything but RFC 3986 unreserved characters is escaped inside a segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Substitute `{:name}` placeholders in the endpoint path.
///
/// A placeholder whose value is missing or fails its declared type is replaced
/// by the literal `null`; no error is raised here. Substituted values are
/// percent-encoded as a single segment, and `.`/`..` are treated as invalid.
pub fn build_path(config: &EndpointConfig, inputs: &Params) -> String {
    let Some(route) = config.route.as_ref() else {
        return config.path.to_owned();
    };

    PLACEHOLDER
        .replace_all(config.path, |caps: &Captures<'_>| {
            let name = &caps[1];
            match route_value(route, name, inputs).and_then(|value| encode_segment(&value)) {
                Some(segment) => segment,
                None => {
                    tracing::debug!(placeholder = name, "route value missing or mistyped");
                    NULL_SEGMENT.to_owned()
                }
            }
        })
        .into_owned()
}

fn encode_segment(value: &Value) -> Option<String> {
    let raw = value.to_string();
    if raw == "." || raw == ".." {
        return None;
    }
    Some(utf8_percent_encode(&raw, PATH_SEGMENT).to_string())
}

fn route_value(route: &RouteSchema, name: &str, inputs: &Params) -> Option<Value> {
    let candidate = match route.strategy {
        RouteStrategy::Inputs => inputs.get(name).cloned(),
        RouteStrategy::Alias { selector, aliases } => {
            let prefix = match inputs.get(selector) {
                Some(Value::Sequence(_)) => "m_",
                _ => "s_",
            };
            let key = format!("{prefix}{name}");
            aliases
                .iter()
                .find(|(alias, _)| *alias == key)
                .map(|(_, value)| Value::from(*value))
        }
    }?;

    let ty = route.param_type(name)?;
    ty.matches(&candidate).then_some(candidate)
}
