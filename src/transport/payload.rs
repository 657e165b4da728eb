use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::domain::{BodyEncoding, EndpointConfig, Params, Placement, RequestError};
use crate::transport::serialize::serialize;

/// Characters left as-is in query components: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request body ready for the wire.
pub enum RequestBody {
    /// JSON object text; every value is a serialized string.
    Json(String),
    /// Key/value pairs sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Encoded query string without the leading `?`; may be empty.
    Query(String),
    Body(RequestBody),
}

/// Validate `inputs` against the endpoint schema and encode the accepted fields.
///
/// Defaults are merged under the caller's inputs first. Fields are visited in
/// schema order and the first failure aborts the whole build.
pub fn build_payload(config: &EndpointConfig, inputs: &Params) -> Result<Payload, RequestError> {
    let merged = inputs.merged_over(&config.defaults);
    let mut fields = Vec::<(String, String)>::new();

    for spec in config.params.unwrap_or_default() {
        let name = spec.name();
        let value = match merged.get(name) {
            Some(value) if !value.is_blank() => value,
            _ if spec.is_required() => {
                return Err(RequestError::RequiredParameterMissing {
                    param: name.to_owned(),
                });
            }
            _ => continue,
        };

        if !spec.ty.matches(value) {
            return Err(RequestError::ParameterTypeMismatch {
                param: name.to_owned(),
                expected: spec.ty,
            });
        }

        fields.push((name.to_owned(), serialize(value)));
    }

    let payload = match config.method.placement() {
        Placement::Query => Payload::Query(encode_query(&fields)),
        Placement::Body => Payload::Body(match config.encoding {
            BodyEncoding::Json => RequestBody::Json(encode_json(fields)),
            BodyEncoding::Form => RequestBody::Form(fields),
        }),
    };
    Ok(payload)
}

fn encode_query(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_json(fields: Vec<(String, String)>) -> String {
    let object = fields
        .into_iter()
        .map(|(key, value)| (key, serde_json::Value::String(value)))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(object).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::domain::{Endpoint, Method, ParamSpec, ParamType, Value};

    use super::*;

    fn query(payload: Payload) -> String {
        match payload {
            Payload::Query(query) => query,
            other => panic!("expected query payload, got {other:?}"),
        }
    }

    fn json_body(payload: Payload) -> serde_json::Value {
        match payload {
            Payload::Body(RequestBody::Json(json)) => serde_json::from_str(&json).unwrap(),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn list_numbers_merges_defaults_into_query() {
        let config = Endpoint::ListNumbers.config();
        let params = Params::new().with("limit", 10);

        let query = query(build_payload(&config, &params).unwrap());
        // `page` defaults to 0, which serializes as the literal null.
        assert_eq!(query, "limit=10&page=null&capabilities=SMS%2CVOICE&country=NG");
    }

    #[test]
    fn caller_values_override_defaults() {
        let config = Endpoint::ListNumbers.config();
        let params = Params::new()
            .with("limit", 5)
            .with("page", 2)
            .with("country", "GB")
            .with("number", "44 77");

        let query = query(build_payload(&config, &params).unwrap());
        assert_eq!(
            query,
            "limit=5&page=2&number=44%2077&capabilities=SMS%2CVOICE&country=GB"
        );
    }

    #[test]
    fn missing_required_param_fails() {
        let config = Endpoint::ListNumbers.config();
        let params = Params::new().with("page", 1);

        let err = build_payload(&config, &params).unwrap_err();
        assert_eq!(
            err,
            RequestError::RequiredParameterMissing {
                param: "limit".to_owned()
            }
        );
    }

    #[test]
    fn null_and_empty_required_values_count_as_missing() {
        let config = Endpoint::PurchaseNumber.config();
        for value in [Value::Null, Value::from("")] {
            let params = Params::new().with("numberKey", value);
            assert!(matches!(
                build_payload(&config, &params),
                Err(RequestError::RequiredParameterMissing { .. })
            ));
        }
    }

    #[test]
    fn optional_blank_values_are_omitted() {
        let config = Endpoint::ListNumbers.config();
        let params = Params::new()
            .with("limit", 1)
            .with("number", "")
            .with("country", Value::Null);

        let query = query(build_payload(&config, &params).unwrap());
        assert_eq!(query, "limit=1&page=null&capabilities=SMS%2CVOICE");
    }

    #[test]
    fn wrong_type_fails_with_expected_type() {
        let config = Endpoint::ListNumbers.config();
        let params = Params::new().with("limit", "ten");

        let err = build_payload(&config, &params).unwrap_err();
        assert_eq!(
            err,
            RequestError::ParameterTypeMismatch {
                param: "limit".to_owned(),
                expected: ParamType::Number,
            }
        );
    }

    #[test]
    fn purchase_number_builds_json_body() {
        let config = Endpoint::PurchaseNumber.config();
        let params = Params::new().with("numberKey", "ABC-123");

        let body = json_body(build_payload(&config, &params).unwrap());
        assert_eq!(body, serde_json::json!({"numberKey": "ABC-123"}));
    }

    #[test]
    fn send_message_serializes_destination_list_as_json_text() {
        let config = Endpoint::SendMessage.config();
        let params = Params::new()
            .with("to", vec!["447700000000", "447700000001"])
            .with("text", "hi");

        let body = json_body(build_payload(&config, &params).unwrap());
        assert_eq!(
            body,
            serde_json::json!({
                "to": r#"["447700000000","447700000001"]"#,
                "text": "hi",
            })
        );
    }

    #[test]
    fn json_body_keeps_schema_order() {
        let config = Endpoint::SendMessage.config();
        let params = Params::new().with("text", "hi").with("to", "447700000000");

        match build_payload(&config, &params).unwrap() {
            Payload::Body(RequestBody::Json(json)) => {
                assert_eq!(json, r#"{"to":"447700000000","text":"hi"}"#);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn form_encoding_keeps_raw_pairs() {
        let mut config = Endpoint::PurchaseNumber.config();
        config.encoding = BodyEncoding::Form;
        let params = Params::new().with("numberKey", "A B");

        assert_eq!(
            build_payload(&config, &params).unwrap(),
            Payload::Body(RequestBody::Form(vec![(
                "numberKey".to_owned(),
                "A B".to_owned()
            )]))
        );
    }

    #[test]
    fn endpoint_without_input_schema_yields_empty_query() {
        let config = Endpoint::GetNumber.config();
        let params = Params::new().with("numberKey", "abc");
        assert_eq!(build_payload(&config, &params).unwrap(), Payload::Query(String::new()));
    }

    #[test]
    fn dates_in_query_are_escaped_after_serialization() {
        const SCHEMA: &[ParamSpec] = &[ParamSpec::new("since$", ParamType::Date)];
        let mut config = Endpoint::ListNumbers.config();
        config.method = Method::Head;
        config.params = Some(SCHEMA);
        config.defaults = Params::new();

        let since = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let params = Params::new().with("since", since);
        let query = query(build_payload(&config, &params).unwrap());
        assert_eq!(query, "since=2020-01-01T00%3A00%3A00.000");
    }

    #[test]
    fn building_twice_is_identical() {
        let config = Endpoint::SendMessage.config();
        let params = Params::new().with("to", "447700000000").with("text", "hi");
        assert_eq!(
            build_payload(&config, &params).unwrap(),
            build_payload(&config, &params).unwrap()
        );
    }
}
