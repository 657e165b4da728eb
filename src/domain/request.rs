use crate::domain::params::Params;
use crate::domain::value::ParamType;

/// Suffix marking a schema key as required (`"limit$"`).
pub const REQUIRED_MARKER: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }

    /// Where this verb carries its parameters.
    pub fn placement(&self) -> Placement {
        match self {
            Self::Get | Self::Head => Placement::Query,
            Self::Post | Self::Put | Self::Patch => Placement::Body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Query,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    #[default]
    Json,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One entry of an endpoint's parameter schema.
pub struct ParamSpec {
    /// Logical name, optionally suffixed with [`REQUIRED_MARKER`].
    pub key: &'static str,
    pub ty: ParamType,
}

impl ParamSpec {
    pub const fn new(key: &'static str, ty: ParamType) -> Self {
        Self { key, ty }
    }

    /// Name with the required marker stripped.
    pub fn name(&self) -> &'static str {
        self.key
            .strip_suffix(REQUIRED_MARKER)
            .unwrap_or(self.key)
    }

    pub fn is_required(&self) -> bool {
        self.key.ends_with(REQUIRED_MARKER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How `{:name}` placeholders obtain their values.
pub enum RouteStrategy {
    /// Take `inputs[name]` directly.
    Inputs,
    /// Look the placeholder up in an alias table: `m_<name>` when the `selector`
    /// input is a sequence, `s_<name>` otherwise.
    Alias {
        selector: &'static str,
        aliases: &'static [(&'static str, &'static str)],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSchema {
    pub params: &'static [(&'static str, ParamType)],
    pub strategy: RouteStrategy,
}

impl RouteSchema {
    pub fn param_type(&self, name: &str) -> Option<ParamType> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, ty)| *ty)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Declarative description of one endpoint, built fresh for every call.
pub struct EndpointConfig {
    pub method: Method,
    pub path: &'static str,
    pub params: Option<&'static [ParamSpec]>,
    pub route: Option<RouteSchema>,
    pub defaults: Params,
    pub encoding: BodyEncoding,
}

impl EndpointConfig {
    /// `true` when the endpoint declares any route or input schema, in which case
    /// callers must pass at least one defined property.
    pub fn requires_params(&self) -> bool {
        self.params.is_some() || self.route.is_some()
    }
}

const LIST_NUMBERS_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("limit$", ParamType::Number),
    ParamSpec::new("page", ParamType::Number),
    ParamSpec::new("number", ParamType::String),
    ParamSpec::new("capabilities", ParamType::String),
    ParamSpec::new("country", ParamType::String),
];

const PURCHASE_NUMBER_PARAMS: &[ParamSpec] = &[ParamSpec::new("numberKey$", ParamType::String)];

const SEND_MESSAGE_PARAMS: &[ParamSpec] = &[
    ParamSpec::new(
        "to$",
        ParamType::OneOf(&[ParamType::String, ParamType::Sequence]),
    ),
    ParamSpec::new("text$", ParamType::String),
];

const NUMBER_ROUTE: RouteSchema = RouteSchema {
    params: &[("numberKey", ParamType::String)],
    strategy: RouteStrategy::Inputs,
};

const SEND_MESSAGE_ROUTE: RouteSchema = RouteSchema {
    params: &[("type", ParamType::String)],
    strategy: RouteStrategy::Alias {
        selector: "to",
        aliases: &[("m_type", "multi"), ("s_type", "single")],
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The Infobip endpoints this client knows how to call.
pub enum Endpoint {
    /// `GET /numbers/1/numbers/available`
    ListNumbers,
    /// `GET /numbers/1/numbers/{:numberKey}`
    GetNumber,
    /// `POST /numbers/1/numbers`
    PurchaseNumber,
    /// `POST /sms/1/text/{:type}`
    SendMessage,
}

impl Endpoint {
    pub fn config(self) -> EndpointConfig {
        match self {
            Self::ListNumbers => EndpointConfig {
                method: Method::Get,
                path: "/numbers/1/numbers/available",
                params: Some(LIST_NUMBERS_PARAMS),
                route: None,
                defaults: Params::new()
                    .with("country", "NG")
                    .with("capabilities", "SMS,VOICE")
                    .with("page", 0),
                encoding: BodyEncoding::Json,
            },
            Self::GetNumber => EndpointConfig {
                method: Method::Get,
                path: "/numbers/1/numbers/{:numberKey}",
                params: None,
                route: Some(NUMBER_ROUTE),
                defaults: Params::new(),
                encoding: BodyEncoding::Json,
            },
            Self::PurchaseNumber => EndpointConfig {
                method: Method::Post,
                path: "/numbers/1/numbers",
                params: Some(PURCHASE_NUMBER_PARAMS),
                route: None,
                defaults: Params::new(),
                encoding: BodyEncoding::Json,
            },
            Self::SendMessage => EndpointConfig {
                method: Method::Post,
                path: "/sms/1/text/{:type}",
                params: Some(SEND_MESSAGE_PARAMS),
                route: Some(SEND_MESSAGE_ROUTE),
                defaults: Params::new(),
                encoding: BodyEncoding::Json,
            },
        }
    }
}
