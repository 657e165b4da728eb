use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// `Authorization` value for HTTP Basic auth. Credentials are not validated.
pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

/// `Authorization` value for Infobip's API-key scheme.
pub fn custom_auth(api_key: &str) -> String {
    format!("App {api_key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encodes_credentials() {
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
        assert_eq!(basic_auth("", ""), "Basic Og==");
    }

    #[test]
    fn custom_auth_prefixes_app() {
        assert_eq!(custom_auth("abc123"), "App abc123");
    }
}
