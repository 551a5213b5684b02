use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    AppEnv,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "PORT",
            EnvKey::AppEnv => "APP_ENV",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    parse_or(get(key).ok(), default)
}

/// Parses a raw value, keeping `default` when it is unset or malformed.
pub fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    match raw {
        Some(val) => val.trim().parse::<T>().unwrap_or(default),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_value_when_well_formed() {
        assert_eq!(parse_or(Some("9090".to_string()), 8080u16), 9090);
        assert_eq!(parse_or(Some(" 4000 ".to_string()), 8080u16), 4000);
    }

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or::<u16>(None, 8080), 8080);
        assert_eq!(parse_or(Some("eighty".to_string()), 8080u16), 8080);
        assert_eq!(parse_or(Some("70000".to_string()), 8080u16), 8080);
    }

    #[test]
    fn keys_map_to_variable_names() {
        assert_eq!(EnvKey::ServerPort.as_str(), "PORT");
        assert_eq!(EnvKey::AppEnv.as_str(), "APP_ENV");
    }
}
