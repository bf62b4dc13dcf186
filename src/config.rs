use failure::Error;
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_LATENCY_PER_EVENT_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: SocketAddr,
    /// Seed the per-request random source from the plate.
    pub deterministic: bool,
    /// Add request id, server time and latency to snapshot responses, and
    /// delay them in proportion to the number of service events.
    pub decorate_responses: bool,
    pub latency_per_event_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: ([0, 0, 0, 0], 8080).into(),
            deterministic: false,
            decorate_responses: false,
            latency_per_event_ms: DEFAULT_LATENCY_PER_EVENT_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("CARTRACE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let mut bind: SocketAddr = bind
            .parse()
            .map_err(|e| format_err!("Invalid CARTRACE_BIND '{}': {}", bind, e))?;
        if let Some(port) = lookup("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| format_err!("Invalid PORT '{}': {}", port, e))?;
            bind.set_port(port);
        }

        let latency_per_event_ms = match lookup("CARTRACE_LATENCY_PER_EVENT_MS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                format_err!("Invalid CARTRACE_LATENCY_PER_EVENT_MS '{}': {}", v, e)
            })?,
            None => DEFAULT_LATENCY_PER_EVENT_MS,
        };

        Ok(Config {
            bind,
            deterministic: flag(&lookup, "CARTRACE_DETERMINISTIC")?,
            decorate_responses: flag(&lookup, "CARTRACE_DECORATE_RESPONSES")?,
            latency_per_event_ms,
        })
    }
}

fn flag<F>(lookup: &F, key: &str) -> Result<bool, Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(false),
        Some(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "" | "0" | "false" | "no" | "off" => Ok(false),
            _ => bail!("Invalid boolean for {}: '{}'", key, v),
        },
    }
}
