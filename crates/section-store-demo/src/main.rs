use anyhow::{Context, Result};
use section_radio::Radio;
use section_store::service::{update_topic, GET, UPDATE};
use section_store::{Store, StoreConfig, StoreService};
use serde_json::Value;
use std::ffi::OsString;

mod counter;
mod logger;

/// Turn a command line argument into an action value
///
/// JSON objects are passed on as structured actions; anything else is a
/// bare action identifier.
fn parse_action(arg: &str) -> Value {
    match serde_json::from_str::<Value>(arg) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::String(arg.to_string()),
    }
}

/// Command line arguments usable as actions
///
/// Arguments that are not valid UTF-8 are skipped with a warning.
fn action_args(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .filter_map(|arg| match arg.into_string() {
            Ok(arg) => Some(arg),
            Err(arg) => {
                log::warn!("Skipping argument that is not valid UTF-8: {:?}", arg);
                eprintln!("skipping argument that is not valid UTF-8: {:?}", arg);
                None
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let config = StoreConfig::load();
    let log_file = logger::init(&config)?;

    log::info!("Starting section-store-demo, logging to {}", log_file.display());
    log::debug!("Config: {:?}", config);

    let radio = Radio::new();
    let service = StoreService::bind(
        Store::from_config(&config).into_shared(),
        radio.channel(&config.channel),
    );
    service
        .register_section(counter::section())
        .context("Failed to register counter section")?;

    let channel = radio.channel(&config.channel);
    let updates = channel.subscribe(&update_topic(counter::NAME));

    for arg in action_args(std::env::args_os().skip(1)) {
        let reply = channel
            .request(UPDATE, parse_action(&arg))
            .with_context(|| format!("Failed to dispatch '{}'", arg))?;

        if let Some(error) = reply.get("error") {
            log::warn!("Dispatching '{}' failed: {}", arg, error);
            eprintln!("{}: {}", arg, error);
        }
    }

    log::info!(
        "{} '{}' notification(s) received",
        updates.drain().len(),
        counter::NAME
    );

    let state = channel.request(GET, Value::Null)?;
    println!("{}", serde_json::to_string_pretty(&state)?);

    log::info!("Exiting section-store-demo");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("ADD_LIKE"), json!("ADD_LIKE"));
        assert_eq!(
            parse_action(r#"{"type":"SET_LIKES","payload":3}"#),
            json!({ "type": "SET_LIKES", "payload": 3 })
        );
        // Valid JSON that isn't an object stays a bare identifier
        assert_eq!(parse_action("42"), json!("42"));
        assert_eq!(parse_action("[1]"), json!("[1]"));
    }

    #[test]
    fn test_action_args_keeps_utf8() {
        let args = vec![OsString::from("ADD_LIKE"), OsString::from("ADD_DISLIKE")];
        assert_eq!(action_args(args), vec!["ADD_LIKE", "ADD_DISLIKE"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_action_args_skips_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("ADD_LIKE"),
            OsString::from_vec(vec![0x66, 0x6f, 0x80]),
            OsString::from("ADD_DISLIKE"),
        ];
        assert_eq!(action_args(args), vec!["ADD_LIKE", "ADD_DISLIKE"]);
    }
}
