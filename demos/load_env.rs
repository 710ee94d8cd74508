use envrules::{Coercion, FieldRule, Schema};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(dead_code)]
struct AppConfig {
    app_name: String,
    port: u16,
    debug: bool,
    log_level: String,
    allowed_hosts: Vec<String>,
    started_at: Option<toml::value::Datetime>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let schema = Schema::new()
        .field("APP_NAME", FieldRule::new().with_default("demo"))
        .field(
            "PORT",
            FieldRule::new()
                .coerce(Coercion::Number)
                .with_default(8080)
                .validator(|v| v.as_integer().is_some_and(|p| (1..=65535).contains(&p))),
        )
        .field(
            "DEBUG",
            FieldRule::new()
                .env("APP_DEBUG")
                .coerce(Coercion::Boolean)
                .with_default(false),
        )
        .field(
            "LOG_LEVEL",
            FieldRule::new()
                .one_of(["trace", "debug", "info", "warn", "error"])
                .with_default("info"),
        )
        .field(
            "ALLOWED_HOSTS",
            FieldRule::new()
                .cast(|raw| {
                    Ok(toml::Value::Array(
                        raw.split(',')
                            .map(|h| toml::Value::String(h.trim().to_string()))
                            .collect(),
                    ))
                })
                .with_default("localhost"),
        )
        .field("STARTED_AT", FieldRule::new().coerce(Coercion::Datetime));

    let config = match schema.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid environment:\n{e}");
            std::process::exit(1);
        }
    };

    for (name, value) in config.iter() {
        match value {
            Some(value) => println!("{name} = {value}"),
            None => println!("{name} is not set"),
        }
    }

    let app: AppConfig = config.deserialize()?;
    println!("{app:#?}");

    Ok(())
}
