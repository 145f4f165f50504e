#![deny(clippy::arithmetic_side_effects)]
#![deny(clippy::cast_possible_truncation)]

use ctor::ctor;
use std::env::var;
use tracing_subscriber::{
    EnvFilter,
    fmt::format,
};

pub mod subscriber;

#[ctor]
pub static TRACE: () = {
    if let Ok(v) = var("KENNEL_TRACE") {
        match v.to_lowercase().as_str() {
            "1" | "true" | "on" => {
                let _ = tracing_subscriber::FmtSubscriber::builder()
                    .with_env_filter(EnvFilter::from_default_env())
                    .try_init();
            }
            "compact" => {
                let _ = tracing_subscriber::FmtSubscriber::builder()
                    .with_env_filter(EnvFilter::from_default_env())
                    .event_format(format().compact())
                    .try_init();
            }
            "pretty" => {
                let _ = tracing_subscriber::FmtSubscriber::builder()
                    .with_env_filter(EnvFilter::from_default_env())
                    .event_format(format().pretty())
                    .try_init();
            }
            _ => (),
        }
    }
};

#[macro_export]
macro_rules! enable_tracing {
    () => {
        static _TRACE: &$crate::TRACE<()> = &$crate::TRACE;
    };
}
