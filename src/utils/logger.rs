use std::env;

use log::LevelFilter;

/// Timestamped colored logs; `RUST_LOG` wins, otherwise `info`.
pub fn init_logging() {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(LevelFilter::Info),
    };
    builder.init();
}
