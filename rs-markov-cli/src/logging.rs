use std::env;

use env_logger::Env;

/// Level used when `DEBUG` is set and `RUST_LOG` is not.
const DEBUG_LEVEL: &str = "debug";
/// Level used otherwise.
const DEFAULT_LEVEL: &str = "error";

fn default_level(debug: bool) -> &'static str {
	if debug { DEBUG_LEVEL } else { DEFAULT_LEVEL }
}

/// Initializes `env_logger`. `RUST_LOG` always wins over the `DEBUG` switch.
pub fn init() {
	let level = default_level(env::var_os("DEBUG").is_some());
	env_logger::Builder::from_env(Env::default().default_filter_or(level))
		.format_timestamp(None)
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_switch_selects_level() {
		assert_eq!(default_level(true), "debug");
		assert_eq!(default_level(false), "error");
	}
}
