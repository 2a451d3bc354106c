use log::warn;

/// Keeps only the errors worth reporting: a missing `.env` is normal.
fn reportable<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
	match result {
		Ok(_) => None,
		Err(e) if e.not_found() => None,
		Err(e) => Some(e),
	}
}

/// Loads `.env` from the working directory (or a parent).
///
/// Returns the load error, if any, so it can be reported once logging is up.
pub fn load_dotenv() -> Option<dotenvy::Error> {
	reportable(dotenvy::dotenv())
}

/// Logs a load error returned by `load_dotenv`.
pub fn report(error: Option<dotenvy::Error>) {
	if let Some(e) = error {
		warn!("ignoring .env: {}", e);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn missing_file_is_not_reported() {
		let tmp = tempfile::tempdir().unwrap();
		assert!(reportable(dotenvy::from_path(tmp.path().join(".env"))).is_none());
	}

	#[test]
	fn malformed_file_is_reported() {
		let tmp = tempfile::tempdir().unwrap();
		let path = tmp.path().join(".env");
		fs::write(&path, "RS_MARKOV_ENV_TEST 'unterminated\n").unwrap();
		assert!(reportable(dotenvy::from_path(&path)).is_some());
	}
}
