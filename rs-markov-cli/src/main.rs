mod cli;
mod env_loader;
mod logging;
mod slack;

fn main() {
	// Loaded before logging so that `.env` can set `DEBUG` or `RUST_LOG`.
	let env_error = env_loader::load_dotenv();
	logging::init();
	env_loader::report(env_error);

	if let Err(err) = cli::run() {
		eprintln!("error: {err:#}");
		std::process::exit(1);
	}
}
