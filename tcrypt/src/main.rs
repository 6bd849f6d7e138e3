extern crate tcrypt;

use std::process::ExitCode;

use tcrypt::Options;

fn main() -> ExitCode {
    let matches = tcrypt::cli::parse_flags();
    tcrypt::utils::init_logging(matches.is_present("debug"));

    let result = Options::from_matches(&matches).and_then(|options| {
        let password = tcrypt::utils::resolve_password(matches.value_of("password"))?;
        tcrypt::run(&options, &password)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
