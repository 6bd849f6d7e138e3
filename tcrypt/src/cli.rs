use treecrypt::action::ACTION_NAMES;
use treecrypt::archiver::DEFAULT_PROGRAM;

pub const PASSWORD_ENV: &str = "TREECRYPT_PASSWORD";
pub const PROGRAM_ENV: &str = "TREECRYPT_7Z";

pub fn app<'a, 'b>() -> clap::App<'a, 'b> {
    clap::App::new("tcrypt")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("Recursively encrypt each directory's files into a password-protected 7z sibling archive, or decrypt them back")
        .arg(clap::Arg::from_usage("-d --debug 'Enable debug output'"))
        .arg(
            clap::Arg::from_usage("-p, --password [password] 'Password for the 7z archives'")
                .env(PASSWORD_ENV)
                .hide_env_values(true),
        )
        .arg(
            clap::Arg::with_name("7z")
                .long("7z")
                .takes_value(true)
                .value_name("program")
                .help("Path to the 7z executable")
                .env(PROGRAM_ENV)
                .default_value(DEFAULT_PROGRAM),
        )
        .arg(clap::Arg::from_usage(
            "-f, --force 'Replace existing archives and overwrite existing files on extraction'",
        ))
        .arg(clap::Arg::from_usage(
            "-n, --dry-run 'Print what would be done without changing anything'",
        ))
        .arg(
            clap::Arg::from_usage("<action> 'Action to perform'")
                .possible_values(ACTION_NAMES),
        )
        .arg(clap::Arg::from_usage(
            "[path] 'Directory to start from (defaults to the current directory)'",
        ))
}

pub fn parse_flags<'a>() -> clap::ArgMatches<'a> {
    app().get_matches()
}
