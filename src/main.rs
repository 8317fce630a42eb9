use clap::{value_parser, Arg, Command};
use music_page::configuration::{create_config, ConfigFolder};
use music_page::startup::{load_settings, run, Action};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Command::new("music-page")
        .about("🎵 Browse and fill the music_page catalog from the terminal 🎵")
        .arg(
            Arg::new("api-root")
                .long("api-root")
                .value_name("URL")
                .global(true)
                .help("Override the API root, e.g. http://localhost:5000/music_page/api/v1.0/"),
        )
        .subcommand(Command::new("years").about("📅 Show catalog totals and the list of years"))
        .subcommand(
            Command::new("content")
                .about("💿 Show the albums and tracks released in a year")
                .arg(
                    Arg::new("year")
                        .required(true)
                        .value_parser(value_parser!(i32)),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("🎤 Load an artist's catalog into the backend")
                .arg(Arg::new("artist").help("Artist name; defaults to the configured one")),
        )
        .subcommand(
            Command::new("config").about("🛠️ Create or update configuration file for music-page"),
        )
        .get_matches();

    let cfg_folder = ConfigFolder::new()?;
    let api_root = args.get_one::<String>("api-root").map(String::as_str);

    let action = match args.subcommand() {
        Some(("config", _)) => {
            println!("\x1b[1m\x1b[34mConfiguring music-page...\x1b[0m");
            return create_config(&cfg_folder);
        }
        Some(("years", _)) => Action::Years,
        Some(("content", sub)) => match sub.get_one::<i32>("year") {
            Some(year) => Action::Content(*year),
            None => {
                print_usage();
                return Ok(());
            }
        },
        Some(("create", sub)) => Action::Create(sub.get_one::<String>("artist").cloned()),
        _ => {
            print_usage();
            return Ok(());
        }
    };

    let settings = load_settings(&cfg_folder, api_root)?;
    run(settings, action).await
}

fn print_usage() {
    println!("\x1b[1m\x1b[31mInvalid command!\x1b[0m\n");
    println!("📖 Available Commands:");
    println!("  \x1b[1m\x1b[32mmusic-page years\x1b[0m           - 📅 Catalog totals and years");
    println!("  \x1b[1m\x1b[32mmusic-page content <YEAR>\x1b[0m  - 💿 Albums and tracks of a year");
    println!("  \x1b[1m\x1b[32mmusic-page create [ARTIST]\x1b[0m - 🎤 Load an artist into the catalog");
    println!("  \x1b[1m\x1b[32mmusic-page config\x1b[0m          - 🛠️  Create or update configuration file");
}
