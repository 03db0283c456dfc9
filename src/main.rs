use clap::Parser;
use color_eyre::Result;
use ember::{
    Config, Profile, Storage,
    cli::{Cli, Commands},
    store::ActivityStore,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Open storage and wire up the activity store
    let db_path = config.get_database_path();
    let storage = Storage::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;
    let store = ActivityStore::new(storage, config.append_mode);

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = ember::tui::App::new(config, store);
            ember::tui::run_event_loop(app)?;
        }
        Commands::Log {
            content,
            date,
            missed,
        } => {
            ember::cli::handle_log(content, date, missed, &store)?;
        }
        Commands::List { date } => {
            ember::cli::handle_list(date, &store)?;
        }
        Commands::Show { date } => {
            ember::cli::handle_show(date, &store)?;
        }
        Commands::Edit { date, content } => {
            ember::cli::handle_edit(date, content, &store)?;
        }
        Commands::Delete { date } => {
            ember::cli::handle_delete(date, &store)?;
        }
        Commands::Streak => {
            ember::cli::handle_streak(&store)?;
        }
        Commands::Export { out } => {
            let out_dir = out
                .map(|p| ember::utils::expand_path(&p))
                .unwrap_or_else(|| config.get_export_dir());
            ember::cli::handle_export(&out_dir, &store)?;
        }
    }

    Ok(())
}
