use chrono::Utc;
use clap::Parser;
use skillog::application::{
    ConfigService, HistoryManager, HistoryOptions, InitService, Transition,
};
use skillog::cli::{format_day, format_entry_list, format_summary, Cli, Commands, Style};
use skillog::domain::{
    Category, DailyStats, DayRef, EntryDraft, HeuristicSummarizer, Summarizer, Theme,
};
use skillog::error::SkillogError;
use skillog::infrastructure::{FileStore, LogRoot, PreferenceStore};
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SKILLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_manager(root: &LogRoot) -> Result<HistoryManager<FileStore>, SkillogError> {
    let config = root.load_config()?;
    Ok(HistoryManager::with_options(
        root.store(),
        HistoryOptions::from(&config),
    ))
}

fn style_for(root: &LogRoot) -> Style {
    if !std::io::stdout().is_terminal() || std::env::var_os("NO_COLOR").is_some() {
        return Style::plain();
    }
    Style::for_theme(PreferenceStore::new(root.store()).get::<Theme>())
}

fn resolve_day(input: &str) -> Result<chrono::NaiveDate, SkillogError> {
    Ok(DayRef::parse(input)?.resolve(Utc::now().date_naive()))
}

fn report(transition: Transition) {
    match transition {
        Transition::Applied(entries) => {
            println!("{} entr{} in log", entries.len(), if entries.len() == 1 { "y" } else { "ies" })
        }
        Transition::NothingToUndo => println!("Nothing to undo"),
        Transition::NothingToRedo => println!("Nothing to redo"),
        Transition::NoMatch(id) => println!("No entry with id {}; nothing changed", id),
    }
}

fn run(cli: Cli) -> Result<(), SkillogError> {
    let Some(command) = cli.command else {
        println!("skillog - Practice session log");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init {
            path,
            default_category,
        } => {
            let category = Category::from_str(&default_category).map_err(SkillogError::Config)?;
            let root = InitService::execute(&path, category)?;
            println!("Initialized skillog at {}", root.root.display());
            Ok(())
        }
        Commands::Add {
            skill,
            hours,
            category,
            notes,
        } => {
            let root = LogRoot::discover()?;
            let config = root.load_config()?;
            let category = match category {
                Some(c) => Category::from_str(&c).map_err(SkillogError::Validation)?,
                None => config.default_category,
            };

            let mut draft = EntryDraft::new(skill, hours).category(category);
            if let Some(notes) = notes {
                draft = draft.notes(notes);
            }
            let entry = draft.into_entry(Utc::now())?;
            let id = entry.id.clone();

            let mut manager = HistoryManager::with_options(root.store(), HistoryOptions::from(&config));
            manager.add(entry)?;
            println!("Added {}", id);
            Ok(())
        }
        Commands::Remove { id } => {
            let root = LogRoot::discover()?;
            let mut manager = open_manager(&root)?;
            match manager.remove(&id)? {
                Transition::Applied(_) => {
                    println!("Removed {}", id);
                    Ok(())
                }
                Transition::NoMatch(id) => Err(SkillogError::EntryNotFound(id)),
                other => {
                    report(other);
                    Ok(())
                }
            }
        }
        Commands::Undo => {
            let root = LogRoot::discover()?;
            report(open_manager(&root)?.undo()?);
            Ok(())
        }
        Commands::Redo => {
            let root = LogRoot::discover()?;
            report(open_manager(&root)?.redo()?);
            Ok(())
        }
        Commands::Today { date, ids } => {
            let root = LogRoot::discover()?;
            let day = resolve_day(&date)?;
            let manager = open_manager(&root)?;
            print!("{}", format_day(&manager.list_for_date(day), ids, style_for(&root)));
            Ok(())
        }
        Commands::List => {
            let root = LogRoot::discover()?;
            let manager = open_manager(&root)?;
            print!("{}", format_entry_list(manager.list_all()));
            Ok(())
        }
        Commands::Summary { date } => {
            let root = LogRoot::discover()?;
            let day = resolve_day(&date)?;
            let entries = open_manager(&root)?.list_for_date(day);

            let summary = HeuristicSummarizer.summarize(&entries);
            let stats = DailyStats::from_entries(&entries);
            print!("{}", format_summary(&summary, &stats, style_for(&root)));
            Ok(())
        }
        Commands::Theme { value } => {
            let root = LogRoot::discover()?;
            let prefs = PreferenceStore::new(root.store());
            match value {
                Some(v) => {
                    let theme = Theme::from_str(&v).map_err(SkillogError::Config)?;
                    prefs.set(&theme)?;
                    println!("Set theme = {}", theme);
                }
                None => println!("{}", prefs.get::<Theme>()),
            }
            Ok(())
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("This deletes every entry and all undo history.");
                println!("Run 'skillog reset --yes' to confirm.");
                return Ok(());
            }
            let root = LogRoot::discover()?;
            open_manager(&root)?.reset()?;
            println!("Log cleared");
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let root = LogRoot::discover()?;
            let service = ConfigService::new(root);

            if list {
                let config = service.list()?;
                println!(
                    "history_limit = {}",
                    config
                        .history_limit
                        .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
                );
                println!("record_noop_removals = {}", config.record_noop_removals);
                println!("default_category = {}", config.default_category);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: skillog config [--list | <key> [<value>]]");
                println!("Valid keys: history_limit, record_noop_removals, default_category");
                Ok(())
            }
        }
    }
}
