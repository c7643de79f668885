use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::Result;

use curso::{
    cli::Cli,
    config::{Config, get_app_data_prefix},
    logging,
    segment::split_sections,
    session::Session,
    state::NavState,
    store::SqliteStore,
    structure::Outline,
    ui::reader::Reader,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_from_verbosity(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path.clone()),
        None => Config::new(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            logging::warn(format!(
                "could not load configuration, using defaults: {}",
                err
            ));
            // A path that does not exist yields a default config.
            Config::load_from(PathBuf::new())?
        }
    };

    let root = cli.course.clone().unwrap_or_else(|| PathBuf::from("."));
    let outline = match Outline::load(&root.join("structure.json")) {
        Ok(outline) => Some(outline),
        Err(err) => {
            logging::error(format!("could not load course structure: {}", err));
            None
        }
    };

    if cli.dump {
        return dump_page(&root, outline.as_ref(), cli.page.as_deref());
    }

    let prefix = get_app_data_prefix()?;
    let store = SqliteStore::open(&prefix.join("states.db"))?;
    let nav = NavState::load(Box::new(store));
    let mut session = Session::new(outline, nav, root);

    if let Some(page) = &cli.page {
        session.open(page)?;
    } else if cli.resume
        && let Some(target) = session.resume_target().map(|p| p.full_id.clone())
    {
        session.open(&target)?;
    }

    let mut reader = Reader::new(session, config)?;
    reader.run()
}

/// Print a page's sections to stdout, separated by a marker line.
fn dump_page(root: &Path, outline: Option<&Outline>, page: Option<&str>) -> Result<()> {
    let outline = outline.ok_or_else(|| eyre::eyre!("no course structure loaded"))?;
    let page_id = match page {
        Some(id) => id.to_string(),
        None => outline
            .first_part()
            .map(|p| p.full_id.clone())
            .ok_or_else(|| eyre::eyre!("course has no parts"))?,
    };
    let rel_path = outline
        .page_path(&page_id)
        .ok_or_else(|| eyre::eyre!("unknown page id: {}", page_id))?;
    let text = std::fs::read_to_string(root.join(rel_path))?;

    let sections = split_sections(&text);
    let total = sections.len();
    for (idx, section) in sections.iter().enumerate() {
        println!("--- slide {} of {} ---", idx + 1, total);
        println!("{}", section.trim_end());
    }
    Ok(())
}
