use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::RecordStore;
use crate::db::log::ttlog_or_warn;
use crate::errors::AppResult;
use crate::export::ExportSink;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the scanning-station ledger header
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.ledger.clone(), cli.test)?;

    println!("⚙️  Initializing qrattend…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &cfg.database);
    println!("🧾 Ledger     : {}", &cfg.ledger);

    let store = RecordStore::open_initialized(&cfg.database)?;
    success(format!("Database initialized at {}", &cfg.database));

    // the ledger is derived data: a failure here must not fail init
    let sink = ExportSink::new(&cfg.ledger);
    if let Err(e) = sink.ensure_initialized() {
        warning(format!("Ledger not initialized: {}", e));
    }

    ttlog_or_warn(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    success("qrattend initialization completed!");
    Ok(())
}
