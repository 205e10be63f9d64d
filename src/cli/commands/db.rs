use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RecordStore;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::AppResult;
use crate::export::ExportSink;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        // opened without initialize() so --migrate shows what it does
        let store = RecordStore::open(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(store.conn())?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        } else {
            store.initialize()?;
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(store.conn(), &cfg.database)?;

            let sink = ExportSink::new(&cfg.ledger);
            match sink.row_count() {
                Ok(n) => println!("{}• Ledger:{} {} ({} rows)\n", CYAN, RESET, cfg.ledger, n),
                Err(e) => println!("{}• Ledger:{} {}unreadable: {}{}\n", CYAN, RESET, RED, e, RESET),
            }
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = store
                .conn()
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            // the ledger is only best-effort, so drift is reported, not fixed
            let stored = store.count()?;
            let sink = ExportSink::new(&cfg.ledger);
            match sink.row_count() {
                Ok(n) if n as i64 == stored => {
                    println!("{}✔ Ledger in sync ({} rows).{}\n", GREEN, n, RESET)
                }
                Ok(n) => println!(
                    "{}⚠ Ledger has {} rows, database has {} marks.{}\n",
                    YELLOW, n, stored, RESET
                ),
                Err(e) => println!("{}✘ Ledger unreadable:{} {}\n", RED, RESET, e),
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.conn().execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
