use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for qrattend
#[derive(Parser)]
#[command(
    name = "qrattend",
    version = env!("CARGO_PKG_VERSION"),
    about = "QR badge attendance tracker: one mark per student per day, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the scanning-station ledger (CSV) path
    #[arg(global = true, long = "ledger")]
    pub ledger: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize configuration, database and ledger
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Scanning-station loop: read decoded badge payloads, one per line
    Scan {
        /// Read payloads from FILE instead of stdin
        #[arg(long, value_name = "FILE")]
        file: Option<String>,
    },

    /// Record a single decoded badge payload
    Mark {
        /// Payload text, e.g. "ID: S1, Name: Alice"
        payload: String,
    },

    /// Print the payload text to encode in a student's QR badge
    Payload {
        student_id: String,

        name: String,

        #[arg(long, help = "Emit the old 'ID: <id>, Name: <name>' text form")]
        legacy: bool,
    },

    /// List attendance records
    List {
        #[arg(long, value_name = "YYYY-MM-DD", help = "Only records of this day")]
        date: Option<String>,

        #[arg(long = "today", conflicts_with = "date", help = "Only today's records")]
        today: bool,

        #[arg(
            long,
            default_value = "timestamp",
            help = "Sort column: order_id, student_id, name, timestamp"
        )]
        sort: String,

        #[arg(long, default_value = "asc", help = "Sort direction: asc or desc")]
        order: String,
    },

    /// Find every attendance record of one student
    Search { student_id: String },

    /// Export attendance records to a file
    Export {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Only records of this day")]
        date: Option<String>,

        #[arg(long, default_value = "order_id")]
        sort: String,

        #[arg(long, default_value = "asc")]
        order: String,

        #[arg(long, short = 'f', help = "Overwrite FILE without asking")]
        force: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(
            long = "check",
            help = "Check database integrity and ledger consistency"
        )]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
