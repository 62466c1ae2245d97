//! Interactive driver: read keys from stdin, insert them, print the tree.
//!
//! ```text
//! $ echo "10 20 5 6 12 30 7 17 -1" | btree-shell --max-keys 2
//! { [10,] }
//! { [6,] } { [20,] }
//! { [5,] } { [7,] } { [12,] [17,] } { [30,] }
//! ```

use std::error::Error;
use std::io::{self, BufRead, Write};

use btree_index::{BTree, BTreeConfig, DEFAULT_MAX_KEYS};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Key that ends input, as typed at the prompt.
const SENTINEL: i64 = -1;

#[derive(Parser, Debug)]
#[command(
    name = "btree-shell",
    version,
    about = "Load integer keys into a B-tree and print it level by level"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_KEYS,
        help = "Maximum entries per node (values below 1 are clamped)"
    )]
    max_keys: usize,

    #[arg(
        long,
        value_name = "KEY",
        num_args = 1..,
        help = "Keys to delete after loading, before printing"
    )]
    delete: Vec<i64>,

    #[arg(long, help = "Print structural statistics after the dump")]
    stats: bool,

    #[arg(long, help = "Suppress the input prompt")]
    quiet: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut tree: BTree<i64, String> = BTree::with_config(BTreeConfig::new(cli.max_keys));
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    'input: loop {
        if !cli.quiet {
            write!(stdout, "Enter key to be inserted: ")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        for token in line.split_whitespace() {
            match token.parse::<i64>() {
                Ok(SENTINEL) => break 'input,
                Ok(key) => {
                    if !tree.insert(key, String::new()) {
                        info!(key, "btree_shell.duplicate_ignored");
                    }
                }
                Err(err) => warn!(token, error = %err, "btree_shell.skip_token"),
            }
        }
    }
    if !cli.quiet {
        writeln!(stdout)?;
    }

    for key in &cli.delete {
        if let Err(err) = tree.delete(key) {
            writeln!(io::stderr(), "{}", err)?;
        }
    }

    write!(stdout, "{}", tree)?;
    if cli.stats {
        writeln!(stdout, "{}", tree.stats())?;
    }

    tree.clear();
    Ok(())
}
