//! # Menu Session
//!
//! The interactive loop that runs after a successful login.
//!
//! ## One Iteration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  clear screen ─► logo ─► menu ─► "> " ─► Command ─► Inventory call      │
//! │       ▲                                                   │             │
//! │       │                                                   ▼             │
//! │  "Press Enter key to continue ...." ◄──────────── user message / table │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `exit` and the end of input leave the loop. Every other outcome, storage
//! failures included, becomes a message and the loop goes on.

use std::io::{self, BufRead, Write};

use stockroom_core::display::format_table;
use stockroom_core::validation::{parse_quantity, parse_unit_price, validate_total};
use stockroom_core::{Product, SortOrder, ValidationError};
use stockroom_db::{DbError, DbResult, Inventory, RecordStore};
use tracing::{debug, error, info};

use crate::error::CliResult;
use crate::menu::{logo, manual, menu_items, Command};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const CONTINUE_PROMPT: &str = "\nPress Enter key to continue ....";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user typed `exit`.
    Exit,
    /// The input stream ended.
    EndOfInput,
}

enum Step {
    Continue,
    EndOfInput,
}

/// Reads one line without its line terminator. `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Menu loop over an inventory, reading from `R` and writing to `W`.
pub struct Session<S, R, W> {
    inventory: Inventory<S>,
    input: R,
    output: W,
}

impl<S, R, W> Session<S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub fn new(inventory: Inventory<S>, input: R, output: W) -> Self {
        Session {
            inventory,
            input,
            output,
        }
    }

    /// Gives back the inventory and the streams.
    pub fn into_parts(self) -> (Inventory<S>, R, W) {
        (self.inventory, self.input, self.output)
    }

    /// Runs until `exit` or the end of input.
    pub async fn run(&mut self) -> CliResult<SessionOutcome> {
        info!("Session started");

        loop {
            write!(self.output, "{}", CLEAR_SCREEN)?;
            writeln!(self.output, "{}", logo())?;
            writeln!(self.output, "{}", menu_items())?;

            let Some(line) = self.prompt("> ")? else {
                return Ok(self.finish(SessionOutcome::EndOfInput));
            };

            let step = match line.parse::<Command>() {
                Ok(Command::Exit) => {
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(self.finish(SessionOutcome::Exit));
                }
                Ok(command) => {
                    debug!(command = %command, "Dispatching");
                    self.dispatch(command).await?
                }
                Err(_) => {
                    debug!(input = %line, "Unknown command");
                    writeln!(self.output, "Wrong choice!!")?;
                    Step::Continue
                }
            };

            if let Step::EndOfInput = step {
                return Ok(self.finish(SessionOutcome::EndOfInput));
            }

            if self.prompt(CONTINUE_PROMPT)?.is_none() {
                return Ok(self.finish(SessionOutcome::EndOfInput));
            }
        }
    }

    fn finish(&self, outcome: SessionOutcome) -> SessionOutcome {
        info!(?outcome, "Session ended");
        outcome
    }

    async fn dispatch(&mut self, command: Command) -> CliResult<Step> {
        match command {
            Command::Add => return self.add().await,
            Command::Remove => return self.remove().await,
            Command::Search => return self.search().await,
            Command::Show => {
                let products = self.inventory.list().await;
                self.render_table(products)?;
            }
            Command::SortAsc => {
                let products = self.inventory.sorted(SortOrder::Ascending).await;
                self.render_table(products)?;
            }
            Command::SortDec => {
                let products = self.inventory.sorted(SortOrder::Descending).await;
                self.render_table(products)?;
            }
            Command::Help => writeln!(self.output, "{}", manual())?,
            Command::Clear => write!(self.output, "{}", CLEAR_SCREEN)?,
            Command::Exit => {}
        }
        Ok(Step::Continue)
    }

    async fn add(&mut self) -> CliResult<Step> {
        let Some(name) = self.prompt("Enter product name: ")? else {
            return Ok(Step::EndOfInput);
        };
        let Some(quantity) = self.prompt("Enter number of the products: ")? else {
            return Ok(Step::EndOfInput);
        };
        let Some(unit_price) = self.prompt("Enter price of the product: ")? else {
            return Ok(Step::EndOfInput);
        };

        let numbers = parse_quantity(&quantity).and_then(|quantity| {
            let unit_price = parse_unit_price(&unit_price)?;
            validate_total(quantity, unit_price)?;
            Ok((quantity, unit_price))
        });
        let (quantity, unit_price) = match numbers {
            Ok(numbers) => numbers,
            Err(e) => {
                self.report(&DbError::Validation(e))?;
                return Ok(Step::Continue);
            }
        };

        match self.inventory.add(&name, quantity, unit_price).await {
            Ok(_) => writeln!(self.output, "Product added successfully.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(Step::Continue)
    }

    async fn remove(&mut self) -> CliResult<Step> {
        let Some(name) = self.prompt("Product name: ")? else {
            return Ok(Step::EndOfInput);
        };

        match self.inventory.remove(&name).await {
            Ok(product) => writeln!(self.output, "{} deleted successfully.", product.name)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Step::Continue)
    }

    async fn search(&mut self) -> CliResult<Step> {
        let Some(name) = self.prompt("Product name: ")? else {
            return Ok(Step::EndOfInput);
        };

        match self.inventory.search(&name).await {
            Ok(product) => writeln!(self.output, "{}", product)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Step::Continue)
    }

    fn render_table(&mut self, products: DbResult<Vec<Product>>) -> CliResult<()> {
        match products {
            Ok(products) => write!(self.output, "{}", format_table(&products))?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Prints the user-facing message for a failed operation.
    fn report(&mut self, err: &DbError) -> io::Result<()> {
        let message = match err {
            DbError::AlreadyExists { .. } => "Product already exists!".to_string(),
            DbError::NotFound { .. } => "Product not found!!".to_string(),
            DbError::Validation(
                ValidationError::InvalidNumber { .. }
                | ValidationError::Negative { .. }
                | ValidationError::TooLarge { .. },
            ) => "Error, please enter a valid number.".to_string(),
            DbError::Validation(v) => format!("Error, {}.", v),
            storage => {
                error!(error = %storage, "Operation failed");
                "Some problem happened. Look at log file.".to_string()
            }
        };
        writeln!(self.output, "{}", message)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        read_line(&mut self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stockroom_db::FileStore;

    struct Run {
        outcome: SessionOutcome,
        output: String,
        inventory: Inventory<FileStore>,
        path: PathBuf,
    }

    impl Run {
        async fn cleanup(self) {
            let _ = tokio::fs::remove_file(&self.path).await;
        }
    }

    async fn run_script(script: &'static str) -> Run {
        let path = std::env::temp_dir().join(format!("stockroom-cli-{}.txt", uuid::Uuid::new_v4()));
        let inventory = Inventory::new(FileStore::new(&path));
        let mut session = Session::new(inventory, script.as_bytes(), Vec::new());

        let outcome = session.run().await.unwrap();
        let (inventory, _, output) = session.into_parts();
        Run {
            outcome,
            output: String::from_utf8(output).unwrap(),
            inventory,
            path,
        }
    }

    #[test]
    fn test_read_line() {
        let mut input = "one\r\ntwo\n\nthree".as_bytes();
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("one"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("two"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some(""));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("three"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_show_exit() {
        let run = run_script("add\nwidget\n4\n10\n\nshow\n\nexit\n").await;

        assert_eq!(run.outcome, SessionOutcome::Exit);
        assert!(run.output.contains("Product added successfully."));
        assert!(run.output.contains("widget              4         $10\t$40"));
        assert!(run.output.contains("Total number of products: 4"));
        assert!(run.output.contains(CONTINUE_PROMPT));
        assert!(run.output.ends_with("Goodbye.\n"));
        assert_eq!(run.output.matches(CLEAR_SCREEN).count(), 3);

        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let run = run_script("dance\n\nexit\n").await;
        assert!(run.output.contains("Wrong choice!!"));
        assert_eq!(run.outcome, SessionOutcome::Exit);
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_exit_alias() {
        let run = run_script("q\n").await;
        assert_eq!(run.outcome, SessionOutcome::Exit);
        assert!(run.output.ends_with("Goodbye.\n"));
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let run = run_script("").await;
        assert_eq!(run.outcome, SessionOutcome::EndOfInput);
        assert!(run.output.contains("Menu items:"));

        let run = run_script("add\npen\n").await;
        assert_eq!(run.outcome, SessionOutcome::EndOfInput);
        assert!(run.inventory.list().await.unwrap().is_empty());
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_duplicate_remove_and_search_messages() {
        let run = run_script(concat!(
            "add\nx\n1\n1\n\n",
            "add\nX\n2\n2\n\n",
            "search\nx\n\n",
            "remove\nx\n\n",
            "remove\nx\n\n",
            "search\nx\n\n",
        ))
        .await;

        assert_eq!(run.outcome, SessionOutcome::EndOfInput);
        assert!(run.output.contains("Product already exists!"));
        assert!(run.output.contains("Name: x\nQuantity: 1\nPrice: $1\nTotal Price: $1"));
        assert!(run.output.contains("x deleted successfully."));
        assert_eq!(run.output.matches("Product not found!!").count(), 2);
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_bad_numbers_are_rejected() {
        let run = run_script("add\npen\nabc\n3\n\nadd\npen\n1\n-1\n\n").await;

        assert_eq!(
            run.output.matches("Error, please enter a valid number.").count(),
            2
        );
        assert!(run.inventory.list().await.unwrap().is_empty());
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_overflowing_total_is_rejected() {
        let run = run_script("add\nbig\n9223372036854775807\n2\n\n").await;

        assert!(run.output.contains("Error, please enter a valid number."));
        assert!(run.inventory.list().await.unwrap().is_empty());
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let run = run_script("add\n   \n1\n1\n\n").await;
        assert!(run.output.contains("Error, name is required."));
        run.cleanup().await;
    }

    #[tokio::test]
    async fn test_sorted_views() {
        let run = run_script(concat!(
            "add\nbanana\n1\n1\n\n",
            "add\napple\n1\n1\n\n",
            "add\ncherry\n1\n1\n\n",
            "sort dec\n\n",
            "exit\n",
        ))
        .await;

        let table = run.output.rsplit("Product Name").next().unwrap();
        let cherry = table.find("cherry").unwrap();
        let banana = table.find("banana").unwrap();
        let apple = table.find("apple").unwrap();
        assert!(cherry < banana && banana < apple);
        run.cleanup().await;
    }
}
