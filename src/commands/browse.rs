//! Interactive details view driven by line commands.

use crate::catalog::{CatalogApi, CatalogClient, ProductId};
use crate::config::Config;
use crate::format::Formatter;
use crate::view::{Session, ViewStatus};
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const HELP: &str = "Commands: + (more), - (less), open <id>, similar <n>, back, help, q";

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Increase,
    Decrease,
    Open(ProductId),
    /// 1-based position in the similar products list.
    Similar(usize),
    Back,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match (cmd, arg) {
            ("+", "") | ("plus", "") => Input::Increase,
            ("-", "") | ("minus", "") => Input::Decrease,
            ("open", id) => match id.parse() {
                Ok(id) => Input::Open(id),
                Err(_) => Input::Unknown(line.to_string()),
            },
            ("similar", n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Input::Similar(n),
                _ => Input::Unknown(line.to_string()),
            },
            ("back", "") => Input::Back,
            ("help", "") | ("?", "") => Input::Help,
            ("q", "") | ("quit", "") | ("exit", "") => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }
}

/// How a browse session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseExit {
    Quit,
    /// The user asked to return to the listing at this route.
    Listing(String),
    Interrupted,
}

/// Runs an interactive details view.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Browses starting at `id`, reading commands from stdin.
    pub async fn execute(&self, id: ProductId) -> Result<BrowseExit> {
        let client = CatalogClient::new(&self.config, Arc::new(self.config.credentials()))
            .context("Failed to create HTTP client")?;

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run(Arc::new(client), id, stdin, &mut stdout).await
    }

    /// Drives the session with the given input and output (for testing).
    ///
    /// Input is only read once the current fetch has settled: the loading
    /// view offers no controls.
    pub async fn run<R, W>(
        &self,
        api: Arc<dyn CatalogApi>,
        id: ProductId,
        input: R,
        out: &mut W,
    ) -> Result<BrowseExit>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let formatter = Formatter::new(self.config.format);
        let mut session = Session::new(api, self.config.listing_route.clone());
        let mut lines = input.lines();

        info!("Browsing from product: {}", id);
        session.navigate(id);
        render(&formatter, &session, out)?;

        loop {
            while session.page().status() == ViewStatus::Loading {
                tokio::select! {
                    update = session.next_update() => {
                        if update.is_none() {
                            break;
                        }
                        render(&formatter, &session, out)?;
                    }
                    _ = tokio::signal::ctrl_c() => return Ok(BrowseExit::Interrupted),
                }
            }

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                return Ok(BrowseExit::Quit);
            };

            let input = Input::parse(&line);
            debug!("Input: {:?}", input);

            match input {
                Input::Increase | Input::Decrease => {
                    if session.page().status() != ViewStatus::Success {
                        writeln!(out, "No product loaded.")?;
                        continue;
                    }
                    if input == Input::Increase {
                        session.page_mut().increase_quantity();
                    } else {
                        session.page_mut().decrease_quantity();
                    }
                    render(&formatter, &session, out)?;
                }
                Input::Open(id) => {
                    session.navigate(id);
                    render(&formatter, &session, out)?;
                }
                Input::Similar(n) => {
                    let target = session
                        .page()
                        .state()
                        .page()
                        .and_then(|p| p.similar_products.get(n - 1))
                        .map(|p| p.id.clone());

                    match target {
                        Some(id) => {
                            session.navigate(id);
                            render(&formatter, &session, out)?;
                        }
                        None => writeln!(out, "No similar product #{}.", n)?,
                    }
                }
                Input::Back => {
                    let route = session.page().listing_route().to_string();
                    writeln!(out, "Continue shopping at {}", route)?;
                    return Ok(BrowseExit::Listing(route));
                }
                Input::Help => writeln!(out, "{}", HELP)?,
                Input::Quit => return Ok(BrowseExit::Quit),
                Input::Unknown(line) if line.is_empty() => {}
                Input::Unknown(line) => writeln!(out, "Unknown command: {} ({})", line, HELP)?,
            }
        }
    }
}

fn render(formatter: &Formatter, session: &Session, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", formatter.format_view(&session.page().view()))?;
    Ok(())
}
