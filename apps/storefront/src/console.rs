//! # Console Front End
//!
//! Reads typed commands, runs them against the session and redraws.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         run_console                                     │
//! │                                                                         │
//! │   stdin line ──► parse_input ──► commands::* ──► redraw (or "! error")  │
//! │                                                                         │
//! │   watch::changed ──► redraw        (payment confirmed, back to store)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timer-driven transitions arrive on the session's watch channel, so the
//! confirmation screen appears without any input.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use techstore_core::{CheckoutDetails, ProductId};

use crate::commands;
use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::render::{self, Screen};
use crate::state::{SessionHandle, SessionView};

/// One parsed line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Add(ProductId),
    Quantity { id: ProductId, delta: i64 },
    Remove(ProductId),
    ViewCart,
    Shop,
    Checkout,
    Back,
    Method(String),
    Submit(CheckoutDetails),
    Help,
    Quit,
    Blank,
}

/// Parses one line of console input.
///
/// ## Grammar
/// ```text
/// add <id> │ inc <id> │ dec <id> │ qty <id> <delta> │ rm <id>
/// cart │ shop │ checkout │ back │ method <name>
/// submit <name> | <email> | <address> │ help │ quit
/// ```
pub fn parse_input(line: &str) -> Result<Input, ApiError> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let input = match word.to_ascii_lowercase().as_str() {
        "" => Input::Blank,
        "add" => Input::Add(parse_id(rest)?),
        "inc" | "+" => Input::Quantity {
            id: parse_id(rest)?,
            delta: 1,
        },
        "dec" | "-" => Input::Quantity {
            id: parse_id(rest)?,
            delta: -1,
        },
        "qty" => {
            let (id, delta) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| ApiError::validation("Use: qty <id> <delta>"))?;
            let delta = delta
                .trim()
                .trim_start_matches('+')
                .parse::<i64>()
                .map_err(|_| ApiError::validation("Quantity change must be a whole number"))?;
            Input::Quantity {
                id: parse_id(id)?,
                delta,
            }
        }
        "rm" | "remove" => Input::Remove(parse_id(rest)?),
        "cart" => Input::ViewCart,
        "shop" | "products" => Input::Shop,
        "checkout" => Input::Checkout,
        "back" => Input::Back,
        "method" | "pay" if !rest.is_empty() => Input::Method(rest.to_string()),
        "method" | "pay" => return Err(ApiError::validation("Use: method <name>")),
        "submit" => {
            // Missing fields stay blank so the form reports them
            let mut fields = rest.splitn(3, '|').map(str::trim);
            let name = fields.next().unwrap_or_default();
            let email = fields.next().unwrap_or_default();
            let address = fields.next().unwrap_or_default();
            Input::Submit(CheckoutDetails::new(name, email, address))
        }
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown command '{}', type help",
                other
            )))
        }
    };

    Ok(input)
}

fn parse_id(text: &str) -> Result<ProductId, ApiError> {
    text.trim()
        .parse()
        .map_err(|_| ApiError::validation("Product id must be a number"))
}

/// Runs one parsed input against the session.
pub async fn dispatch(session: &SessionHandle, input: Input) -> Result<SessionView, ApiError> {
    match input {
        Input::Add(id) => commands::add_to_cart(session, id).await,
        Input::Quantity { id, delta } => commands::update_quantity(session, id, delta).await,
        Input::Remove(id) => commands::remove_from_cart(session, id).await,
        Input::ViewCart => commands::view_cart(session).await,
        Input::Shop => commands::continue_shopping(session).await,
        Input::Checkout => commands::checkout(session).await,
        Input::Back => commands::back_to_cart(session).await,
        Input::Method(name) => commands::select_payment_method(session, &name).await,
        Input::Submit(details) => commands::submit_payment(session, details).await,
        Input::Help | Input::Quit | Input::Blank => Ok(commands::get_session(session)),
    }
}

/// Console loop. Returns on `quit`, end of input, or when the session stops.
pub async fn run_console<R, W>(
    session: &SessionHandle,
    config: &StorefrontConfig,
    input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut updates = session.subscribe();

    let first = updates.borrow_and_update().clone();
    draw(&mut output, session, config, &first).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Console input closed");
                    break;
                };

                match parse_input(&line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Help) => write_text(&mut output, &render::help()).await?,
                    Ok(Input::Blank) => write_text(&mut output, "> ").await?,
                    Ok(parsed) => match dispatch(session, parsed).await {
                        Ok(_) => {
                            // Latest published state, timer transitions included
                            let view = updates.borrow_and_update().clone();
                            draw(&mut output, session, config, &view).await?;
                        }
                        Err(e) => write_text(&mut output, &format!("! {}\n> ", e.message)).await?,
                    },
                    Err(e) => write_text(&mut output, &format!("! {}\n> ", e.message)).await?,
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    info!("Session closed, leaving console");
                    break;
                }
                let view = updates.borrow_and_update().clone();
                draw(&mut output, session, config, &view).await?;
            }
        }
    }

    write_text(&mut output, "\nThanks for visiting!\n").await
}

async fn draw<W: AsyncWrite + Unpin>(
    output: &mut W,
    session: &SessionHandle,
    config: &StorefrontConfig,
    view: &SessionView,
) -> std::io::Result<()> {
    let screen = Screen::new(view, session.catalog(), config);
    write_text(output, &format!("\n{}> ", screen)).await
}

async fn write_text<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, BufReader};
    use techstore_core::Catalog;
    use techstore_db::{CartRepository, MemoryStore};

    use crate::error::ErrorCode;
    use crate::state::{SessionActor, SessionOptions};

    async fn session() -> SessionHandle {
        SessionActor::start(
            Catalog::default(),
            CartRepository::new(MemoryStore::new()),
            SessionOptions::default(),
        )
        .await
        .unwrap()
    }

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!(parse_input("add 3").unwrap(), Input::Add(3));
        assert_eq!(
            parse_input("  INC 2 ").unwrap(),
            Input::Quantity { id: 2, delta: 1 }
        );
        assert_eq!(
            parse_input("qty 4 +3").unwrap(),
            Input::Quantity { id: 4, delta: 3 }
        );
        assert_eq!(
            parse_input("qty 4 -2").unwrap(),
            Input::Quantity { id: 4, delta: -2 }
        );
        assert_eq!(parse_input("rm 5").unwrap(), Input::Remove(5));
        assert_eq!(parse_input("").unwrap(), Input::Blank);
    }

    #[test]
    fn test_parse_submit_fields() {
        assert_eq!(
            parse_input("submit Ada Lovelace | ada@example.com | 12 Analytical St").unwrap(),
            Input::Submit(CheckoutDetails::new(
                "Ada Lovelace",
                "ada@example.com",
                "12 Analytical St"
            ))
        );
        assert_eq!(
            parse_input("submit Ada").unwrap(),
            Input::Submit(CheckoutDetails::new("Ada", "", ""))
        );
        assert_eq!(
            parse_input("method bank transfer").unwrap(),
            Input::Method("bank transfer".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_input("add laptop").unwrap_err().message,
            "Product id must be a number"
        );
        assert_eq!(
            parse_input("dance").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(parse_input("method").is_err());
        assert!(parse_input("qty 3").is_err());
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let session = session().await;
        let config = StorefrontConfig::default();
        let script = b"add 1\nadd 3\ncart\nadd nine\nquit\nadd 2\n";
        let mut out = Vec::new();

        run_console(&session, &config, BufReader::new(&script[..]), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total: $1498"));
        assert!(text.contains("! Product id must be a number"));
        assert!(text.ends_with("Thanks for visiting!\n"));

        // Input after quit is not run
        assert_eq!(session.view().item_count, 2);
    }

    #[tokio::test]
    async fn test_huge_quantity_keeps_session_alive() {
        let session = session().await;
        let config = StorefrontConfig::default();
        let script = b"add 1\nqty 1 4294967295\nadd 2\ncart\n";
        let mut out = Vec::new();

        run_console(&session, &config, BufReader::new(&script[..]), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("! "));
        assert!(text.contains("[cart: 1000]"));

        let view = session.send(techstore_core::Command::ViewCart).await.unwrap();
        assert_eq!(view.lines[0].quantity, techstore_core::MAX_LINE_QUANTITY);
        assert_eq!(view.item_count, 1000);
    }

    #[tokio::test]
    async fn test_rejected_command_shows_error() {
        let session = session().await;
        let config = StorefrontConfig::default();
        let script = b"add 1\ncheckout\nsubmit Ada | ada@example.com | 1 Main St\n";
        let mut out = Vec::new();

        run_console(&session, &config, BufReader::new(&script[..]), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("! Please select a payment method"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_drawn_without_input() {
        let session = session().await;
        let config = StorefrontConfig::default();
        let (mut keys, console_in) = tokio::io::duplex(4096);
        let (console_out, mut screen) = tokio::io::duplex(64 * 1024);

        let console = {
            let session = session.clone();
            tokio::spawn(async move {
                run_console(&session, &config, BufReader::new(console_in), console_out).await
            })
        };

        let script = b"add 1\ncheckout\nmethod paypal\nsubmit Ada | ada@example.com | 1 Main St\n";
        keys.write_all(script).await.unwrap();

        let mut text = String::new();
        let mut buf = [0u8; 4096];
        while !text.contains("Payment successful!") {
            let n = screen.read(&mut buf).await.unwrap();
            assert!(n > 0, "console closed early");
            text.push_str(&String::from_utf8_lossy(&buf[..n]));
        }
        assert!(text.contains("Processing payment..."));
        assert!(text.contains("Method:  PayPal"));

        keys.write_all(b"quit\n").await.unwrap();
        console.await.unwrap().unwrap();
    }
}
