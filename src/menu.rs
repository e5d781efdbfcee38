//! Interactive console menu.
//! Reads one selection per iteration and dispatches to the matching
//! demo handler; interpretation of input is kept pure so it can be
//! tested without a terminal.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{
    config::DemoConfig, errors::StoreResult, handlers::demo_handlers,
    services::session::StoreSession,
};

/// What one line of menu input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateDeleteContainer,
    RoundTripBlob,
    MultipartUpload,
    ProviderStub,
    Exit,
    Invalid,
}

/// Map a parsed selection to its operation.
///
/// Total over `i64`: anything outside the menu maps to
/// [`Operation::Invalid`]. Selection 5 is an accepted alias for the
/// provider option.
pub fn interpret(selection: i64) -> Operation {
    match selection {
        1 => Operation::CreateDeleteContainer,
        2 => Operation::RoundTripBlob,
        3 => Operation::MultipartUpload,
        4 | 5 => Operation::ProviderStub,
        9 => Operation::Exit,
        _ => Operation::Invalid,
    }
}

/// Interpret one raw input line. Non-numeric input is an invalid
/// selection, not an error.
pub fn interpret_line(line: &str) -> Operation {
    match line.trim().parse::<i64>() {
        Ok(selection) => interpret(selection),
        Err(_) => Operation::Invalid,
    }
}

fn print_menu() -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout)?;
    writeln!(stdout, "Object storage demo")?;
    writeln!(stdout, "1. Create and delete a container")?;
    writeln!(stdout, "2. Create a container, put and retrieve a blob")?;
    writeln!(stdout, "3. Multipart upload")?;
    writeln!(stdout, "4. Provider-specific API")?;
    writeln!(stdout, "9. Exit")?;
    write!(stdout, "Choose an option: ")?;
    stdout.flush()
}

/// Drive the menu until the user exits or stdin closes.
///
/// Operation errors propagate out of the loop; the session is released
/// by the caller's drop on every path.
pub async fn run(session: &StoreSession, config: &DemoConfig) -> StoreResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_menu()?;
        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed, leaving the menu");
            break;
        };
        match interpret_line(&line) {
            Operation::CreateDeleteContainer => {
                demo_handlers::create_delete_container(session, config).await?;
            }
            Operation::RoundTripBlob => {
                demo_handlers::round_trip_blob(session, config).await?;
            }
            Operation::MultipartUpload => {
                demo_handlers::multipart_upload(session, config).await?;
            }
            Operation::ProviderStub => demo_handlers::provider_api(),
            Operation::Exit => {
                debug!("exit selected");
                break;
            }
            Operation::Invalid => println!("Not a valid option"),
        }
    }
    Ok(())
}
