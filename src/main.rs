mod terminal;

use application::RegistrationApp;
use config::Config;
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;
use terminal::{SharedInput, TerminalConfirmation};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env(None);

    // Logs go to stderr; stdout carries the page
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    info!(
        show_delay = ?config.banner_show_delay,
        hide_delay = ?config.banner_hide_delay,
        "Starting registration form"
    );

    let stdin: Box<dyn BufRead> = Box::new(std::io::stdin().lock());
    let input: SharedInput = Rc::new(RefCell::new(stdin));
    let confirmation = TerminalConfirmation::new(input.clone());
    let mut app = RegistrationApp::new(&config, Box::new(confirmation));

    let mut stdout = std::io::stdout();
    println!("{}", terminal::HELP);
    terminal::run(&mut app, input, &mut stdout).await?;

    info!(users = app.controller.users().len(), "Registration form closed");
    Ok(())
}
