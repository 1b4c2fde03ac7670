//! Line-oriented host for the registration page.
//!
//! Each stdin line is one user interaction: typing into a field, ticking a
//! box, leaving a field, or clicking submit/edit/delete. Delete asks for a
//! y/n answer on the same input before continuing.

use anyhow::{anyhow, bail, Context, Result};
use application::RegistrationApp;
use frontend::document::{ALERT_VIEW, USER_LIST};
use frontend::{Confirmation, DeleteOutcome, FieldId, FormController, SubmitOutcome};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

pub type SharedInput = Rc<RefCell<Box<dyn BufRead>>>;

pub const HELP: &str = "\
commands:
  set <field> <value>        type into fname|lname|email|birthday|state|password|confirm-password
  check <gender|hobby> <v>   select a radio option or tick a checkbox
  uncheck hobby <v>          untick a checkbox
  blur <field>               leave a field and validate it
  submit                     validate everything and add or update
  edit <id>                  load a card into the form
  delete <id>                delete a card (asks for confirmation)
  reset                      clear the form
  show | list | dump         print the form, the cards, or the store as JSON
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FieldId, String),
    Check(FieldId, String),
    Uncheck(FieldId, String),
    Blur(FieldId),
    Submit,
    Edit(String),
    Delete(String),
    Reset,
    Show,
    List,
    Dump,
    Help,
    Quit,
}

fn field(name: Option<&str>) -> Result<FieldId> {
    let name = name.ok_or_else(|| anyhow!("missing field name"))?;
    name.parse::<FieldId>().map_err(|err| anyhow!(err))
}

fn argument(value: Option<&str>, what: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => bail!("missing {what}"),
    }
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let mut args = rest.trim_start().splitn(2, ' ');
    let first = args.next().filter(|arg| !arg.is_empty());
    let remainder = args.next();

    let command = match verb {
        "set" => Command::Set(field(first)?, remainder.unwrap_or("").to_string()),
        "check" => Command::Check(field(first)?, argument(remainder, "option value")?),
        "uncheck" => Command::Uncheck(field(first)?, argument(remainder, "option value")?),
        "blur" => Command::Blur(field(first)?),
        "submit" => Command::Submit,
        "edit" => Command::Edit(argument(first, "record id")?),
        "delete" => Command::Delete(argument(first, "record id")?),
        "reset" => Command::Reset,
        "show" => Command::Show,
        "list" => Command::List,
        "dump" => Command::Dump,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command: {other} (try `help`)"),
    };
    Ok(Some(command))
}

/// Reads the next line, `None` at end of input.
pub fn read_line(input: &SharedInput) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .borrow_mut()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok((read > 0).then_some(line))
}

/// Asks on stdout and waits for a y/n line on the shared input.
pub struct TerminalConfirmation {
    input: SharedInput,
}

impl TerminalConfirmation {
    pub fn new(input: SharedInput) -> Self {
        Self { input }
    }
}

impl Confirmation for TerminalConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if let Err(err) = std::io::stdout().flush() {
            warn!(error = %err, "Could not flush prompt");
        }

        match read_line(&self.input) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "Confirmation answer unreadable");
                false
            }
        }
    }
}

async fn show_banner(controller: &FormController, out: &mut dyn Write) -> Result<()> {
    let banner = controller.banner();
    tokio::time::sleep(banner.show_delay()).await;
    if let Some(message) = banner.visible_at(Instant::now()) {
        writeln!(out, "[{ALERT_VIEW}] {message}")?;
    }
    Ok(())
}

fn print_list(controller: &FormController, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "[{USER_LIST}]")?;
    writeln!(out, "{}", controller.list())?;
    Ok(())
}

/// Applies one command. Returns `false` when the session should end.
pub async fn apply(
    controller: &mut FormController,
    command: Command,
    out: &mut dyn Write,
) -> Result<bool> {
    debug!(?command, "Applying command");
    match command {
        Command::Set(field, value) => {
            if !controller.document_mut().set_value(field, &value) {
                writeln!(out, "{field} is not a text field")?;
            }
        }
        Command::Check(field, value) => {
            if !controller.document_mut().check(field, &value) {
                writeln!(out, "{field} has no option {value}")?;
            }
        }
        Command::Uncheck(field, value) => {
            if !controller.document_mut().uncheck(field, &value) {
                writeln!(out, "{field} has no option {value}")?;
            }
        }
        Command::Blur(field) => {
            if !controller.blur(field) {
                writeln!(out, "{}", controller.document().error_text(field))?;
            }
        }
        Command::Submit => match controller.submit() {
            SubmitOutcome::Invalid => {
                for control in controller.document().controls() {
                    if control.error.flagged {
                        writeln!(out, "{}", control.error.text)?;
                    }
                }
            }
            SubmitOutcome::Added(_) | SubmitOutcome::Updated(_) => {
                show_banner(controller, out).await?;
                print_list(controller, out)?;
            }
        },
        Command::Edit(id) => {
            if controller.edit(&id) {
                if controller.document_mut().take_scroll_request() {
                    writeln!(out, "{}", controller.document())?;
                }
            } else {
                writeln!(out, "no user with id {id}")?;
            }
        }
        Command::Delete(id) => match controller.delete(&id) {
            DeleteOutcome::Deleted => {
                show_banner(controller, out).await?;
                print_list(controller, out)?;
            }
            DeleteOutcome::Declined => writeln!(out, "kept {id}")?,
            DeleteOutcome::NotFound => writeln!(out, "no user with id {id}")?,
        },
        Command::Reset => controller.reset(),
        Command::Show => writeln!(out, "{}", controller.document())?,
        Command::List => print_list(controller, out)?,
        Command::Dump => {
            let json = serde_json::to_string_pretty(controller.users().users())
                .context("failed to serialize users")?;
            writeln!(out, "{json}")?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

pub async fn run(app: &mut RegistrationApp, input: SharedInput, out: &mut dyn Write) -> Result<()> {
    print_list(&app.controller, out)?;
    loop {
        write!(out, "> ")?;
        out.flush().context("failed to flush output")?;

        let Some(line) = read_line(&input)? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if !apply(&mut app.controller, command, out).await? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use config::Config;
    use mockable::Clock;
    use rstest::{fixture, rstest};
    use std::io::Cursor;
    use std::time::Duration;

    #[test]
    fn parses_field_commands() {
        assert_eq!(
            parse_command("set state New York").unwrap(),
            Some(Command::Set(FieldId::State, "New York".to_string()))
        );
        assert_eq!(
            parse_command("set fname").unwrap(),
            Some(Command::Set(FieldId::FirstName, String::new()))
        );
        assert_eq!(
            parse_command("check hobby music").unwrap(),
            Some(Command::Check(FieldId::Hobby, "music".to_string()))
        );
        assert_eq!(
            parse_command("blur confirm-password").unwrap(),
            Some(Command::Blur(FieldId::ConfirmPassword))
        );
    }

    #[test]
    fn parses_actions_and_blank_lines() {
        assert_eq!(parse_command("  \n").unwrap(), None);
        assert_eq!(parse_command("submit").unwrap(), Some(Command::Submit));
        assert_eq!(
            parse_command("delete abc123xyz").unwrap(),
            Some(Command::Delete("abc123xyz".to_string()))
        );
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("set nickname Bob").is_err());
        assert!(parse_command("edit").is_err());
        assert!(parse_command("check gender").is_err());
    }

    #[test]
    fn confirmation_reads_answer_from_shared_input() {
        let input: SharedInput = Rc::new(RefCell::new(Box::new(Cursor::new("y\nno\n"))));
        let mut confirmation = TerminalConfirmation::new(input);

        assert!(confirmation.confirm("Delete?"));
        assert!(!confirmation.confirm("Delete?"));
        assert!(!confirmation.confirm("Delete?"));
    }

    const FILL_ANNA: &str = "\
set fname Anna
set lname Lee
set email a@b.com
set birthday 2000-01-01
set state Maine
check gender female
check hobby music
set password Abcdef1!
set confirm-password Abcdef1!
";

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            let noon = NaiveDate::from_ymd_opt(2026, 10, 19)
                .and_then(|date| date.and_hms_opt(12, 0, 0))
                .expect("valid fixture time");
            Local
                .from_local_datetime(&noon)
                .single()
                .expect("unambiguous fixture time")
        }

        fn utc(&self) -> DateTime<Utc> {
            self.local().with_timezone(&Utc)
        }
    }

    struct Session {
        app: RegistrationApp,
        input: SharedInput,
    }

    impl Session {
        /// Runs `script` through the command loop and returns what was printed.
        async fn run(&mut self, script: &str) -> String {
            let script: Box<dyn BufRead> = Box::new(Cursor::new(script.to_string()));
            *self.input.borrow_mut() = script;
            let mut out = Vec::new();
            run(&mut self.app, self.input.clone(), &mut out)
                .await
                .expect("session runs");
            String::from_utf8(out).expect("utf-8 output")
        }

        async fn add_anna(&mut self) -> String {
            self.run(&format!("{FILL_ANNA}submit\n")).await;
            let users = self.app.controller.users().users();
            assert_eq!(users.len(), 1);
            users[0].id.clone()
        }
    }

    #[fixture]
    fn session() -> Session {
        let input: SharedInput = Rc::new(RefCell::new(Box::new(Cursor::new(String::new()))));
        let config = Config {
            banner_show_delay: Duration::ZERO,
            ..Config::default()
        };
        let confirmation = TerminalConfirmation::new(input.clone());
        let app = RegistrationApp::with_clock(&config, Box::new(FixtureClock), Box::new(confirmation));
        Session { app, input }
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_submit_prints_every_flagged_field(mut session: Session) {
        let out = session.run("set fname Anna\nsubmit\nquit\n").await;

        assert!(out.contains("Last name is required."));
        assert!(out.contains("Email is required."));
        assert!(out.contains("Birthday is required."));
        assert!(out.contains("Gender is required."));
        assert!(!out.contains("First name"));
        assert!(session.app.controller.users().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn valid_submit_announces_and_lists_the_card(mut session: Session) {
        let out = session.run(&format!("{FILL_ANNA}submit\n")).await;

        assert!(out.contains("[alert-view] User added successfully."));
        assert!(out.contains("#1 Anna Lee"));
        assert_eq!(session.app.controller.users().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reads_its_answer_from_the_command_stream(mut session: Session) {
        let id = session.add_anna().await;

        let out = session.run(&format!("delete {id}\nn\nlist\n")).await;
        assert!(out.contains(&format!("kept {id}")));
        assert_eq!(session.app.controller.users().len(), 1);

        let out = session.run(&format!("delete {id}\ny\n")).await;
        assert!(out.contains("[alert-view] User deleted successfully."));
        assert!(out.contains("No data found."));
        assert!(session.app.controller.users().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn edit_prints_the_populated_form_once(mut session: Session) {
        let id = session.add_anna().await;

        let out = session.run(&format!("edit {id}\n")).await;
        assert!(out.contains("fname = \"Anna\""));
        assert!(out.contains("[x] female"));
        assert!(out.contains("<update-btn> Update"));
        assert!(!session.app.controller.document_mut().take_scroll_request());

        let out = session.run("edit nobody\n").await;
        assert!(out.contains("no user with id nobody"));
    }

    #[rstest]
    #[tokio::test]
    async fn dump_prints_the_store_as_json(mut session: Session) {
        let id = session.add_anna().await;

        let mut out = Vec::new();
        let keep_going = apply(&mut session.app.controller, Command::Dump, &mut out)
            .await
            .unwrap();
        let users: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert!(keep_going);
        assert_eq!(users[0]["id"], id.as_str());
        assert_eq!(users[0]["firstName"], "Anna");
        assert_eq!(users[0]["gender"], "female");
        assert_eq!(users[0]["hobbies"], serde_json::json!(["music"]));
    }

    #[rstest]
    #[tokio::test]
    async fn quit_ends_the_session(mut session: Session) {
        let mut out = Vec::new();
        let keep_going = apply(&mut session.app.controller, Command::Quit, &mut out)
            .await
            .unwrap();

        assert!(!keep_going);
        assert!(out.is_empty());
    }
}
