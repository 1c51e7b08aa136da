use std::io::Write;
use std::str::FromStr;

use scriptvocab_types::AuthUser;
use scriptvocab_ui::{ConfirmPrompt, ViewerError};

use super::DictionarySession;
use super::remove_records::spawn_removal;

pub const HELP: &str = "\
Commands:
  edit              select records for deletion
  toggle <word>     select or unselect a record
  remove            delete the selected records
  cancel            leave edit mode
  login <user>      sign in
  logout            sign out
  show              redraw the dictionary
  help              show this help
  quit              exit";

/// A line typed on the dictionary screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Edit,
    Toggle(String),
    Remove,
    Cancel,
    Login(String),
    Logout,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type `help` for a list.")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),
}

impl FromStr for UiCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, arg) = match s.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (s, ""),
        };

        let required = |usage: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument(usage))
            } else {
                Ok(arg.to_string())
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "edit" => Ok(Self::Edit),
            "toggle" | "t" => required("toggle <word>").map(Self::Toggle),
            "remove" | "rm" => Ok(Self::Remove),
            "cancel" => Ok(Self::Cancel),
            "login" => required("login <user>").map(Self::Login),
            "logout" => Ok(Self::Logout),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn handle_command<W: Write + Send>(
    session: &mut DictionarySession<W>,
    command: UiCommand,
    prompt: &mut dyn ConfirmPrompt,
) -> anyhow::Result<Flow> {
    match command {
        UiCommand::Edit => {
            if session.viewer.enter_edit_mode() {
                session.render()?;
            } else {
                writeln!(session.out, "Nothing to edit.")?;
            }
        }
        UiCommand::Toggle(id) => match session.viewer.toggle_record(&id) {
            Ok(_) => session.render()?,
            Err(e) => writeln!(session.out, "{e}")?,
        },
        UiCommand::Cancel => {
            session.viewer.cancel_edit_mode();
            session.render()?;
        }
        UiCommand::Remove => match session.viewer.request_removal(prompt).await {
            Ok(Some(request)) => {
                writeln!(session.out, "Removing {} records...", request.ids.len())?;
                session.in_flight += 1;
                spawn_removal(
                    session.state.store.clone(),
                    request,
                    session.events_tx.clone(),
                );
            }
            Ok(None) => {}
            Err(ViewerError::MissingIdentity) => {}
            Err(e) => writeln!(session.out, "{e}")?,
        },
        UiCommand::Login(user) => session.state.auth.sign_in(AuthUser::new(user)),
        UiCommand::Logout => session.state.auth.sign_out(),
        UiCommand::Show => session.render()?,
        UiCommand::Help => writeln!(session.out, "{HELP}")?,
        UiCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}
