//! Interactive session: one line per command, UI events printed as they arrive

use chrono::Utc;
use log::{info, warn};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::presentation::error::CommandError;
use crate::presentation::render;
use crate::presentation::state::AppState;
use learnhub_domain::messaging::{Participant, ParticipantRole};
use learnhub_domain::notification::NotificationTemplate;

const PROMPT: &str = "learnhub> ";

const HELP: &str = "\
Commands:
  notifications            list notifications
  read <n|id>              mark a notification read
  read-all                 mark every notification read
  delete <n|id>            delete a notification
  clear                    delete every notification
  simulate <template>      registration | purchase | completion | deadline | message | badge
  conversations            list conversations
  start <handle> <role> <name>
                           start a conversation (role: instructor | tutor | student)
  open <n|id>              show a conversation and mark it read
  send <n|id> <text>       send a message (a reply arrives shortly)
  read-conv <n|id>         mark a conversation read
  read-all-conv            mark every conversation read
  delete-conv <n|id>       delete a conversation
  clear-conv               delete every conversation
  streak                   show the current streak
  heatmap                  show the last 30 days
  theme                    toggle dark mode
  help                     show this help
  quit                     leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Notifications,
    Read(String),
    ReadAll,
    Delete(String),
    Clear,
    Simulate(NotificationTemplate),
    Conversations,
    Start {
        handle: String,
        role: ParticipantRole,
        name: String,
    },
    Open(String),
    Send { conversation: String, text: String },
    ReadConv(String),
    ReadAllConv,
    DeleteConv(String),
    ClearConv,
    Streak,
    Heatmap,
    Theme,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let argument = |name: &str| -> Result<String, CommandError> {
        if rest.is_empty() {
            Err(CommandError::usage(format!("Usage: {} {}", verb, name)))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match verb {
        "notifications" | "n" => SessionCommand::Notifications,
        "read" => SessionCommand::Read(argument("<n|id>")?),
        "read-all" => SessionCommand::ReadAll,
        "delete" => SessionCommand::Delete(argument("<n|id>")?),
        "clear" => SessionCommand::Clear,
        "simulate" => {
            let template = argument("<template>")?.parse::<NotificationTemplate>()?;
            SessionCommand::Simulate(template)
        }
        "conversations" | "c" => SessionCommand::Conversations,
        "start" => {
            let args = argument("<handle> <role> <name>")?;
            let mut parts = args.splitn(3, char::is_whitespace);
            let (Some(handle), Some(role), Some(name)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(CommandError::usage("Usage: start <handle> <role> <name>"));
            };
            SessionCommand::Start {
                handle: handle.to_string(),
                role: role.parse()?,
                name: name.trim().to_string(),
            }
        }
        "open" => SessionCommand::Open(argument("<n|id>")?),
        "send" => {
            let args = argument("<n|id> <text>")?;
            let Some((conversation, text)) = args.split_once(char::is_whitespace) else {
                return Err(CommandError::usage("Usage: send <n|id> <text>"));
            };
            SessionCommand::Send {
                conversation: conversation.to_string(),
                text: text.trim().to_string(),
            }
        }
        "read-conv" => SessionCommand::ReadConv(argument("<n|id>")?),
        "read-all-conv" => SessionCommand::ReadAllConv,
        "delete-conv" => SessionCommand::DeleteConv(argument("<n|id>")?),
        "clear-conv" => SessionCommand::ClearConv,
        "streak" => SessionCommand::Streak,
        "heatmap" => SessionCommand::Heatmap,
        "theme" => SessionCommand::Theme,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => {
            return Err(CommandError::usage(format!(
                "Unknown command '{}', type 'help'",
                other
            )))
        }
    };
    Ok(Some(command))
}

/// Run one command against the session state and return what to print
pub async fn execute(state: &AppState, command: SessionCommand) -> Result<String, CommandError> {
    let notifications = &state.services.notifications;
    let messaging = &state.services.messaging;
    let now = Utc::now();

    let output = match command {
        SessionCommand::Notifications => render::notifications(&notifications.list().await, now),
        SessionCommand::Read(reference) => {
            let id = notifications.resolve(&reference).await?;
            notifications.mark_read(&id).await?;
            format!("Marked read ({} unread)", notifications.unread_count().await)
        }
        SessionCommand::ReadAll => {
            let changed = notifications.mark_all_read().await;
            format!("Marked {} notification(s) read", changed)
        }
        SessionCommand::Delete(reference) => {
            let id = notifications.resolve(&reference).await?;
            notifications.delete(&id).await?;
            "Notification deleted".to_string()
        }
        SessionCommand::Clear => {
            notifications.clear_all().await;
            "All notifications cleared".to_string()
        }
        SessionCommand::Simulate(template) => {
            notifications.simulate(template).await?;
            format!("Simulated '{}' notification", template)
        }
        SessionCommand::Conversations => render::conversations(&messaging.list().await, now),
        SessionCommand::Start { handle, role, name } => {
            let id = messaging
                .start_conversation(Participant::new(&handle, &name, role, ""))
                .await?;
            render::conversation(&messaging.get(&id).await?, now)
        }
        SessionCommand::Open(reference) => {
            let id = messaging.resolve(&reference).await?;
            render::conversation(&messaging.open(&id).await?, now)
        }
        SessionCommand::Send { conversation, text } => {
            let id = messaging.resolve(&conversation).await?;
            let sent = messaging.send_message(&id, &text).await?;
            format!("You: {}", sent.message.text)
        }
        SessionCommand::ReadConv(reference) => {
            let id = messaging.resolve(&reference).await?;
            messaging.mark_read(&id).await?;
            format!("Marked read ({} unread)", messaging.unread_count().await)
        }
        SessionCommand::ReadAllConv => {
            let changed = messaging.mark_all_read().await;
            format!("Marked {} conversation(s) read", changed)
        }
        SessionCommand::DeleteConv(reference) => {
            let id = messaging.resolve(&reference).await?;
            messaging.delete(&id).await?;
            "Conversation deleted".to_string()
        }
        SessionCommand::ClearConv => {
            messaging.clear_all().await;
            "All conversations cleared".to_string()
        }
        SessionCommand::Streak => render::streak(&state.queries.streak.status().await),
        SessionCommand::Heatmap => render::heatmap(
            &state
                .queries
                .streak
                .heatmap(crate::application::queries::HEATMAP_DAYS)
                .await?,
        ),
        SessionCommand::Theme => {
            let theme = state.services.preferences.toggle_theme().await?;
            format!("Theme: {}", render::theme(theme))
        }
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => String::new(),
    };
    Ok(output)
}

/// Record today's login, seed the demo data and hand the terminal to the user
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    let mut events = state.runtime.ui.subscribe();

    let evaluation = state.services.streak.check_in().await?;
    println!("{}", render::check_in(&evaluation));

    state.services.notifications.seed_demo().await;
    state.services.messaging.seed_demo().await;
    println!(
        "{} unread notification(s), {} unread conversation(s). Type 'help' for commands.",
        state.services.notifications.unread_count().await,
        state.services.messaging.unread_count().await
    );
    info!("[session] started, streak {}", evaluation.record.current_streak());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(SessionCommand::Quit)) => break,
                    Ok(Some(command)) => match execute(state, command).await {
                        Ok(output) => println!("{}", output.trim_end()),
                        Err(e) => println!("{}", e),
                    },
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                }
                prompt();
            }
            event = events.recv() => match event {
                Ok(event) => {
                    println!("\n{}", render::ui_event(&event));
                    prompt();
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("[session] dropped {} UI events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    state.runtime.scheduler.shutdown().await;
    info!("[session] ended");
    Ok(())
}

fn prompt() {
    print!("{}", PROMPT);
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command("notifications").unwrap(),
            Some(SessionCommand::Notifications)
        );
        assert_eq!(parse_command("read 2").unwrap(), Some(SessionCommand::Read("2".into())));
        assert_eq!(parse_command("clear-conv").unwrap(), Some(SessionCommand::ClearConv));
        assert_eq!(parse_command("quit").unwrap(), Some(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_send_keeps_message_text() {
        assert_eq!(
            parse_command("send 1   see you at the lab  ").unwrap(),
            Some(SessionCommand::Send {
                conversation: "1".into(),
                text: "see you at the lab".into(),
            })
        );
        assert!(parse_command("send 1").is_err());
    }

    #[test]
    fn test_parse_simulate_template() {
        assert_eq!(
            parse_command("simulate badge").unwrap(),
            Some(SessionCommand::Simulate(NotificationTemplate::Badge))
        );
        assert!(parse_command("simulate party").is_err());
    }

    #[test]
    fn test_parse_start_conversation() {
        assert_eq!(
            parse_command("start meera tutor Meera Nair").unwrap(),
            Some(SessionCommand::Start {
                handle: "meera".into(),
                role: ParticipantRole::Tutor,
                name: "Meera Nair".into(),
            })
        );
        assert!(parse_command("start meera dean Meera").is_err());
        assert!(parse_command("start meera tutor").is_err());
    }

    #[test]
    fn test_parse_errors_are_usage_errors() {
        let err = parse_command("dance").unwrap_err();
        assert_eq!(err.code, 6002);
        assert!(parse_command("delete").is_err());
    }
}
