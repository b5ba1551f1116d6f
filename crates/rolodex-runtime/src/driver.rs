//! Command loop around a [`Session`]: commands arrive over an mpsc channel,
//! a fresh [`BookView`] is published over a watch channel after every change.

use crate::session::Session;
use rolodex_engine::{BookView, Rejection};
use rolodex_gateway::ContactGateway;
use rolodex_types::ContactId;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// User intents the loop understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadNextPage,
    Refresh,
    Select(Option<ContactId>),
    SetFirstName(String),
    SetLastName(String),
    OpenEmailInput,
    SetEmailInput(String),
    SubmitEmailInput,
    RemoveEmail(String),
    Cancel,
    Save,
    Delete,
    DismissNotice,
}

/// Handle to a spawned command loop
pub struct Driver<G: ContactGateway + 'static> {
    pub commands: mpsc::Sender<Command>,
    pub views: watch::Receiver<BookView>,
    pub task: JoinHandle<Session<G>>,
}

impl<G: ContactGateway + 'static> Driver<G> {
    /// Spawn [`run`] on the current tokio runtime
    pub fn spawn(session: Session<G>) -> Self {
        let (commands, inbox) = mpsc::channel(32);
        let (publish, views) = watch::channel(session.book().view());
        let task = tokio::spawn(run(session, inbox, publish));
        Self {
            commands,
            views,
            task,
        }
    }
}

fn handle<G: ContactGateway + 'static>(
    session: &mut Session<G>,
    command: Command,
) -> Result<(), Rejection> {
    match command {
        Command::LoadNextPage => session.load_next_page(),
        Command::Refresh => session.refresh(),
        Command::Select(id) => session.select(id),
        Command::SetFirstName(value) => session.book_mut().set_first_name(value),
        Command::SetLastName(value) => session.book_mut().set_last_name(value),
        Command::OpenEmailInput => {
            session.book_mut().open_email_input();
            Ok(())
        }
        Command::SetEmailInput(value) => {
            session.book_mut().set_email_input(value);
            Ok(())
        }
        Command::SubmitEmailInput => session.book_mut().submit_email_input(),
        Command::RemoveEmail(value) => session.book_mut().remove_email(&value).map(|_| ()),
        Command::Cancel => session.book_mut().cancel(),
        Command::Save => session.save(),
        Command::Delete => session.delete(),
        Command::DismissNotice => {
            session.book_mut().dismiss_notice();
            Ok(())
        }
    }
}

/// Serve commands until the sender side closes, then finish whatever is
/// still in flight and hand the session back.
///
/// A refused command is published as the view's `rejection` until the next
/// command is accepted.
pub async fn run<G: ContactGateway + 'static>(
    mut session: Session<G>,
    mut inbox: mpsc::Receiver<Command>,
    publish: watch::Sender<BookView>,
) -> Session<G> {
    let mut open = true;
    let mut rejected: Option<Rejection> = None;

    while open || session.in_flight() > 0 {
        tokio::select! {
            command = inbox.recv(), if open => match command {
                Some(command) => {
                    debug!(?command, "command received");
                    rejected = handle(&mut session, command).err();
                    if let Some(rejection) = &rejected {
                        warn!(%rejection, "command rejected");
                    }
                }
                None => open = false,
            },
            Some(outcome) = session.next_outcome(), if session.in_flight() > 0 => {
                debug!(?outcome, "completion applied");
            }
        }
        publish.send_replace(session.book().view().with_rejection(rejected.as_ref()));
    }

    session
}
