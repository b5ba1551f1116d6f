//! rolodex-engine: keeps a paginated contact list, a selection and an
//! editable draft consistent with a remote contact store.
//!
//! The engine is synchronous and never performs I/O. Each operation that
//! needs the store returns a ticketed [`Request`]; whoever drives the
//! gateway performs the call and hands the answer back as a [`Completion`]
//! through [`ContactBook::apply`]. Answers may arrive in any order;
//! answers for superseded requests are discarded.
//!
//! ```
//! use rolodex_engine::{Completion, ContactBook, GatewayCall, Phase, Reply};
//! use rolodex_types::Contact;
//!
//! let mut book = ContactBook::new(20);
//! let request = book.select(Some(5)).unwrap().unwrap();
//! assert_eq!(request.call, GatewayCall::FetchOne { id: 5 });
//! assert_eq!(book.phase(), Phase::Loading);
//!
//! let jane = Contact::new("Jane", "Doe").with_id(5);
//! book.apply(Completion::ok(request.ticket, Reply::Contact(jane)));
//! assert_eq!(book.phase(), Phase::Viewing);
//! ```

pub mod accumulator;
pub mod book;
pub mod draft;
pub mod notifications;
pub mod reconciler;
pub mod rejection;
pub mod request;
pub mod validator;
pub mod view;

pub use accumulator::ContactList;
pub use book::{ContactBook, Outcome};
pub use draft::{DraftEditor, EmailInput, FieldErrors, Phase};
pub use notifications::{NoticeKind, Notifications};
pub use rejection::Rejection;
pub use request::{Completion, GatewayCall, Reply, Request, Ticket};
pub use validator::{Field, Reason, ValidationError, validate_email, validate_name};
pub use view::{BookView, EntryView};
