//! Session and command loop against the in-memory gateway.

use rolodex_engine::{NoticeKind, Outcome, Phase, Rejection};
use rolodex_runtime::{Command, Driver, Error, Session};
use rolodex_testing::{Call, CallKind, MemoryGateway, fixtures};
use rolodex_types::RemoteError;
use std::sync::Arc;
use std::time::Duration;

fn session(contacts: Vec<rolodex_types::Contact>) -> Session<MemoryGateway> {
    Session::new(Arc::new(MemoryGateway::new(contacts)), 20)
}

#[tokio::test]
async fn test_load_all_pages() {
    let mut session = session(fixtures::directory(45));

    let pages = session.load_pages(None).await.unwrap();

    assert_eq!(pages, 3);
    assert_eq!(session.book().list().len(), 45);
    assert!(!session.book().list().can_load_more());
    assert_eq!(
        session.gateway().calls().last(),
        Some(&Call::FetchPage {
            page: 3,
            items_per_page: 20
        })
    );
}

#[tokio::test]
async fn test_load_limited_pages() {
    let mut session = session(fixtures::directory(45));
    assert_eq!(session.load_pages(Some(2)).await.unwrap(), 2);
    assert_eq!(session.book().list().len(), 40);
    assert!(session.book().list().can_load_more());
}

#[tokio::test]
async fn test_page_failure_stops_loading() {
    let mut session = session(fixtures::directory(45));
    session.load_pages(Some(1)).await.unwrap();
    session
        .gateway()
        .fail_next(CallKind::FetchPage, RemoteError::with_status(503, "Unavailable"));

    let err = session.load_pages(None).await.unwrap_err();

    assert!(matches!(err, Error::Remote(ref e) if e.message == "Unavailable"));
    assert_eq!(session.book().list().len(), 20);
    assert_eq!(session.book().list().page(), 1);
    assert_eq!(session.book().view().error.as_deref(), Some("Unavailable"));
}

#[tokio::test]
async fn test_update_jane_end_to_end() {
    let mut session = session(fixtures::directory_with_jane(6));
    session.load_pages(None).await.unwrap();
    session.open(5).await.unwrap();
    assert_eq!(session.book().editor().draft(), &fixtures::jane_doe());

    session.book_mut().set_last_name("Smith").unwrap();
    assert_eq!(session.book().phase(), Phase::Editing);

    assert_eq!(session.commit().await.unwrap(), NoticeKind::Updated);

    let book = session.book();
    assert_eq!(book.editor().draft().last_name, "Smith");
    assert_eq!(book.editor().draft(), book.editor().snapshot());
    assert_eq!(book.list().get(5).unwrap().last_name, "Smith");
    assert_eq!(book.view().notice.as_deref(), Some("Contact updated"));

    let update = session.gateway().calls().pop().unwrap();
    let Call::Update(5, payload) = update else {
        panic!("expected update of 5, got {:?}", update);
    };
    assert_eq!(payload.id, None);
}

#[tokio::test]
async fn test_create_ann_end_to_end() {
    let mut session = session(fixtures::directory(3));
    session.load_pages(None).await.unwrap();

    let book = session.book_mut();
    book.set_first_name("Ann").unwrap();
    book.set_last_name("Lee").unwrap();
    book.add_email("ann@lee.io").unwrap();

    assert_eq!(session.commit().await.unwrap(), NoticeKind::Created);

    let book = session.book();
    assert_eq!(book.editor().draft().id, Some(4));
    assert_eq!(book.selection(), Some(4));
    assert_eq!(book.list().get(4).unwrap().full_name(), "Ann Lee");
    assert_eq!(session.gateway().contacts().len(), 4);
}

#[tokio::test]
async fn test_delete_jane_end_to_end() {
    let mut session = session(fixtures::directory_with_jane(6));
    session.load_pages(None).await.unwrap();
    session.open(5).await.unwrap();

    assert_eq!(session.remove().await.unwrap(), 5);

    let book = session.book();
    assert!(!book.list().contains(5));
    assert_eq!(book.list().len(), 5);
    assert_eq!(book.list().total_items(), 5);
    assert_eq!(book.selection(), None);
    assert_eq!(book.phase(), Phase::Empty);
}

#[tokio::test]
async fn test_delete_without_200_keeps_contact() {
    let mut session = session(vec![fixtures::jane_doe()]);
    session.load_pages(None).await.unwrap();
    session.open(5).await.unwrap();
    session.gateway().answer_delete_with(204);

    let err = session.remove().await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status code 204");
    assert!(session.book().list().contains(5));
    assert_eq!(session.book().phase(), Phase::Viewing);
}

#[tokio::test]
async fn test_invalid_save_is_rejected_locally() {
    let mut session = session(Vec::new());
    session.book_mut().set_first_name("John2").unwrap();

    let err = session.commit().await.unwrap_err();

    assert!(matches!(err, Error::Rejected(Rejection::Invalid(_))));
    assert!(session.gateway().calls().is_empty());
}

#[tokio::test]
async fn test_late_answer_for_superseded_selection_is_discarded() {
    let mut session = session(fixtures::directory(6));
    let gate = session.gateway().hold(CallKind::FetchOne, 3);

    session.select(Some(3)).unwrap();
    session.select(Some(4)).unwrap();
    assert_eq!(session.in_flight(), 2);

    assert_eq!(session.next_outcome().await, Some(Outcome::ContactLoaded(4)));

    gate.notify_one();
    assert_eq!(session.next_outcome().await, Some(Outcome::Discarded));
    assert_eq!(session.next_outcome().await, None);

    assert_eq!(session.book().editor().draft().id, Some(4));
    assert_eq!(session.book().selection(), Some(4));
}

#[tokio::test]
async fn test_page_and_fetch_run_concurrently() {
    let mut session = session(fixtures::directory_with_jane(30));
    let gate = session.gateway().hold(CallKind::FetchPage, 1);

    session.load_next_page().unwrap();
    session.select(Some(5)).unwrap();

    assert_eq!(session.next_outcome().await, Some(Outcome::ContactLoaded(5)));
    assert!(session.book().list().is_loading());

    gate.notify_one();
    assert_eq!(
        session.next_outcome().await,
        Some(Outcome::PageLoaded { added: 20 })
    );
    assert!(session.book().view().entries[4].selected);
}

#[tokio::test]
async fn test_driver_publishes_views() {
    let session = session(fixtures::directory_with_jane(6));
    let mut driver = Driver::spawn(session);

    driver.commands.send(Command::LoadNextPage).await.unwrap();
    driver.commands.send(Command::Select(Some(5))).await.unwrap();

    let view = tokio::time::timeout(
        Duration::from_secs(5),
        driver
            .views
            .wait_for(|v| v.entries.len() == 6 && v.phase == Phase::Viewing),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();
    assert_eq!(view.draft, fixtures::jane_doe());

    driver
        .commands
        .send(Command::SetLastName("Smith".into()))
        .await
        .unwrap();
    driver.commands.send(Command::Save).await.unwrap();

    let view = tokio::time::timeout(
        Duration::from_secs(5),
        driver.views.wait_for(|v| v.notice.is_some()),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();
    assert_eq!(view.notice.as_deref(), Some("Contact updated"));
    assert_eq!(view.entries[4].name, "Jane Smith");

    let Driver { commands, task, .. } = driver;
    drop(commands);
    let session = task.await.unwrap();
    assert_eq!(session.in_flight(), 0);
    assert_eq!(session.gateway().contacts()[4].last_name, "Smith");
}

#[tokio::test]
async fn test_driver_publishes_rejection_reason() {
    let session = session(fixtures::directory_with_jane(6));
    let mut driver = Driver::spawn(session);

    driver.commands.send(Command::Save).await.unwrap();
    let view = tokio::time::timeout(
        Duration::from_secs(5),
        driver.views.wait_for(|v| v.rejection.is_some()),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();
    assert_eq!(view.rejection.as_deref(), Some("No changes to save"));

    driver.commands.send(Command::LoadNextPage).await.unwrap();
    let view = tokio::time::timeout(
        Duration::from_secs(5),
        driver.views.wait_for(|v| v.entries.len() == 6),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();
    assert_eq!(view.rejection, None);

    let Driver { commands, task, .. } = driver;
    drop(commands);
    task.await.unwrap();
}
