//! The contact store's HTTP API served from a background thread.

use crate::store::ContactStore;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use rolodex_types::{Contact, ContactId, ContactPage, ErrorBody, RemoteError};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

struct StubState {
    store: Mutex<ContactStore>,
    delete_status: AtomicU16,
}

impl StubState {
    fn store(&self) -> std::sync::MutexGuard<'_, ContactStore> {
        self.store.lock().expect("store poisoned")
    }
}

/// Failures are answered the way the real store does: the status code plus
/// a `{"message": ...}` body
struct StubError(RemoteError);

impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let status = self
            .0
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody::new(self.0.message))).into_response()
    }
}

impl From<RemoteError> for StubError {
    fn from(err: RemoteError) -> Self {
        Self(err)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageQuery {
    page: u32,
    items_per_page: u32,
}

type Shared = State<Arc<StubState>>;

async fn list_page(
    State(state): Shared,
    Query(query): Query<PageQuery>,
) -> Result<Json<ContactPage>, StubError> {
    Ok(Json(state.store().page(query.page, query.items_per_page)?))
}

async fn get_contact(
    State(state): Shared,
    Path(id): Path<ContactId>,
) -> Result<Json<Contact>, StubError> {
    Ok(Json(state.store().get(id)?))
}

async fn create_contact(
    State(state): Shared,
    Json(payload): Json<Contact>,
) -> Result<Json<Contact>, StubError> {
    Ok(Json(state.store().create(&payload)?))
}

async fn update_contact(
    State(state): Shared,
    Path(id): Path<ContactId>,
    Json(payload): Json<Contact>,
) -> Result<Json<Contact>, StubError> {
    Ok(Json(state.store().update(id, &payload)?))
}

async fn delete_contact(
    State(state): Shared,
    Path(id): Path<ContactId>,
) -> Result<StatusCode, StubError> {
    state.store().delete(id)?;
    let status = StatusCode::from_u16(state.delete_status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::OK);
    Ok(status)
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/contacts", axum::routing::post(create_contact))
        .route("/contacts/paginated", get(list_page))
        .route(
            "/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(state)
}

/// HTTP contact store on `127.0.0.1` with an ephemeral port.
///
/// The server runs on its own thread and runtime so it works from both sync
/// and async tests; dropping the handle asks it to shut down.
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<StubState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub fn start() -> Self {
        Self::with_contacts(Vec::new())
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let state = Arc::new(StubState {
            store: Mutex::new(ContactStore::new(contacts)),
            delete_status: AtomicU16::new(200),
        });

        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        listener
            .set_nonblocking(true)
            .expect("Failed to make listener non-blocking");
        let addr = listener.local_addr().expect("Failed to read stub address");

        let (shutdown, stopped) = oneshot::channel::<()>();
        let app = router(state.clone());
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build stub runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("Failed to adopt stub listener");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        stopped.await.ok();
                    })
                    .await
                    .expect("Stub server failed");
            });
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL with a trailing slash, ready for `--base-url`
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Answer successful deletes with `status` instead of 200
    pub fn set_delete_status(&self, status: u16) {
        self.state.delete_status.store(status, Ordering::SeqCst);
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.state.store().contacts().to_vec()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        // Not joined: graceful shutdown waits on pooled client connections
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
