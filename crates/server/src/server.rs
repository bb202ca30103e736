use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use tokio::sync::Mutex;

use std::sync::Arc;

use crate::{account, cart, leads, notifications, policy, purchases};
use engine::Engine;

static ACCOUNT_HEADER: axum::http::HeaderName = axum::http::HeaderName::from_static("x-account-id");

#[derive(Clone)]
pub struct AppState {
    /// The engine behind one async mutex: every operation runs to
    /// completion before the next is processed, which makes the settlement
    /// commit path the single serialization point.
    pub engine: Arc<Mutex<Engine>>,
}

/// `TypedHeader` for the resolved buyer identity.
///
/// The session service in front of this server resolves authentication and
/// forwards the account id in "x-account-id"; the engine itself never
/// authenticates.
#[derive(Clone, Debug)]
pub struct AccountHeader(pub String);

impl Header for AccountHeader {
    fn name() -> &'static axum::http::HeaderName {
        &ACCOUNT_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(AccountHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-account-id header"),
        }
    }
}

async fn identity(
    account_header: TypedHeader<AccountHeader>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(account_header.0.clone());
    next.run(request).await
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/leads", get(leads::list))
        .route("/leads/filter", post(leads::filter))
        .route("/cart", get(cart::get))
        .route("/cart/toggle", post(cart::toggle))
        .route("/cart/clear", post(cart::clear))
        .route("/cart/settle", post(cart::settle))
        .route("/account", get(account::get))
        .route("/account/topUp", post(account::top_up))
        .route("/purchases", get(purchases::list))
        .route("/notifications", get(notifications::list))
        .route(
            "/notifications/{id}/read",
            post(notifications::mark_read),
        )
        .route("/policy", get(policy::list))
        .route("/policy/run", post(policy::run))
        .route("/policy/{name}", axum::routing::patch(policy::update))
        .route_layer(middleware::from_fn(identity))
        .with_state(state)
}

/// Builds the application router around an engine. Used by the binary and
/// by the integration tests.
pub fn app(engine: Engine) -> Router {
    router(AppState {
        engine: Arc::new(Mutex::new(engine)),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
