use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use charter_adapters::{
    config::AllowedOrigins,
    http::routes::{
        approve_user, forgot_password, list_pending, login, logout, me, register, reject_user,
        resend_verification, reset_password, verify_email,
    },
};
use charter_core::{BannedTokenStore, EmailClient, UserStore, VerificationTokenStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The identity and approval service: every `/auth` and `/users` route,
/// wired to the provided stores.
pub struct PortalService {
    router: Router,
}

impl PortalService {
    /// Build the service router. Each route gets exactly the state it
    /// needs; stores are cheap to clone through their internal `Arc`s.
    pub fn new<U, B, V, E>(
        user_store: U,
        banned_token_store: B,
        verification_token_store: V,
        email_client: E,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        B: BannedTokenStore + Clone + 'static,
        V: VerificationTokenStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            .merge(
                Router::new()
                    .route("/auth/register", post(register::<U, V, E>))
                    .route("/auth/resend-verification", post(resend_verification::<U, V, E>))
                    .route("/auth/forgot-password", post(forgot_password::<U, V, E>))
                    .with_state((
                        user_store.clone(),
                        verification_token_store.clone(),
                        email_client,
                    )),
            )
            .merge(
                Router::new()
                    .route("/auth/login", post(login::<U>))
                    .with_state(user_store.clone()),
            )
            .merge(
                Router::new()
                    .route("/auth/logout", post(logout::<B>))
                    .with_state(banned_token_store.clone()),
            )
            .merge(
                Router::new()
                    .route("/auth/me", get(me::<U, B>))
                    .with_state((user_store.clone(), banned_token_store.clone())),
            )
            .merge(
                Router::new()
                    .route("/auth/verify-email", post(verify_email::<U, V>))
                    .route("/auth/reset-password", post(reset_password::<U, V>))
                    .with_state((user_store.clone(), verification_token_store)),
            )
            .merge(
                Router::new()
                    .route("/users", get(list_pending::<U, B>))
                    .route(
                        "/users/{id}",
                        put(approve_user::<U, B>).delete(reject_user::<U, B>),
                    )
                    .with_state((user_store, banned_token_store)),
            );

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be mounted on another application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Portal service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
