// Application state and router assembly

use std::sync::Arc;

use argon2::Params;
use axum::{
    extract::FromRef,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{
    login_handler, me_handler, refresh_handler, register_handler, require_auth, AccountKind,
    AccountService, AccountStore, AuthError, CoachAccount, CredentialHasher, CustomerAccount,
    ExecutorAccount, MemoryAccountStore, MemoryRefreshTokenStore, PgAccountStore,
    PgRefreshTokenStore, RefreshTokenStore, TokenService, UserAccount,
};
use crate::config::{AppConfig, HashingConfig};
use crate::db::DbPool;
use crate::orders::{
    create_order_handler, delete_order_handler, get_order_handler, list_orders_handler,
    update_order_handler, MemoryOrderRepository, OrderRepository, OrderService, PgOrderRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub users: Arc<AccountService<UserAccount>>,
    pub customers: Arc<AccountService<CustomerAccount>>,
    pub coaches: Arc<AccountService<CoachAccount>>,
    pub executors: Arc<AccountService<ExecutorAccount>>,
    pub orders: Arc<OrderService>,
}

impl AppState {
    /// State backed by PostgreSQL stores
    pub fn postgres(pool: DbPool, tokens: Arc<TokenService>, hasher: CredentialHasher) -> Self {
        let refresh_tokens: Arc<dyn RefreshTokenStore> =
            Arc::new(PgRefreshTokenStore::new(pool.clone()));

        Self {
            users: account_service::<UserAccount>(
                Arc::new(PgAccountStore::<UserAccount>::new(pool.clone())),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            customers: account_service::<CustomerAccount>(
                Arc::new(PgAccountStore::<CustomerAccount>::new(pool.clone())),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            coaches: account_service::<CoachAccount>(
                Arc::new(PgAccountStore::<CoachAccount>::new(pool.clone())),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            executors: account_service::<ExecutorAccount>(
                Arc::new(PgAccountStore::<ExecutorAccount>::new(pool.clone())),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            orders: order_service(Arc::new(PgOrderRepository::new(pool))),
            tokens,
        }
    }

    /// State backed by process-local stores; nothing survives a restart
    pub fn in_memory(tokens: Arc<TokenService>, hasher: CredentialHasher) -> Self {
        let refresh_tokens: Arc<dyn RefreshTokenStore> = Arc::new(MemoryRefreshTokenStore::new());

        Self {
            users: account_service::<UserAccount>(
                Arc::new(MemoryAccountStore::<UserAccount>::new()),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            customers: account_service::<CustomerAccount>(
                Arc::new(MemoryAccountStore::<CustomerAccount>::new()),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            coaches: account_service::<CoachAccount>(
                Arc::new(MemoryAccountStore::<CoachAccount>::new()),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            executors: account_service::<ExecutorAccount>(
                Arc::new(MemoryAccountStore::<ExecutorAccount>::new()),
                &refresh_tokens,
                &hasher,
                &tokens,
            ),
            orders: order_service(Arc::new(MemoryOrderRepository::new())),
            tokens,
        }
    }
}

fn account_service<K: AccountKind>(
    accounts: Arc<dyn AccountStore<K>>,
    refresh_tokens: &Arc<dyn RefreshTokenStore>,
    hasher: &CredentialHasher,
    tokens: &Arc<TokenService>,
) -> Arc<AccountService<K>> {
    Arc::new(AccountService::new(
        accounts,
        Arc::clone(refresh_tokens),
        hasher.clone(),
        Arc::clone(tokens),
    ))
}

fn order_service(repository: Arc<dyn OrderRepository>) -> Arc<OrderService> {
    Arc::new(OrderService::new(repository))
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AccountService<UserAccount>> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<AccountService<CustomerAccount>> {
    fn from_ref(state: &AppState) -> Self {
        state.customers.clone()
    }
}

impl FromRef<AppState> for Arc<AccountService<CoachAccount>> {
    fn from_ref(state: &AppState) -> Self {
        state.coaches.clone()
    }
}

impl FromRef<AppState> for Arc<AccountService<ExecutorAccount>> {
    fn from_ref(state: &AppState) -> Self {
        state.executors.clone()
    }
}

impl FromRef<AppState> for Arc<OrderService> {
    fn from_ref(state: &AppState) -> Self {
        state.orders.clone()
    }
}

/// Build the password hasher from optional cost overrides
pub fn credential_hasher(config: &HashingConfig) -> Result<CredentialHasher, AuthError> {
    match (config.memory_kib, config.iterations) {
        (None, None) => Ok(CredentialHasher::default()),
        (memory_kib, iterations) => CredentialHasher::with_cost(
            memory_kib.unwrap_or(Params::DEFAULT_M_COST),
            iterations.unwrap_or(Params::DEFAULT_T_COST),
        ),
    }
}

/// Register/login/refresh/me for one account role
fn account_routes<K>(tokens: Arc<TokenService>) -> Router<AppState>
where
    K: AccountKind,
    Arc<AccountService<K>>: FromRef<AppState>,
{
    Router::new()
        .route("/register", post(register_handler::<K>))
        .route("/login", post(login_handler::<K>))
        .route("/refresh", post(refresh_handler::<K>))
        .route(
            "/me",
            get(me_handler::<K>)
                .route_layer(middleware::from_fn_with_state(tokens, require_auth)),
        )
}

fn order_routes(tokens: Arc<TokenService>) -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders_handler).post(create_order_handler))
        .route(
            "/:id",
            get(get_order_handler)
                .put(update_order_handler)
                .delete(delete_order_handler),
        )
        .route_layer(middleware::from_fn_with_state(tokens, require_auth))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the application router with all endpoints
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let tokens = state.tokens.clone();

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(account_routes::<UserAccount>(tokens.clone()))
        .nest("/customer", account_routes::<CustomerAccount>(tokens.clone()))
        .nest("/coach", account_routes::<CoachAccount>(tokens.clone()))
        .nest("/executor", account_routes::<ExecutorAccount>(tokens.clone()))
        .nest("/api/v1/orders", order_routes(tokens))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
        .with_state(state)
}
