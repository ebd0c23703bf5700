use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::ApiKey;
use auth::Authenticator;
use chirpy_service::config::Platform;
use chirpy_service::domain::chirp::errors::ChirpError;
use chirpy_service::domain::chirp::models::Chirp;
use chirpy_service::domain::chirp::models::ChirpFilter;
use chirpy_service::domain::chirp::models::ChirpId;
use chirpy_service::domain::chirp::models::SortOrder;
use chirpy_service::domain::chirp::ports::ChirpRepository;
use chirpy_service::domain::chirp::service::ChirpService;
use chirpy_service::domain::refresh_token::errors::RefreshTokenError;
use chirpy_service::domain::refresh_token::ledger::RefreshTokenLedger;
use chirpy_service::domain::refresh_token::models::RefreshToken;
use chirpy_service::domain::refresh_token::ports::RefreshTokenRepository;
use chirpy_service::domain::session::service::SessionService;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserRepository;
use chirpy_service::domain::user::service::UserService;
use chirpy_service::inbound::http::router::create_router;
use chirpy_service::outbound::repositories::PostgresChirpRepository;
use chirpy_service::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy_service::outbound::repositories::PostgresUserRepository;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub db: Arc<InMemoryDb>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in production mode
    pub async fn spawn() -> Self {
        Self::spawn_on(Platform::Production).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_on(platform: Platform) -> Self {
        let db = Arc::new(InMemoryDb::default());

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_service = Arc::new(UserService::new(Arc::clone(&db), platform));
        let chirp_service = Arc::new(ChirpService::new(Arc::clone(&db)));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&db),
            RefreshTokenLedger::new(Arc::clone(&db), platform),
            Authenticator::new(JWT_SECRET, chrono::Duration::hours(1)),
            ApiKey::new(POLKA_API_KEY),
        ));

        let router = create_router(user_service, chirp_service, session_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            db,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Spawn the application over a Postgres database and return its address
    pub async fn spawn_on_postgres(pool: PgPool) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let users = Arc::new(PostgresUserRepository::new(pool.clone()));
        let user_service = Arc::new(UserService::new(Arc::clone(&users), Platform::Production));
        let chirp_service = Arc::new(ChirpService::new(Arc::new(
            PostgresChirpRepository::new(pool.clone()),
        )));
        let session_service = Arc::new(SessionService::new(
            users,
            RefreshTokenLedger::new(
                Arc::new(PostgresRefreshTokenRepository::new(pool)),
                Platform::Production,
            ),
            Authenticator::new(JWT_SECRET, chrono::Duration::hours(1)),
            ApiKey::new(POLKA_API_KEY),
        ));

        let router = create_router(user_service, chirp_service, session_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        format!("http://127.0.0.1:{}", port)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response body's `data`
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the response body's `data`
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Register and log in, returning `(user_id, access_token, refresh_token)`
    pub async fn signed_in_user(&self, email: &str) -> (String, String, String) {
        self.create_user(email, "04234").await;
        let session = self.login(email, "04234").await;

        (
            session["id"].as_str().unwrap().to_string(),
            session["token"].as_str().unwrap().to_string(),
            session["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Post a chirp and return its id
    pub async fn create_chirp(&self, token: &str, body: &str) -> String {
        let response = self
            .post("/api/chirps")
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a fresh database on the server named by `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset, so the Postgres suite
    /// can be skipped on machines without a database.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_chirpy_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Cleanup runs in the background on the test runtime
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

/// Storage double for all three repository ports.
///
/// Deleting users cascades to their chirps and refresh tokens, like the
/// foreign keys in the migrations.
#[derive(Default)]
pub struct InMemoryDb {
    pub users: Mutex<Vec<User>>,
    pub chirps: Mutex<Vec<Chirp>>,
    pub refresh_tokens: Mutex<Vec<RefreshToken>>,
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;
        *existing = user.clone();
        Ok(user)
    }

    async fn set_chirpy_red(&self, id: &UserId) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(UserError::NotFound(id.to_string()))?;
        user.is_chirpy_red = true;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_all(&self) -> Result<u64, UserError> {
        let removed = {
            let mut users = self.users.lock().unwrap();
            let removed = users.len() as u64;
            users.clear();
            removed
        };
        self.chirps.lock().unwrap().clear();
        self.refresh_tokens.lock().unwrap().clear();
        Ok(removed)
    }
}

#[async_trait]
impl ChirpRepository for InMemoryDb {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        Ok(chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: &ChirpFilter) -> Result<Vec<Chirp>, ChirpError> {
        let chirps = self.chirps.lock().unwrap();
        let mut matching: Vec<Chirp> = chirps
            .iter()
            .filter(|c| filter.author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect();

        matching.sort_by_key(|c| (c.created_at, c.id.0));
        if filter.sort == SortOrder::Descending {
            matching.reverse();
        }
        Ok(matching)
    }

    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| c.id != id);
        if chirps.len() == before {
            return Err(ChirpError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryDb {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        if tokens.iter().any(|t| t.token == token.token) {
            return Err(RefreshTokenError::Conflict);
        }
        tokens.push(token.clone());
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, RefreshTokenError> {
        let tokens = self.refresh_tokens.lock().unwrap();
        Ok(tokens.iter().find(|t| t.token == token).cloned())
    }

    async fn mark_revoked(&self, token: &str, at: DateTime<Utc>) -> Result<(), RefreshTokenError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        let row = tokens
            .iter_mut()
            .find(|t| t.token == token)
            .ok_or(RefreshTokenError::NotFound)?;
        row.revoked_at.get_or_insert(at);
        row.updated_at = at;
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RefreshTokenError> {
        let mut tokens = self.refresh_tokens.lock().unwrap();
        let removed = tokens.len() as u64;
        tokens.clear();
        Ok(removed)
    }
}
