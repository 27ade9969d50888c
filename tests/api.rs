//! End-to-end API tests against real PostgreSQL and Redis containers.
//!
//! Need a Docker daemon: `cargo test -- --ignored`

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::{postgres::Postgres, redis::Redis};
use tokio::net::TcpListener;

use competition_registry::{
    config::{
        Config, DatabaseConfig, KeepAliveConfig, LogFormat, RedisConfig, SeedConfig,
        ServerConfig, SessionConfig,
    },
    constants::{roles, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD},
    create_router, db,
    services::UserService,
    state::AppState,
};

struct TestApp {
    base_url: String,
    client: Client,
    pool: PgPool,
    _postgres: ContainerAsync<Postgres>,
    _redis: ContainerAsync<Redis>,
}

impl TestApp {
    async fn spawn() -> Self {
        let postgres = Postgres::default()
            .with_user("registry")
            .with_password("registry_test")
            .with_db_name("registry_test")
            .with_tag("16-alpine")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");
        let redis = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let pg_host = postgres.get_host().await.unwrap();
        let pg_port = postgres.get_host_port_ipv4(5432).await.unwrap();
        let redis_host = redis.get_host().await.unwrap();
        let redis_port = redis.get_host_port_ipv4(6379).await.unwrap();

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                log_format: LogFormat::Pretty,
            },
            database: DatabaseConfig {
                url: format!(
                    "postgres://registry:registry_test@{}:{}/registry_test",
                    pg_host, pg_port
                ),
                max_connections: 5,
            },
            redis: RedisConfig {
                url: format!("redis://{}:{}", redis_host, redis_port),
            },
            session: SessionConfig {
                secret: "test_secret_key_for_testing_only".to_string(),
                expiry_hours: 1,
                cookie_name: "session".to_string(),
                cookie_secure: false,
            },
            keep_alive: KeepAliveConfig {
                interval: Duration::from_secs(3600),
            },
            seed: SeedConfig {
                admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
                admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
        };

        let pool = db::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        db::run_migrations(&pool).await.expect("Failed to run migrations");
        UserService::seed_admin(&pool, &config.seed)
            .await
            .expect("Failed to seed admin");

        let redis_client = redis::Client::open(config.redis.url.as_str()).unwrap();
        let redis_conn = redis::aio::ConnectionManager::new(redis_client)
            .await
            .expect("Failed to connect to Redis");

        let state = AppState::new(pool.clone(), redis_conn, config);
        let app = create_router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            client: Client::new(),
            pool,
            _postgres: postgres,
            _redis: redis,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    async fn create_user(&self, admin: &str, email: &str, role: &str) -> String {
        let res = self
            .client
            .post(self.url("/user"))
            .bearer_auth(admin)
            .json(&json!({
                "email": email,
                "password": "Secret123!",
                "firstName": "Test",
                "lastName": role,
                "role": role
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        self.login(email, "Secret123!").await
    }
}

fn competition_body(name: &str, participants: Value) -> Value {
    json!({
        "name": name,
        "location": "Debrecen",
        "subjects": ["mathematics"],
        "teachers": ["Kovács Éva"],
        "date": "2024-10-15",
        "level": "regional",
        "round": "school",
        "forms": ["written"],
        "result": { "position": 3 },
        "participants": participants
    })
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_and_keepalive() {
    let app = TestApp::spawn().await;

    let res = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.client.head(app.url("/keepalive")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_login_session_lifecycle() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/auth/login"))
        .json(&json!({ "email": DEFAULT_ADMIN_EMAIL, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .client
        .post(app.url("/auth/login"))
        .json(&json!({
            "email": DEFAULT_ADMIN_EMAIL,
            "password": DEFAULT_ADMIN_PASSWORD,
            "rememberMe": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["user"]["role"], roles::ADMIN);
    let token = body["token"].as_str().unwrap().to_string();

    // the cookie alone is enough
    let session_cookie = cookie.split(';').next().unwrap().to_string();
    let res = app
        .client
        .get(app.url("/auth/me"))
        .header("cookie", &session_cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.client.get(app.url("/auth/me")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .client
        .post(app.url("/auth/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // the short logout path revokes the session as well
    let token = app.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
    let res = app
        .client
        .post(app.url("/logout"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_competition_permissions_and_participants() {
    let app = TestApp::spawn().await;
    let admin = app.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;
    let alice = app.create_user(&admin, "alice@school.test", roles::CONTRIBUTOR).await;
    let bob = app.create_user(&admin, "bob@school.test", roles::CONTRIBUTOR).await;
    let viewer = app.create_user(&admin, "vera@school.test", roles::VIEWER).await;

    let body = competition_body(
        "Math olympiad",
        json!([
            { "firstName": "Anna", "lastName": "Kiss", "classYear": 10, "classLetter": "a" },
            { "firstName": "Béla", "lastName": "Nagy", "classYear": 11, "classLetter": "B" }
        ]),
    );

    let res = app
        .client
        .post(app.url("/competition"))
        .bearer_auth(&viewer)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .client
        .post(app.url("/competition"))
        .bearer_auth(&alice)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["schoolYear"], 2024);
    assert_eq!(created["participants"].as_array().unwrap().len(), 2);
    assert_eq!(created["participants"][0]["classLetter"], "A");

    // a second competition with the same names reuses the students
    let res = app
        .client
        .post(app.url("/competition"))
        .bearer_auth(&alice)
        .json(&competition_body(
            "Physics contest",
            json!([{ "firstName": "anna", "lastName": "KISS", "classYear": 10, "classLetter": "A" }]),
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(students, 2);

    let update = competition_body(
        "Math olympiad",
        json!([{ "firstName": "Anna", "lastName": "Kiss", "classYear": 10, "classLetter": "A" }]),
    );

    let res = app
        .client
        .put(app.url(&format!("/competition/{id}")))
        .bearer_auth(&bob)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .client
        .put(app.url(&format!("/competition/{id}")))
        .bearer_auth(&admin)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["participants"].as_array().unwrap().len(), 1);
    assert!(updated["updatedAt"].is_string());

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM competition_participants WHERE competition_id = $1",
    )
    .bind(id as i32)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);

    // duplicate participant is rejected and nothing changes
    let res = app
        .client
        .put(app.url(&format!("/competition/{id}")))
        .bearer_auth(&alice)
        .json(&competition_body(
            "Renamed",
            json!([
                { "firstName": "Anna", "lastName": "Kiss", "classYear": 10, "classLetter": "A" },
                { "firstName": "ANNA", "lastName": "kiss", "classYear": 10, "classLetter": "A" }
            ]),
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .client
        .get(app.url(&format!("/competition/{id}")))
        .bearer_auth(&viewer)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["name"], "Math olympiad");

    let res = app
        .client
        .delete(app.url(&format!("/competition/{id}")))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
        .client
        .get(app.url(&format!("/competition/{id}")))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_student_search_and_similar() {
    let app = TestApp::spawn().await;
    let admin = app.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await;

    let res = app
        .client
        .post(app.url("/competition"))
        .bearer_auth(&admin)
        .json(&competition_body(
            "Chemistry",
            json!([
                { "firstName": "Anna", "lastName": "Kiss", "classYear": 9, "classLetter": "C" },
                { "firstName": "Anna", "lastName": "Horváth", "classYear": 12, "classLetter": "A" },
                { "firstName": "Béla", "lastName": "Nagy", "classYear": 9, "classLetter": "C" }
            ]),
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .client
        .get(app.url("/students/search?query=anna&classLetter=c"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["results"][0]["lastName"], "Kiss");
    assert_eq!(body["results"][0]["currentClassYear"], 9);

    let res = app
        .client
        .get(app.url("/students/search?query=anna&limit=1"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["lastName"], "Horváth");

    let res = app
        .client
        .get(app.url("/students/search?query=anna&limit=51"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .client
        .get(app.url("/students/similar?firstName=Ana&lastName=Kis"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body[0]["lastName"], "Kiss");
    assert_eq!(body.as_array().unwrap().len(), 1);

    let res = app
        .client
        .post(app.url("/student"))
        .bearer_auth(&admin)
        .json(&json!({ "firstName": "anna", "lastName": "kiss" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
