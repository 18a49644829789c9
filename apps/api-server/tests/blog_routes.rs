use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use api_server::config::AppConfig;
use api_server::handlers::configure_routes;
use api_server::state::{AppState, StorageKind};
use quill_core::domain::{Author, NewPost, Post, PostChanges, PostSummary};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, TokenService};
use quill_infra::{InMemoryPostRepository, JwtConfig, JwtTokenService};

const BLOG: &str = "/api/v1/blog";
const SECRET: &str = "integration-secret";

fn token_service(secret: &str) -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret: secret.to_string(),
        expiration_hours: 1,
    })
}

fn token_for(subject: &str) -> String {
    token_service(SECRET).generate_token(subject).unwrap()
}

/// Store with authors 7 (Ada) and 8 (Grace) and no posts.
async fn seeded_repo() -> Arc<InMemoryPostRepository> {
    let repo = Arc::new(InMemoryPostRepository::new());
    repo.add_author(Author {
        id: 7,
        name: "Ada".to_string(),
    })
    .await;
    repo.add_author(Author {
        id: 8,
        name: "Grace".to_string(),
    })
    .await;
    repo
}

fn state_for(repo: Arc<dyn PostRepository>) -> AppState {
    AppState::new(repo, Arc::new(token_service(SECRET)), StorageKind::Memory)
}

async fn seed_post(repo: &InMemoryPostRepository, author_id: i32, title: &str) -> Post {
    repo.create(NewPost {
        author_id,
        title: title.to_string(),
        content: format!("{title} body"),
    })
    .await
    .unwrap()
}

#[actix_rt::test]
async fn test_create_without_credential_is_unauthorized() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(BLOG)
        .set_json(json!({"title": "A", "content": "B"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "unauthorized"}));
    assert!(repo.list_summaries().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_invalid_and_foreign_tokens_are_unauthorized() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let foreign = token_service("some-other-secret")
        .generate_token("7")
        .unwrap();

    for credential in ["garbage", foreign.as_str()] {
        let req = test::TestRequest::put()
            .uri(BLOG)
            .insert_header((header::AUTHORIZATION, credential))
            .set_json(json!({"id": 1, "title": "X", "content": "Y"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "unauthorized"}));
    }
}

#[actix_rt::test]
async fn test_create_stores_post_for_numeric_subject() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("7")))
        .set_json(json!({"title": "A", "content": "B"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": 1}));

    let stored = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.author_id, 7);
    assert_eq!(stored.title, "A");
    assert_eq!(stored.content, "B");
}

#[actix_rt::test]
async fn test_bearer_prefix_is_accepted() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token_for("8"))))
        .set_json(json!({"title": "A", "content": "B"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().author_id, 8);
}

#[actix_rt::test]
async fn test_invalid_payloads_are_rejected_as_plain_text() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let payloads = [
        r#"{"title":"A"}"#,
        r#"{"title":1,"content":"B"}"#,
        r#"{"title":"","content":"B"}"#,
        "not json",
        "",
    ];

    for payload in payloads {
        let req = test::TestRequest::post()
            .uri(BLOG)
            .insert_header((header::AUTHORIZATION, token_for("7")))
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "payload {payload:?}");
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = test::read_body(resp).await;
        assert_eq!(body, "Invalid Credentials");
    }

    assert!(repo.list_summaries().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_update_without_id_is_rejected() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "Old").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("7")))
        .set_json(json!({"title": "X", "content": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(test::read_body(resp).await, "Invalid Credentials");
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "Old");
}

#[actix_rt::test]
async fn test_update_without_credential_is_unauthorized() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "Old").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(BLOG)
        .set_json(json!({"id": 1, "title": "X", "content": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "unauthorized"}));
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "Old");
}

#[actix_rt::test]
async fn test_update_with_mistyped_fields_is_rejected() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "Old").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let payloads = [
        json!({"id": 1, "title": 5, "content": "Y"}),
        json!({"id": "1", "title": "X", "content": "Y"}),
        json!({"id": 1, "title": "X", "content": ""}),
    ];

    for payload in payloads {
        let req = test::TestRequest::put()
            .uri(BLOG)
            .insert_header((header::AUTHORIZATION, token_for("7")))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "payload {payload}");
        assert_eq!(test::read_body(resp).await, "Invalid Credentials");
    }

    let stored = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!((stored.title.as_str(), stored.content.as_str()), ("Old", "Old body"));
}

#[actix_rt::test]
async fn test_update_by_owner_is_idempotent() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "First").await;
    seed_post(&repo, 7, "Second").await;
    seed_post(&repo, 7, "Third").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::put()
            .uri(BLOG)
            .insert_header((header::AUTHORIZATION, token_for("7")))
            .set_json(json!({"id": 3, "title": "X", "content": "Y"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"response": {"id": 3, "title": "X", "content": "Y", "authorId": 7}})
        );
    }

    let stored = repo.find_by_id(3).await.unwrap().unwrap();
    assert_eq!((stored.title.as_str(), stored.content.as_str()), ("X", "Y"));
}

#[actix_rt::test]
async fn test_update_by_other_author_is_forbidden() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "Mine").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("8")))
        .set_json(json!({"id": 1, "title": "Hijacked", "content": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "forbidden"}));
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "Mine");
}

#[actix_rt::test]
async fn test_update_of_missing_post_is_not_found() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("7")))
        .set_json(json!({"id": 42, "title": "X", "content": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Error found in that segment"}));
}

#[actix_rt::test]
async fn test_non_numeric_subject_is_an_invalid_principal() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("ada")))
        .set_json(json!({"title": "A", "content": "B"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "invalid principal"}));
    assert!(repo.list_summaries().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_update_with_non_numeric_subject_is_an_invalid_principal() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "Old").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("ada")))
        .set_json(json!({"id": 1, "title": "X", "content": "Y"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "invalid principal"}));
    assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "Old");
}

#[actix_rt::test]
async fn test_create_for_unknown_author_is_not_found() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("99")))
        .set_json(json!({"title": "A", "content": "B"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_bulk_lists_every_post_with_author_name_only() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "First").await;
    seed_post(&repo, 8, "Second").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("{BLOG}/bulk"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"blogs": [
            {"id": 1, "title": "First", "content": "First body", "author": {"name": "Ada"}},
            {"id": 2, "title": "Second", "content": "Second body", "author": {"name": "Grace"}},
        ]})
    );
}

#[actix_rt::test]
async fn test_get_one_post() {
    let repo = seeded_repo().await;
    seed_post(&repo, 7, "First").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("{BLOG}/1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"response": {"id": 1, "title": "First", "content": "First body", "author": {"name": "Ada"}}})
    );
}

#[actix_rt::test]
async fn test_get_missing_or_non_numeric_id_is_not_found() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo.clone())))
            .configure(configure_routes),
    )
    .await;

    for path in ["/404", "/abc"] {
        let req = test::TestRequest::get()
            .uri(&format!("{BLOG}{path}"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "Error found in that segment"}));
    }
}

/// Repository whose every call fails as if the database were unreachable.
struct UnreachableRepository;

#[async_trait]
impl PostRepository for UnreachableRepository {
    async fn create(&self, _post: NewPost) -> Result<Post, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn update(&self, _changes: PostChanges) -> Result<Post, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn find_summary(&self, _id: i32) -> Result<Option<PostSummary>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn list_summaries(&self) -> Result<Vec<PostSummary>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}

#[actix_rt::test]
async fn test_storage_failures_are_internal_errors() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(Arc::new(UnreachableRepository))))
            .configure(configure_routes),
    )
    .await;

    let requests = [
        test::TestRequest::get().uri(&format!("{BLOG}/bulk")).to_request(),
        test::TestRequest::get().uri(&format!("{BLOG}/1")).to_request(),
        test::TestRequest::post()
            .uri(BLOG)
            .insert_header((header::AUTHORIZATION, token_for("7")))
            .set_json(json!({"title": "A", "content": "B"}))
            .to_request(),
        test::TestRequest::put()
            .uri(BLOG)
            .insert_header((header::AUTHORIZATION, token_for("7")))
            .set_json(json!({"id": 1, "title": "X", "content": "Y"}))
            .to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "Internal server error"}));
    }
}

#[actix_rt::test]
async fn test_health_reports_storage() {
    let repo = seeded_repo().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(repo)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_rt::test]
async fn test_memory_fallback_accepts_posts_for_seeded_authors() {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        #[cfg(feature = "postgres")]
        database: None,
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 1,
        },
        seed_authors: vec![Author {
            id: 7,
            name: "Ada".to_string(),
        }],
    };
    let state = AppState::from_config(&config).await;
    assert_eq!(state.storage, StorageKind::Memory);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(BLOG)
        .insert_header((header::AUTHORIZATION, token_for("7")))
        .set_json(json!({"title": "A", "content": "B"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": 1}));

    let req = test::TestRequest::get().uri(&format!("{BLOG}/1")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["response"]["author"], json!({"name": "Ada"}));
}
