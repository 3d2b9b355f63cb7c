//! # 블로그 게시글 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. SQLite 연결 풀 생성 + 마이그레이션 (`db::connect`)
//! 5. 게시글 저장소(PostRepository) 생성 — 전역 변수 없이 AppState로 전달
//! 6. API 라우터와 미들웨어 설정
//! 7. HTTP 서버 시작 (Ctrl+C로 정상 종료)

mod config;
mod db;
mod error;
mod models;
mod routes;

use anyhow::Result;
use config::Config;
use db::PostRepository;
use routes::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // RUST_LOG가 없으면 이 크레이트와 tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogpost=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting blog post server on {}:{}", config.host, config.port);

    let pool = db::connect(&config.database_url, config.max_connections).await?;

    // 저장소는 여기서 한 번만 만들어지고, 핸들러는 State를 통해 참조합니다.
    let state = AppState {
        posts: PostRepository::new(pool.clone(), config.query_timeout),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 진행 중인 요청이 끝난 뒤 풀을 닫아 WAL 체크포인트가 정상적으로 기록되게 합니다.
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Ctrl+C(SIGINT)를 기다립니다.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        // 신호를 받을 수 없으면 서버를 계속 실행합니다.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
