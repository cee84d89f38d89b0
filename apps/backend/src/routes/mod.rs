use actix_web::web;

pub mod admin;
pub mod artifacts;
pub mod game;
pub mod health;
pub mod players;
pub mod realtime;
pub mod rooms;

/// Register every route. Shared by `main.rs` and the integration tests so
/// both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Matchmaking and moves: /api/game/**
    cfg.service(web::scope("/api/game").configure(game::configure_routes));

    // Room reads: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Calling player: /api/players/**
    cfg.service(web::scope("/api/players").configure(players::configure_routes));

    // Operator surface: /api/admin/**
    cfg.service(web::scope("/api/admin").configure(admin::configure_routes));

    // Export artifacts and worker callback: /api/artifacts/**
    cfg.service(web::scope("/api/artifacts").configure(artifacts::configure_routes));

    // Room event streams: /ws/rooms/**
    cfg.service(web::scope("/ws/rooms").configure(realtime::configure_routes));
}
