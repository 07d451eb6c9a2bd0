/*
 * Responsibility
 * - API の公開ポイント (routes() の re-export など)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod result;
mod routes;

pub use routes::routes;
