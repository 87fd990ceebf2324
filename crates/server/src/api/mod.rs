mod handlers;
mod offers;
mod routes;
mod search;

pub use routes::create_router;
