use std::sync::Arc;

mod get_user;
mod models;

pub use models::*;

pub struct Repository {
    pub db: Arc<dyn Database>,
}

impl Repository {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}
