pub mod abstract_trait;
pub mod di;
pub mod domain;
pub mod handler;
pub mod middleware;
pub mod repository;
pub mod service;
pub mod state;
pub mod storage;
