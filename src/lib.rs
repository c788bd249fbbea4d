//! encsweep: 인코더 파라미터 스윕을 이름 붙은 인코딩 실행 목록으로 확장

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod expander;
pub mod spec;
pub mod ui;

pub use error::{Result, SweepError};
pub use expander::{expand, Expansion};
pub use spec::Specification;
