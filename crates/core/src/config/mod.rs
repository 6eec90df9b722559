//! 配置管理
//!
//! 配置由四部分组成：数据库、HTTP API、模拟引擎与可观测性。
//! 加载顺序为内置默认值、TOML 配置文件、`SENTINEL_` 前缀的环境变量，
//! 加载完成后统一校验。
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use sentinel_core::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("加载配置失败");
//! println!("API 监听地址: {}", config.api.bind_address);
//! ```

pub mod models;

#[cfg(test)]
mod tests;

pub use models::*;
