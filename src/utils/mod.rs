// 通用工具模块

pub mod path_utils;
pub mod scope_guard;
pub mod strconv;

pub use path_utils::PathUtils;
pub use scope_guard::{make_scope_guard, ScopeGuard};
