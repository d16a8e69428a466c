//! 定向引擎错误类型

use thiserror::Error;

use crate::axis::Axis;

/// 请求参数校验错误
///
/// 错误文本直接作为 400 响应的 `error` 字段返回给调用方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing {0} param")]
    MissingField(Axis),
}

impl ValidationError {
    /// 缺失的字段
    pub fn field(&self) -> Axis {
        match self {
            Self::MissingField(axis) => *axis,
        }
    }
}
