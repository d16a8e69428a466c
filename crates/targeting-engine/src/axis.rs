//! 定向维度
//!
//! 每个维度对应一对 include/exclude 列表。维度表同时被进程内求值器和
//! 数据库下推查询使用，两条路径的列名与参数顺序都从这里派生。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 定向维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Country,
    Os,
    App,
}

impl Axis {
    /// 求值顺序
    pub const ALL: [Axis; 3] = [Axis::Country, Axis::Os, Axis::App];

    /// 请求参数校验顺序（第一个缺失的字段决定错误信息）
    pub const VALIDATION_ORDER: [Axis; 3] = [Axis::App, Axis::Country, Axis::Os];

    /// 请求参数名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Os => "os",
            Self::App => "app",
        }
    }

    /// targeting_rules 表中的 include 列名
    pub fn include_column(&self) -> &'static str {
        match self {
            Self::Country => "include_country",
            Self::Os => "include_os",
            Self::App => "include_app",
        }
    }

    /// targeting_rules 表中的 exclude 列名
    pub fn exclude_column(&self) -> &'static str {
        match self {
            Self::Country => "exclude_country",
            Self::Os => "exclude_os",
            Self::App => "exclude_app",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_order_starts_with_app() {
        assert_eq!(
            Axis::VALIDATION_ORDER,
            [Axis::App, Axis::Country, Axis::Os]
        );
    }

    #[test]
    fn test_column_names() {
        for axis in Axis::ALL {
            assert_eq!(axis.include_column(), format!("include_{}", axis));
            assert_eq!(axis.exclude_column(), format!("exclude_{}", axis));
        }
    }
}
