//! 请求与响应的数据传输对象

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 投放查询参数
///
/// 缺失的参数按空串处理，由归一化器报告为缺失字段。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryQuery {
    pub app: String,
    pub country: String,
    pub os: String,
}

impl DeliveryQuery {
    /// 从查询串键值对构造，同名参数重复出现时取第一个
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut app = None;
        let mut country = None;
        let mut os = None;

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "app" => &mut app,
                "country" => &mut country,
                "os" => &mut os,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        Self {
            app: app.unwrap_or_default(),
            country: country.unwrap_or_default(),
            os: os.unwrap_or_default(),
        }
    }
}

/// 存活探针响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// 就绪探针响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub database: String,
}
