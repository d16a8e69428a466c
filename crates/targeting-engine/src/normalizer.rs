//! 请求属性归一化

use crate::axis::Axis;
use crate::error::ValidationError;
use crate::models::DeliveryRequest;

/// 请求属性归一化器
///
/// 去除首尾空白后按 app → country → os 的顺序校验必填，
/// 通过后 country / os 的 ASCII 字母转小写，app 原样保留。
pub struct AttributeNormalizer;

impl AttributeNormalizer {
    pub fn normalize(app: &str, country: &str, os: &str) -> Result<DeliveryRequest, ValidationError> {
        let app = app.trim();
        let country = country.trim();
        let os = os.trim();

        for axis in Axis::VALIDATION_ORDER {
            let value = match axis {
                Axis::App => app,
                Axis::Country => country,
                Axis::Os => os,
            };
            if value.is_empty() {
                return Err(ValidationError::MissingField(axis));
            }
        }

        Ok(DeliveryRequest {
            app: app.to_string(),
            country: country.to_ascii_lowercase(),
            os: os.to_ascii_lowercase(),
        })
    }
}
