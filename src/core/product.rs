use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::date::{self, DateError};

/// 商品记录（索引中的值类型）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub code_value: String,
    pub is_published: bool,
    #[serde(serialize_with = "date::serialize")]
    pub expiration: NaiveDate,
    pub price: f64,
}

/// 第一阶段解码：除 expiration 外按自然类型解析，expiration 保留为文本
#[derive(Clone, Debug, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub code_value: String,
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

/// 第二阶段：只转换 expiration，其余字段原样搬运
impl TryFrom<RawProduct> for Product {
    type Error = DateError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let expiration = date::parse_expiration(&raw.expiration)?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            quantity: raw.quantity,
            code_value: raw.code_value,
            is_published: raw.is_published,
            expiration,
            price: raw.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(expiration: &str) -> RawProduct {
        RawProduct {
            id: 1,
            name: "Oil - Margarine".into(),
            quantity: 439,
            code_value: "S82254D".into(),
            is_published: true,
            expiration: expiration.into(),
            price: 71.42,
        }
    }

    #[test]
    fn converts_raw_record() {
        let p = Product::try_from(raw("15/12/2021")).unwrap();
        assert_eq!(p.expiration, NaiveDate::from_ymd_opt(2021, 12, 15).unwrap());
        assert_eq!(p.code_value, "S82254D");
        assert_eq!(p.quantity, 439);
    }

    #[test]
    fn bad_expiration_fails_conversion() {
        assert!(Product::try_from(raw("2021-12-15")).is_err());
    }

    #[test]
    fn serializes_expiration_in_input_format() {
        let p = Product::try_from(raw("01/02/2030")).unwrap();
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["expiration"], "01/02/2030");
        assert_eq!(v["is_published"], true);
        assert_eq!(v["id"], 1);
    }

    #[test]
    fn raw_record_rejects_wrong_types() {
        let text = r#"{"id":"1","name":"x","quantity":1,"code_value":"c",
            "is_published":true,"expiration":"01/01/2030","price":1.0}"#;
        assert!(serde_json::from_str::<RawProduct>(text).is_err());

        let negative = r#"{"id":1,"name":"x","quantity":-1,"code_value":"c",
            "is_published":true,"expiration":"01/01/2030","price":1.0}"#;
        assert!(serde_json::from_str::<RawProduct>(negative).is_err());
    }
}
