use chrono::NaiveDate;

/// 过期日固定格式：DD/MM/YYYY（不做格式推断）
pub const EXPIRATION_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("expiration {0:?} does not match DD/MM/YYYY")]
    Shape(String),
    #[error("expiration {0:?} is not a calendar date")]
    Calendar(String),
}

/// 解析 DD/MM/YYYY。
///
/// 先做逐字节形状校验（chrono 的 `%d`/`%Y` 会接受一位数日期与带符号年份），
/// 再交给 chrono 做日历校验（31/02 之类会在这一步失败）。
pub fn parse_expiration(text: &str) -> Result<NaiveDate, DateError> {
    let b = text.as_bytes();
    let shape_ok = b.len() == 10
        && b[2] == b'/'
        && b[5] == b'/'
        && b
            .iter()
            .enumerate()
            .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit());
    if !shape_ok {
        return Err(DateError::Shape(text.to_string()));
    }

    NaiveDate::parse_from_str(text, EXPIRATION_FORMAT)
        .map_err(|_| DateError::Calendar(text.to_string()))
}

pub fn format_expiration(date: &NaiveDate) -> String {
    date.format(EXPIRATION_FORMAT).to_string()
}

/// serde `serialize_with` 适配：输出与输入同格式，保证可回读
pub(crate) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_expiration(date))
}
