use std::fmt;

use serde::Serialize;

use crate::index::ProductIndex;

/// 目录概况（启动日志与 /status 使用）
#[derive(Clone, Debug, Default, Serialize)]
pub struct CatalogReport {
    /// 唯一 id 数
    pub indexed_count: usize,
    /// is_published = true 的商品数
    pub published_count: usize,
    /// 空索引时为 None
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl CatalogReport {
    pub fn from_index(index: &ProductIndex) -> Self {
        let mut report = Self {
            indexed_count: index.len(),
            ..Self::default()
        };
        for p in index.iter() {
            if p.is_published {
                report.published_count += 1;
            }
            report.min_price = Some(report.min_price.map_or(p.price, |m| m.min(p.price)));
            report.max_price = Some(report.max_price.map_or(p.price, |m| m.max(p.price)));
        }
        report
    }
}

fn price(v: Option<f64>) -> String {
    v.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for CatalogReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════════════╗")?;
        writeln!(f, "║           product-catalog Report                 ║")?;
        writeln!(f, "╠══════════════════════════════════════════════════╣")?;
        writeln!(f, "║   products:     {:>10}                       ║", self.indexed_count)?;
        writeln!(f, "║   published:    {:>10}                       ║", self.published_count)?;
        writeln!(f, "║   min price:    {:>10}                       ║", price(self.min_price))?;
        writeln!(f, "║   max price:    {:>10}                       ║", price(self.max_price))?;
        writeln!(f, "╚══════════════════════════════════════════════════╝")?;
        Ok(())
    }
}
