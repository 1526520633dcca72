use std::collections::HashMap;

use crate::core::Product;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// 调用方输入无法解析为期望的标量类型（不触及索引）
    #[error("invalid {param}: {value:?}")]
    InvalidArgument { param: &'static str, value: String },
    #[error("product {0} not found")]
    NotFound(i64),
}

/// 商品索引：加载阶段一次性构建，之后只读。
///
/// 没有写路径，服务期间以 `Arc<ProductIndex>` 共享即可并发读取，无需加锁。
#[derive(Debug, Default)]
pub struct ProductIndex {
    products: HashMap<i64, Product>,
}

impl ProductIndex {
    /// 按数据源顺序插入；重复 id 后者覆盖前者
    pub fn build(products: impl IntoIterator<Item = Product>) -> Self {
        let mut map = HashMap::new();
        for product in products {
            let id = product.id;
            if map.insert(id, product).is_some() {
                tracing::warn!("Duplicate product id {} in source, keeping the later record", id);
            }
        }
        Self { products: map }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// 全量列表（无序）
    pub fn list_all(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Result<&Product, QueryError> {
        self.products.get(&id).ok_or(QueryError::NotFound(id))
    }

    /// 文本 id：先解析，解析失败不查索引
    pub fn get_by_id(&self, id: &str) -> Result<Product, QueryError> {
        let id: i64 = id.parse().map_err(|_| QueryError::InvalidArgument {
            param: "id",
            value: id.to_string(),
        })?;
        self.get(id).cloned()
    }

    /// 价格严格大于阈值（开区间）；结果为空不算错误。
    ///
    /// 在调用方线程上顺序扫描，不借用其他线程池，async handler 里直接调用即可。
    pub fn price_above(&self, threshold: f64) -> Vec<Product> {
        self.products
            .values()
            .filter(|p| p.price > threshold)
            .cloned()
            .collect()
    }

    pub fn filter_by_price_above(&self, threshold: &str) -> Result<Vec<Product>, QueryError> {
        let threshold: f64 = threshold
            .parse()
            .map_err(|_| QueryError::InvalidArgument {
                param: "priceGt",
                value: threshold.to_string(),
            })?;
        Ok(self.price_above(threshold))
    }
}
