use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::index::{ProductIndex, QueryError};
use crate::query::envelope::Envelope;
use crate::stats::CatalogReport;

/// 价格阈值参数名
pub const PRICE_PARAM: &str = "priceGt";

/// 取第一个同名参数；重复参数不算错误
fn first_param(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
}

/// HTTP 查询服务：持有只读索引，路由只做参数提取与信封包装
pub struct QueryServer {
    pub index: Arc<ProductIndex>,
}

impl QueryServer {
    pub fn new(index: Arc<ProductIndex>) -> Self {
        Self { index }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/ping", get(ping_handler))
            .route("/status", get(status_handler))
            .route("/products", get(list_handler))
            .route("/products/search", get(search_handler))
            .route("/products/:id", get(get_handler))
            .with_state(self.index.clone())
    }

    pub async fn run(self, listener: TcpListener) -> anyhow::Result<()> {
        self.run_until(listener, std::future::pending()).await
    }

    /// 服务直到 `shutdown` 完成；serve 出错时直接返回错误，由调用方决定进程退出
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        tracing::info!("HTTP Query Server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("HTTP Query Server stopped");
        Ok(())
    }
}

async fn ping_handler() -> &'static str {
    "pong"
}

async fn list_handler(State(index): State<Arc<ProductIndex>>) -> Json<Envelope> {
    Json(Envelope::success(index.list_all()))
}

// 提取器失败也走统一信封，不落到 axum 的纯文本 400
async fn get_handler(
    id: Result<Path<String>, PathRejection>,
    State(index): State<Arc<ProductIndex>>,
) -> Result<Json<Envelope>, QueryError> {
    let Path(id) = id.map_err(|e| QueryError::InvalidArgument {
        param: "id",
        value: e.body_text(),
    })?;
    let product = index.get_by_id(&id)?;
    Ok(Json(Envelope::success(vec![product])))
}

async fn search_handler(
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
    State(index): State<Arc<ProductIndex>>,
) -> Result<Json<Envelope>, QueryError> {
    let Query(pairs) = params.map_err(|e| QueryError::InvalidArgument {
        param: PRICE_PARAM,
        value: e.body_text(),
    })?;
    let threshold = first_param(&pairs, PRICE_PARAM).unwrap_or_default();
    let products = index.filter_by_price_above(&threshold)?;
    Ok(Json(Envelope::success(products)))
}

async fn status_handler(State(index): State<Arc<ProductIndex>>) -> Json<CatalogReport> {
    Json(CatalogReport::from_index(&index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_param_wins_on_repeat() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("priceGt".to_string(), "1".to_string()),
            ("priceGt".to_string(), "2".to_string()),
        ];
        assert_eq!(first_param(&pairs, PRICE_PARAM).as_deref(), Some("1"));
        assert_eq!(first_param(&pairs, "missing"), None);
    }
}
