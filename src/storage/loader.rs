use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::{Product, RawProduct};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("product source {} is unavailable", source_name(.path))]
    SourceUnavailable {
        /// 字节流数据源没有路径
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed product record{}: {reason}", describe(.position, .id))]
    MalformedRecord {
        /// 记录在数据源中的位置（从 0 开始）；结构性失败时未知
        position: Option<usize>,
        id: Option<i64>,
        reason: String,
    },
}

fn source_name(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!("{:?}", p),
        None => "<byte stream>".to_string(),
    }
}

fn describe(position: &Option<usize>, id: &Option<i64>) -> String {
    match (position, id) {
        (Some(p), Some(id)) => format!(" #{} (id {})", p, id),
        (Some(p), None) => format!(" #{}", p),
        _ => String::new(),
    }
}

/// 商品数据源加载器
///
/// 每次 `load` 都重新读取数据源，不缓存、不重试；任意一条记录非法则整批失败。
pub struct RecordLoader {
    path: PathBuf,
}

impl RecordLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Product>, LoadError> {
        tracing::debug!("Loading products from {:?}", self.path);
        let file =
            std::fs::File::open(&self.path).map_err(|source| LoadError::SourceUnavailable {
                path: Some(self.path.clone()),
                source,
            })?;
        let products = read_all(file, Some(self.path.as_path()))?;
        tracing::info!("Loaded {} products from {:?}", products.len(), self.path);
        Ok(products)
    }

    /// 从任意字节流加载（测试 / 非文件数据源）
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Product>, LoadError> {
        read_all(reader, None)
    }
}

fn read_all<R: Read>(mut reader: R, path: Option<&Path>) -> Result<Vec<Product>, LoadError> {
    // 先整体读入，区分 I/O 失败与解码失败
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|source| LoadError::SourceUnavailable {
            path: path.map(Path::to_path_buf),
            source,
        })?;
    decode(&buf)
}

/// 两阶段解码：先解成 RawProduct 序列，再逐条转换 expiration
fn decode(bytes: &[u8]) -> Result<Vec<Product>, LoadError> {
    let raw: Vec<RawProduct> =
        serde_json::from_slice(bytes).map_err(|e| LoadError::MalformedRecord {
            position: None,
            id: None,
            reason: e.to_string(),
        })?;

    raw.into_iter()
        .enumerate()
        .map(|(position, r)| {
            let id = r.id;
            Product::try_from(r).map_err(|e| LoadError::MalformedRecord {
                position: Some(position),
                id: Some(id),
                reason: e.to_string(),
            })
        })
        .collect()
}
