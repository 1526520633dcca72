use anyhow::Context;
use clap::Parser;
use product_catalog::config::{FileConfig, ServeConfig};
use product_catalog::index::ProductIndex;
use product_catalog::query::QueryServer;
use product_catalog::stats::CatalogReport;
use product_catalog::storage::RecordLoader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "product-catalog", about = "Read-only product catalog HTTP service")]
struct Args {
    /// 商品数据源（JSON 数组）
    #[arg(short, long)]
    source: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("product_catalog=info")),
        )
        .init();

    let args = Args::parse();
    let file = match &args.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("failed to read config {:?}", path))?,
        None => FileConfig::default(),
    };
    let cfg = ServeConfig::resolve(file, args.source, args.host, args.port);

    info!("Starting product-catalog");

    // 加载阶段：失败即退出，不带着残缺索引对外服务
    let loader = RecordLoader::new(&cfg.source);
    let products = loader
        .load()
        .with_context(|| format!("failed to load products from {:?}", loader.path()))?;
    let index = Arc::new(ProductIndex::build(products));
    info!("Catalog loaded:\n{}", CatalogReport::from_index(&index));

    let listener = tokio::net::TcpListener::bind(cfg.addr())
        .await
        .with_context(|| format!("failed to bind {}", cfg.addr()))?;

    info!("product-catalog ready. Query via: http://{}/products", cfg.addr());

    // 不脱离主任务：serve 失败即 main 返回错误，进程退出
    QueryServer::new(index)
        .run_until(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("ctrl-c handler failed: {}", e);
            }
            info!("Shutting down...");
        })
        .await
        .context("HTTP server stopped")?;

    Ok(())
}
