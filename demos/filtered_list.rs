//! 篩選列表記憶化示例
//!
//! 模擬宿主框架的多輪重新評估：只有篩選條件改變時才重新計算，顯示截斷每輪都套用

use memo::{DerivedList, MemoConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Product {
    name: String,
    price_cents: u32,
}

fn catalog() -> Vec<Product> {
    (1..=1_000)
        .map(|i| Product {
            name: format!("PART-{i:04}"),
            price_cents: (i * 37) % 5_000,
        })
        .collect()
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug 可看到命中與重算事件
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("===== Memoized Filter Example =====\n");

    let config = MemoConfig::from_json(r#"{"name": "cheap-parts", "display_limit": 5}"#)?;
    let products = catalog();
    let mut list = DerivedList::with_config(config)?;

    // 每輪：(最高價格, 與篩選無關的主題)
    let cycles = [(1_000u32, "light"), (1_000, "dark"), (1_000, "light"), (250, "light")];

    for (round, (max_price, theme)) in cycles.iter().enumerate() {
        tracing::info!(round, theme, max_price, "重新評估");

        let visible = list.view(*max_price, || {
            products
                .iter()
                .filter(|p| p.price_cents <= *max_price)
                .cloned()
                .collect()
        });

        println!("[{}] theme={} max_price={}", round + 1, theme, max_price);
        for product in visible {
            println!("    {} ({} cents)", product.name, product.price_cents);
        }
        let shown = visible.len();
        println!("    showing {} of {}\n", shown, list.total_len());
    }

    let stats = list.stats();
    println!(
        "hits={} misses={} hit_ratio={:.2}",
        stats.hits,
        stats.misses,
        stats.hit_ratio()
    );

    Ok(())
}
