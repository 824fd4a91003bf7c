use daokit::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🚀 DaoKit memory search demo\n");

    let config = AppConfig::default();

    // Metrics setup
    let collector = Arc::new(MetricsCollector::from_config(&config.metrics));
    collector.add_callback(|event| match event {
        MetricEvent::Segment(segment) => println!(
            "⏱️  {} {} on {} took {:?}{}",
            segment.platform,
            segment.action,
            segment.resource,
            segment.elapsed,
            segment
                .error
                .as_deref()
                .map(|e| format!(" (failed: {})", e))
                .unwrap_or_default()
        ),
        MetricEvent::Counter(counter) => {
            println!("📈 {} +{} {:?}", counter.name, counter.value, counter.tags)
        }
    });

    let users = init_data_access(StorageType::Memory, &config).await?;
    let mut ctx = Context::with_collector(Arc::clone(&collector), &config.metrics.app_name);
    println!("✅ Memory backend ready (trace {})", ctx.trace_id());

    // Given user
    users.create(&ctx, User::new(1, "Leonardo", 38)).await?;
    println!("✅ User created");

    // Search user
    let filters = Filters::new()
        .with_id(KeyOperator::equal(1))
        .with_name(KeyOperator::equal("Leonardo"));
    let pages = users.search(&ctx, filters.clone()).await?;

    println!("Users Len: {}", pages.total);
    for user in &pages.users {
        println!(
            "Users Data: [id: {}] [name: {}] [age: {}]",
            user.id, user.name, user.age
        );
    }

    // The same filters against MySQL would run this statement
    let (sql, args) = search_statement(&filters, config.query.default_page_size)?;
    println!("\n📝 {}", sql);
    println!("   args: {:?}", args.as_slice());

    // Unknown users surface as not_found
    let missing = Filters::new()
        .with_id(KeyOperator::equal(2))
        .with_name(KeyOperator::equal("Ana"));
    if let Err(err) = users.search(&ctx, missing).await {
        ctx.with_tag("status", err.status().unwrap_or_default())
            .set_err_reason(err.code().as_str());
        println!("\n❌ {} (status {:?})", err.message(), err.status());
    }

    ctx.send("memory_search");
    Ok(())
}
