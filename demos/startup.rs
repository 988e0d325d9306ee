use std::time::Duration;

use servisor::{Config, Orchestrator, ServiceError, ServiceFn, ServiceRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let orchestrator = Orchestrator::builder(Config::default()).build();

    let db: ServiceRef = ServiceFn::new("db")
        .on_init(|| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            println!("db: pool open");
            Ok(())
        })
        .on_destroy(|| async {
            println!("db: pool closed");
            Ok(())
        })
        .arc();

    let cache: ServiceRef = ServiceFn::new("cache")
        .depends_on(&db)
        .on_init(|| async {
            println!("cache: warmed");
            Ok(())
        })
        .on_ready(|| async {
            // May reach across services here; everything is inited.
            println!("cache: serving");
            Ok(())
        })
        .on_destroy(|| async {
            println!("cache: flushed");
            Ok(())
        })
        .arc();

    let api: ServiceRef = ServiceFn::new("api")
        .depends_on(&cache)
        .on_init(|| async {
            println!("api: listening");
            Ok(())
        })
        .on_destroy(|| async {
            println!("api: drained");
            Ok::<(), ServiceError>(())
        })
        .arc();

    // Registration order is the ready() order; init order is resolved from
    // the declared dependencies either way.
    orchestrator.register(api).await?;
    orchestrator.register(cache).await?;
    orchestrator.register(db).await?;

    orchestrator.subscribe_ready(|| println!("-- all services ready --"));

    orchestrator.initialize_all().await?;
    let report = orchestrator.shutdown_all().await?;
    println!("shutdown clean: {}", report.is_clean());
    Ok(())
}
