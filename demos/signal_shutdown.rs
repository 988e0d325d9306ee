use std::sync::Arc;

use servisor::{Config, LogWriter, Orchestrator, ServiceFn, Subscribe};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let orchestrator = Orchestrator::builder(Config::default())
        .with_subscribers(subscribers)
        .build();

    let db = ServiceFn::new("db").arc();
    let api = ServiceFn::new("api").depends_on(&db).arc();
    orchestrator.register(db).await?;
    orchestrator.register(api).await?;

    println!("running; press Ctrl-C to shut down");
    match orchestrator.run_until_shutdown().await {
        Ok(report) if report.is_clean() => println!("stopped gracefully"),
        Ok(report) => println!(
            "stopped with {} destroyer error(s)",
            report.destroyer_failures.len()
        ),
        Err(e) => println!("stopped with error: {e}"),
    }
    Ok(())
}
