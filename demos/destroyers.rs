use servisor::{Config, Orchestrator, ServiceError, ServiceFn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let orchestrator = Orchestrator::builder(Config::default()).build();

    let session = ServiceFn::new("session")
        .on_init(|| async {
            println!("session: restored");
            Ok(())
        })
        .arc();
    orchestrator.register(session).await?;
    orchestrator.initialize_all().await?;

    // Teardown that is owned by the session service but independent of its
    // own destroy(): remove scratch space at process exit.
    orchestrator.register_destroyer("session", || async {
        println!("session destroyer: scratch dir removed");
        Ok(())
    });

    // A failing destroyer never stops its siblings; it ends up in the report.
    orchestrator.register_destroyer("uploads", || async {
        Err(ServiceError::new("uploads dir is busy"))
    });

    orchestrator.register_destroyer("metrics", || async {
        println!("metrics destroyer: final flush");
        Ok(())
    });

    let report = orchestrator.shutdown_all().await?;
    for failure in &report.destroyer_failures {
        println!("shutdown completed with destroyer error: {failure}");
    }
    Ok(())
}
