use {
    crate::{
        api,
        auction,
        bid,
        config::RunOptions,
        kernel::db,
        state::ServerState,
        user,
    },
    anyhow::Result,
    futures::Future,
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
    tokio::time::sleep,
};

async fn fault_tolerant_handler<F, Fut>(name: String, f: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    Fut::Output: Send + 'static,
{
    loop {
        let res = tokio::spawn(f()).await;
        match res {
            Ok(result) => match result {
                Ok(_) => break, // This will happen on graceful shutdown
                Err(err) => {
                    tracing::error!("{} returned error: {:?}", name, err);
                    sleep(Duration::from_millis(500)).await;
                }
            },
            Err(err) => {
                tracing::error!("{} is panicked or canceled: {:?}", name, err);
                SHOULD_EXIT.store(true, Ordering::Release);
                break;
            }
        }
    }
}

pub async fn start_server(run_options: RunOptions) -> Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        tokio::signal::ctrl_c().await.unwrap();
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let db = db::connect(&run_options.server).await?;
    auction::repository::ensure_indexes(&db).await?;
    bid::repository::ensure_indexes(&db).await?;

    let auction_service = auction::service::Service::new(
        Arc::new(db.clone()),
        auction::service::Config {
            auction_interval:     run_options.engine.auction_interval,
            close_check_interval: run_options.engine.auction_close_check_interval,
        },
    );
    let user_service = user::service::Service::new(Arc::new(db.clone()));
    let bid_service = bid::service::Service::new(
        Arc::new(db),
        bid::service::Config {
            max_batch_size:        run_options.engine.max_batch_size,
            batch_insert_interval: run_options.engine.batch_insert_interval,
            allow_self_outbid:     run_options.engine.allow_self_outbid,
        },
        auction_service.clone(),
        user_service.clone(),
    );

    let state = Arc::new(ServerState {
        auction_service: auction_service.clone(),
        bid_service: bid_service.clone(),
        user_service,
    });

    tokio::join!(
        fault_tolerant_handler("auction closer".to_string(), || {
            let service = auction_service.clone();
            async move { service.run_auction_closer_loop().await }
        }),
        fault_tolerant_handler("bid writer".to_string(), || {
            let service = bid_service.clone();
            async move { service.run_bid_flush_loop().await }
        }),
        fault_tolerant_handler("start api".to_string(), || api::start_api(
            run_options.clone(),
            state.clone()
        )),
    );

    // Every producer has stopped once the loops above return; close the
    // intake exactly once so nothing can be queued against a dead writer.
    bid_service.close_intake().await;

    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down. This is used to
// gracefully shutdown the application.
//
// NOTE: A more idiomatic approach would be to use a tokio::sync::broadcast channel, and to send a
// shutdown signal to all running tasks. However, this is a bit more complicated to implement and
// we don't rely on global state for anything else.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
