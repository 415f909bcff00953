use mediator::{CommandContext, CommandHandler, Mediator, MediatorResult, Scoped, TypeSet};
use mediator_macros::{command, event};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::task::JoinSet;

#[command]
struct Work {
    n: usize,
    echoed: usize,
}

#[event]
struct Echo {
    n: usize,
}

#[derive(Default)]
struct WorkHandler;

impl CommandHandler<Work> for WorkHandler {
    fn handle(&self, ctx: &CommandContext<'_>, command: &mut Work) -> MediatorResult<()> {
        ctx.raise(&mut Echo { n: command.n })
    }
}

fn mediator() -> Mediator {
    Mediator::builder()
        .types(
            TypeSet::new()
                .command::<Work>()
                .handler::<Work, WorkHandler>()
                .event::<Echo>(),
        )
        .build()
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_executions_keep_scopes_apart() {
    let mediator = Arc::new(mediator());
    let mismatches = Arc::new(AtomicUsize::new(0));

    let mut set = JoinSet::new();
    for n in 0..100 {
        let mediator = mediator.clone();
        let mismatches = mismatches.clone();
        set.spawn_blocking(move || {
            let mut cmd = Scoped::new(Work { n, echoed: 0 });
            let seen = Arc::new(AtomicUsize::new(usize::MAX));
            {
                let seen = seen.clone();
                mediator.observe::<Echo, _>(cmd.scope(), move |e| seen.store(e.n, Ordering::SeqCst));
            }
            mediator.execute_scoped(&mut cmd).unwrap();
            if seen.load(Ordering::SeqCst) != n {
                mismatches.fetch_add(1, Ordering::SeqCst);
            }
            cmd.echoed = seen.load(Ordering::SeqCst);
            cmd.into_inner()
        });
    }

    let mut results = Vec::new();
    while let Some(res) = set.join_next().await {
        results.push(res.unwrap());
    }

    assert_eq!(results.len(), 100);
    assert!(results.iter().all(|w| w.n == w.echoed));
    assert_eq!(mismatches.load(Ordering::SeqCst), 0);
    assert_eq!(mediator.active_scopes(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_observe_on_one_scope_is_serialized() {
    let mediator = Arc::new(mediator());
    let cmd = Scoped::new(Work { n: 1, echoed: 0 });
    let scope = cmd.scope();
    let hits = Arc::new(AtomicUsize::new(0));

    let mut set = JoinSet::new();
    for _ in 0..50 {
        let mediator = mediator.clone();
        let hits = hits.clone();
        set.spawn_blocking(move || {
            mediator.observe::<Echo, _>(scope, move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        });
    }
    while let Some(res) = set.join_next().await {
        res.unwrap();
    }

    let mut cmd = cmd;
    mediator.execute_scoped(&mut cmd).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 50);
    assert_eq!(mediator.active_scopes(), 0);
}
