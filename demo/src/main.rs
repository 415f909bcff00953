use anyhow::Context;
use mediator::{
    CommandContext, CommandExecuted, CommandHandler, EventContext, EventRaised, Mediator,
    MediatorConfig, MediatorResult, Observer, Scoped, TypeSet,
};
use mediator_macros::{command, event};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[command(name = "account.deposit")]
struct Deposit {
    account: String,
    amount: i64,
}

#[event(name = "account.deposited")]
struct Deposited {
    account: String,
    amount: i64,
    flagged: bool,
}

#[derive(Default)]
struct Ledger {
    balance: Mutex<i64>,
}

impl CommandHandler<Deposit> for Ledger {
    fn handle(&self, ctx: &CommandContext<'_>, cmd: &mut Deposit) -> MediatorResult<()> {
        if cmd.amount <= 0 {
            return Err(anyhow::anyhow!("deposit must be positive: {}", cmd.amount).into());
        }
        let mut balance = self.balance.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
        *balance += cmd.amount;

        ctx.raise(&mut Deposited {
            account: cmd.account.clone(),
            amount: cmd.amount,
            flagged: false,
        })
    }
}

#[derive(Default)]
struct LargeDepositFlagger;

impl Observer<Deposited> for LargeDepositFlagger {
    fn react_to(&self, _ctx: &EventContext<'_>, event: &mut Deposited) -> MediatorResult<()> {
        event.flagged = event.amount >= 10_000;
        Ok(())
    }
}

#[derive(Default)]
struct AuditTrail;

impl Observer<EventRaised> for AuditTrail {
    fn react_to(&self, _ctx: &EventContext<'_>, event: &mut EventRaised) -> MediatorResult<()> {
        info!(event = %event.event_kind(), source = ?event.source(), "audit: event raised");
        Ok(())
    }
}

impl Observer<CommandExecuted> for AuditTrail {
    fn react_to(&self, _ctx: &EventContext<'_>, event: &mut CommandExecuted) -> MediatorResult<()> {
        info!(command = %event.command_kind(), scope = %event.scope(), "audit: command executed");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let ledger = Arc::new(Ledger::default());
    let mediator = Mediator::builder()
        .types(
            TypeSet::new()
                .command::<Deposit>()
                .handler_instance::<Deposit, _>(ledger.clone())
                .event::<Deposited>()
                .observer::<Deposited, LargeDepositFlagger>()
                .observer::<EventRaised, AuditTrail>()
                .observer::<CommandExecuted, AuditTrail>(),
        )
        .config(MediatorConfig::default())
        .build()
        .context("binding mediator")?;

    for amount in [250, 12_000] {
        let mut cmd = Scoped::new(Deposit {
            account: "acc-1".into(),
            amount,
        });
        mediator.observe::<Deposited, _>(cmd.scope(), |e| {
            info!(account = %e.account, amount = e.amount, flagged = e.flagged, "deposit observed");
        });
        mediator.execute_scoped(&mut cmd)?;
    }

    if let Err(err) = mediator.execute(&mut Deposit {
        account: "acc-1".into(),
        amount: -5,
    }) {
        info!(error = %err, "deposit rejected");
    }

    let balance = *ledger.balance.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(balance, active_scopes = mediator.active_scopes(), "done");
    Ok(())
}
