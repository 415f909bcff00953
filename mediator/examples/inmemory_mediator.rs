use mediator::{
    BindError, Command, CommandContext, CommandHandler, Event, EventContext, Mediator,
    MediatorResult, Observer, Scoped, TypeSet,
};

#[derive(Debug, Clone)]
struct CreateUser {
    name: String,
}

impl Command for CreateUser {
    const NAME: &'static str = "user.create";
}

#[derive(Debug, Clone)]
struct UserCreated {
    name: String,
}

impl Event for UserCreated {
    const NAME: &'static str = "user.created";
}

#[derive(Default)]
struct CreateUserHandler;

impl CommandHandler<CreateUser> for CreateUserHandler {
    fn handle(&self, ctx: &CommandContext<'_>, cmd: &mut CreateUser) -> MediatorResult<()> {
        println!("CreateUser: name={}", cmd.name);
        ctx.raise(&mut UserCreated {
            name: cmd.name.clone(),
        })
    }
}

#[derive(Default)]
struct WelcomeMailer;

impl Observer<UserCreated> for WelcomeMailer {
    fn react_to(&self, _ctx: &EventContext<'_>, event: &mut UserCreated) -> MediatorResult<()> {
        println!("welcome mail queued for {}", event.name);
        Ok(())
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
struct DeleteUser {
    id: u32,
}

impl Command for DeleteUser {
    const NAME: &'static str = "user.delete";
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mediator = Mediator::builder()
        .types(
            TypeSet::new()
                .command::<CreateUser>()
                .handler::<CreateUser, CreateUserHandler>()
                .event::<UserCreated>()
                .observer::<UserCreated, WelcomeMailer>(),
        )
        .build()?;

    let mut cmd = Scoped::new(CreateUser {
        name: "Alice".into(),
    });
    mediator.observe::<UserCreated, _>(cmd.scope(), |e| {
        println!("caller saw UserCreated for {}", e.name);
    });
    mediator.execute_scoped(&mut cmd)?;

    // 没有处理器的命令 -> 绑定失败
    let result = Mediator::builder()
        .types(TypeSet::new().command::<DeleteUser>())
        .build();
    if let Err(BindError::UnhandledCommand { command }) = result {
        eprintln!("UnhandledCommand as expected for command: {}", command);
    }
    Ok(())
}
