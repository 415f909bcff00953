use mediator::Command;
use mediator_macros::command;

#[command]
struct CreateUser {
    name: String,
}

#[command(name = "user.delete")]
#[derive(PartialEq)]
struct DeleteUser {
    id: u32,
}

fn main() {
    assert_eq!(CreateUser::NAME, "CreateUser");
    assert_eq!(DeleteUser::NAME, "user.delete");

    let cmd = CreateUser { name: "alice".into() };
    let copy = cmd.clone();
    assert_eq!(copy.name, "alice");

    let del = DeleteUser { id: 7 };
    assert_eq!(del.clone(), del);
    let _ = format!("{:?}", del);
}
